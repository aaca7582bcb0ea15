use codspeed_criterion_compat::{BenchmarkId, black_box};
use codspeed_criterion_compat::{Criterion, criterion_group, criterion_main};
use repo_search::config::{GITHUB_SEARCH_ENDPOINT, MAX_QUERY_LEN};
use repo_search::pipeline::state::{Command, Message};
use repo_search::{PipelineState, QueryUrlBuilder, SearchResult, SearchResultItem};

fn create_response_body(num_items: usize) -> Vec<u8> {
    let items: Vec<String> = (0..num_items)
        .map(|i| {
            format!(
                r#"{{"id":{i},"name":"repo{i}","full_name":"org{i}/repo{i}","private":false,"owner":{{"login":"org{i}","id":{i}}},"html_url":"https://github.com/org{i}/repo{i}","description":"Repository number {i}","stargazers_count":{i},"language":"Rust"}}"#
            )
        })
        .collect();
    format!(
        r#"{{"total_count":{},"incomplete_results":false,"items":[{}]}}"#,
        num_items * 10,
        items.join(",")
    )
    .into_bytes()
}

fn create_result(num_items: usize) -> SearchResult {
    SearchResult {
        total_count: num_items as u64,
        incomplete_results: false,
        items: (0..num_items)
            .map(|i| SearchResultItem {
                name: format!("repo{i}"),
                full_name: format!("org{i}/repo{i}"),
            })
            .collect(),
    }
}

fn benchmark_url_building(c: &mut Criterion) {
    let mut group = c.benchmark_group("url_building");
    let builder = QueryUrlBuilder::new(GITHUB_SEARCH_ENDPOINT, MAX_QUERY_LEN);
    let long_query = "x".repeat(MAX_QUERY_LEN);

    let queries = [
        ("simple", "tokio"),
        ("qualified", "language:rust stars:>1000 topic:async"),
        ("unicode", "日本語 検索 リポジトリ"),
        ("max_length", long_query.as_str()),
    ];

    for (name, query) in queries {
        group.bench_with_input(BenchmarkId::new("build", name), query, |b, query| {
            b.iter(|| black_box(builder.build(black_box(query))));
        });
    }

    group.finish();
}

fn benchmark_response_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("response_decoding");

    for size in [0, 30, 100].iter() {
        let body = create_response_body(*size);
        group.bench_with_input(BenchmarkId::new("items", size), &body, |b, body| {
            b.iter(|| {
                let result = SearchResult::from_slice(black_box(body));
                black_box(result.map(|r| r.full_names()))
            });
        });
    }

    group.finish();
}

fn benchmark_completion_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("state_completion");

    for size in [1, 30, 100].iter() {
        let result = create_result(*size);
        group.bench_with_input(BenchmarkId::new("items", size), &result, |b, result| {
            let mut state = PipelineState::new(QueryUrlBuilder::new(
                GITHUB_SEARCH_ENDPOINT,
                MAX_QUERY_LEN,
            ));
            let mut round = 0u64;

            b.iter(|| {
                // Alternate queries so the deduplicator admits every round
                round += 1;
                let query = if round % 2 == 0 { "rust" } else { "go" };
                state.update(Message::QueryChanged(query.to_string()));
                let transition = state.update(Message::QuerySettled(query.to_string()));
                if let Command::Fetch { token, .. } = transition.command {
                    let transition = state.update(Message::SearchCompleted {
                        token,
                        outcome: Ok(result.clone()),
                    });
                    black_box(transition.events);
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_url_building,
    benchmark_response_decoding,
    benchmark_completion_path
);
criterion_main!(benches);
