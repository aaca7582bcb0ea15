use crate::schemas::{SearchResult, SearchResultItem};

pub fn format_search_item(item: &SearchResultItem, use_color: bool) -> String {
    use colored::Colorize;

    if use_color {
        format!("{}  {}", item.full_name.bold(), item.name.dimmed())
    } else {
        format!("{}  {}", item.full_name, item.name)
    }
}

/// Footer line, e.g. `2 of 1532 results (incomplete)`
pub fn format_summary(result: &SearchResult, shown: usize) -> String {
    let mut summary = format!("{shown} of {} results", result.total_count);
    if result.incomplete_results {
        summary.push_str(" (incomplete)");
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, full_name: &str) -> SearchResultItem {
        SearchResultItem {
            name: name.to_string(),
            full_name: full_name.to_string(),
        }
    }

    #[test]
    fn test_format_item_without_color() {
        assert_eq!(
            format_search_item(&item("foo", "org/foo"), false),
            "org/foo  foo"
        );
    }

    #[test]
    fn test_format_item_with_color_keeps_text() {
        let line = format_search_item(&item("foo", "org/foo"), true);
        assert!(line.contains("org/foo"));
        assert!(line.contains("foo"));
    }

    #[test]
    fn test_summary() {
        let mut result = SearchResult {
            total_count: 1532,
            incomplete_results: false,
            items: vec![item("foo", "org/foo"), item("bar", "org/bar")],
        };
        assert_eq!(format_summary(&result, 2), "2 of 1532 results");

        result.incomplete_results = true;
        assert_eq!(format_summary(&result, 1), "1 of 1532 results (incomplete)");
    }
}
