use futures::{Stream, StreamExt, future};

/// Suppresses consecutive equal values.
///
/// The comparison baseline is the last value *admitted*, so a run of suppressed
/// duplicates never moves it.
#[derive(Debug, Clone)]
pub struct Deduplicator<T> {
    last: Option<T>,
}

impl<T> Default for Deduplicator<T> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<T: PartialEq + Clone> Deduplicator<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true and records `value` if it differs from the last admitted value.
    pub fn admit(&mut self, value: &T) -> bool {
        if self.last.as_ref() == Some(value) {
            return false;
        }
        self.last = Some(value.clone());
        true
    }
}

pub fn dedupe<S>(source: S) -> impl Stream<Item = S::Item>
where
    S: Stream,
    S::Item: PartialEq + Clone,
{
    let mut deduplicator = Deduplicator::new();
    source.filter(move |value| future::ready(deduplicator.admit(value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    #[test]
    fn test_first_value_always_admitted() {
        let mut dedup = Deduplicator::new();
        assert!(dedup.admit(&"abc".to_string()));
        assert!(!dedup.admit(&"abc".to_string()));
    }

    #[test]
    fn test_immediate_repeat_suppressed() {
        let mut dedup = Deduplicator::new();
        assert!(dedup.admit(&"abc"));
        assert!(!dedup.admit(&"abc"));
        assert!(!dedup.admit(&"abc"));
        assert!(dedup.admit(&"abd"));
        assert!(dedup.admit(&"abc"));
    }

    #[test]
    fn test_empty_string_is_a_value() {
        let mut dedup = Deduplicator::new();
        assert!(dedup.admit(&""));
        assert!(!dedup.admit(&""));
        assert!(dedup.admit(&"x"));
    }

    #[tokio::test]
    async fn test_dedupe_stream() {
        let values: Vec<_> = dedupe(stream::iter(vec!["a", "a", "b", "b", "b", "a", "c", "c"]))
            .collect()
            .await;
        assert_eq!(values, vec!["a", "b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_dedupe_stream_single_and_empty() {
        let values: Vec<u32> = dedupe(stream::iter(vec![7, 7, 7])).collect().await;
        assert_eq!(values, vec![7]);

        let values: Vec<u32> = dedupe(stream::iter(Vec::<u32>::new())).collect().await;
        assert!(values.is_empty());
    }
}
