use serde::{Deserialize, Serialize};

/// One repository hit. Fields other than these two are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub name: String,
    pub full_name: String,
}

/// Body of a successful `/search/repositories` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub total_count: u64,
    pub incomplete_results: bool,
    pub items: Vec<SearchResultItem>,
}

impl SearchResult {
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(body)
    }

    /// `full_name`s in server order
    pub fn full_names(&self) -> Vec<String> {
        self.items.iter().map(|item| item.full_name.clone()).collect()
    }
}
