//! Paging envelope

use serde::{Deserialize, Serialize};

/// Spring-style page of results
///
/// `number` is the zero-based index of this page as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub total_pages: u32,
    pub total_elements: u64,
    pub size: u32,
    pub number: u32,
    pub number_of_elements: u32,
    pub first: bool,
    pub last: bool,
}

impl<T> PageResponse<T> {
    /// Keep only the entries matching `keep`, adjusting the element count
    #[must_use]
    pub fn retain(mut self, keep: impl FnMut(&T) -> bool) -> Self {
        self.content.retain(keep);
        self.number_of_elements = u32::try_from(self.content.len()).unwrap_or(u32::MAX);
        self
    }

    /// Whether a further page exists after this one
    #[must_use]
    pub const fn has_next(&self) -> bool {
        !self.last
    }
}
