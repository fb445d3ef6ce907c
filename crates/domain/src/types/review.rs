//! Review types

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::photo::Photo;
use super::user::User;
use crate::constants::REVIEW_PAGE_SIZE;

/// A review as returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Option<String>,
    pub content: Option<String>,
    pub rating: Option<u8>,
    pub date_posted: Option<NaiveDateTime>,
    pub last_edited: Option<NaiveDateTime>,
    #[serde(default)]
    pub photos: Vec<Photo>,
    pub written_by: Option<User>,
}

/// Body for creating or replacing a review; `rating` is 1-5
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewUpsertRequest {
    pub content: String,
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photo_ids: Vec<String>,
}

/// Field the review list can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewSortField {
    #[default]
    DatePosted,
    Rating,
}

impl ReviewSortField {
    /// Property name understood by the backend
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DatePosted => "datePosted",
            Self::Rating => "rating",
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Paging and ordering for a gym's review list
///
/// `page` is zero-based, as the review endpoint expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewQuery {
    pub page: u32,
    pub size: u32,
    pub sort_by: ReviewSortField,
    pub direction: SortDirection,
}

impl Default for ReviewQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: REVIEW_PAGE_SIZE,
            sort_by: ReviewSortField::default(),
            direction: SortDirection::default(),
        }
    }
}

impl ReviewQuery {
    /// The `sort` parameter value, e.g. `rating,desc`
    #[must_use]
    pub fn sort_param(&self) -> String {
        format!("{},{}", self.sort_by.as_str(), self.direction.as_str())
    }

    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
            ("sort", self.sort_param()),
        ]
    }
}

impl fmt::Display for ReviewSortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
