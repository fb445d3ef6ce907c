//! Photo types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Uploaded photo reference
///
/// `url` is the photo identifier; the displayable address is
/// `<api>/photos/<url>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_date: Option<NaiveDateTime>,
}
