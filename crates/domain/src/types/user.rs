//! User types

use serde::{Deserialize, Serialize};

/// Author of a gym or review, as embedded by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
}
