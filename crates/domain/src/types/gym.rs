//! Gym types

use serde::{Deserialize, Serialize};

use super::photo::Photo;
use super::review::Review;
use super::user::User;
use crate::constants::GYM_PAGE_SIZE;

/// Opening and closing time for one weekday, both `HH:mm`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub open_time: String,
    pub close_time: String,
}

/// Weekly opening hours; a missing day means closed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingHours {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monday: Option<TimeRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuesday: Option<TimeRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wednesday: Option<TimeRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thursday: Option<TimeRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friday: Option<TimeRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturday: Option<TimeRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunday: Option<TimeRange>,
}

/// Postal address of a gym
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street_number: String,
    pub street_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

/// Geographic coordinates; the backend names them `lat`/`lon`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Gym as listed in search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GymSummary {
    pub id: String,
    pub name: String,
    pub gym_type: String,
    pub average_rating: Option<f32>,
    pub total_reviews: Option<u32>,
    pub address: Option<Address>,
    #[serde(default)]
    pub photos: Vec<Photo>,
}

/// Full gym detail
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gym {
    pub id: Option<String>,
    pub name: Option<String>,
    pub gym_type: Option<String>,
    pub contact_information: Option<String>,
    pub average_rating: Option<f32>,
    pub total_reviews: Option<u32>,
    pub geo_location: Option<GeoPoint>,
    pub address: Option<Address>,
    #[serde(default)]
    pub operating_hours: Option<OperatingHours>,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    pub created_by: Option<User>,
}

/// Body for creating or replacing a gym
///
/// The backend requires at least one photo id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GymUpsertRequest {
    pub name: String,
    pub gym_type: String,
    pub contact_information: String,
    pub address: Address,
    pub operating_hours: OperatingHours,
    pub photo_ids: Vec<String>,
}

/// Filters for the gym search endpoint
///
/// `page` is one-based, as the search endpoint expects.
#[derive(Debug, Clone, PartialEq)]
pub struct GymSearchQuery {
    pub query: Option<String>,
    pub min_rating: Option<f32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius: Option<f64>,
    pub page: u32,
    pub size: u32,
}

impl Default for GymSearchQuery {
    fn default() -> Self {
        Self {
            query: None,
            min_rating: None,
            latitude: None,
            longitude: None,
            radius: None,
            page: 1,
            size: GYM_PAGE_SIZE,
        }
    }
}

impl GymSearchQuery {
    /// Search around a point
    #[must_use]
    pub fn near(latitude: f64, longitude: f64, radius: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            radius: Some(radius),
            ..Self::default()
        }
    }

    /// Query-string pairs in the order the backend documents them
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(query) = self.query.as_deref().filter(|q| !q.is_empty()) {
            pairs.push(("query", query.to_string()));
        }
        if let Some(min_rating) = self.min_rating {
            pairs.push(("minRating", min_rating.to_string()));
        }
        if let Some(latitude) = self.latitude {
            pairs.push(("latitude", latitude.to_string()));
        }
        if let Some(longitude) = self.longitude {
            pairs.push(("longitude", longitude.to_string()));
        }
        if let Some(radius) = self.radius {
            pairs.push(("radius", radius.to_string()));
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("size", self.size.to_string()));
        pairs
    }
}
