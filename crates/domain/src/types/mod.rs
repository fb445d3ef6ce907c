//! Backend data transfer types
//!
//! Mirrors the JSON shapes served by the gym-review REST API. Field names are
//! camelCase on the wire.

pub mod gym;
pub mod page;
pub mod photo;
pub mod review;
pub mod user;

pub use gym::{
    Address, GeoPoint, Gym, GymSearchQuery, GymSummary, GymUpsertRequest, OperatingHours,
    TimeRange,
};
pub use page::PageResponse;
pub use photo::Photo;
pub use review::{Review, ReviewQuery, ReviewSortField, ReviewUpsertRequest, SortDirection};
pub use user::User;
