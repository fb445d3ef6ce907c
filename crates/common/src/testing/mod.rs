//! Testing utilities and helpers
//!
//! Mock implementations of the seams the auth core depends on:
//! - **[`MockClock`]**: hand-driven wall clock for expiry tests
//! - **[`RecordingNavigator`]**: records full-page navigations and route pushes
//! - **[`MockTokenExchanger`]**: scripted token endpoint with a call counter
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Duration;
//!
//! use gymreview_common::testing::MockClock;
//! use gymreview_common::time::Clock;
//!
//! let clock = MockClock::new(1_000);
//! clock.advance(Duration::from_secs(5));
//! assert_eq!(clock.now_millis(), 6_000);
//! ```

pub mod mocks;

pub use mocks::{MockClock, MockTokenExchanger, RecordingNavigator};
