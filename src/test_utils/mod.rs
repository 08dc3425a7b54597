//! Test utilities for use case and HTTP-level testing.
//!
//! This module provides:
//! - Test data factories for creating valid test fixtures
//! - In-memory repository and billing provider implementations
//! - A builder for constructing `AppState` with test dependencies
//! - An ERROR event counter for checking where failures get logged

mod app_state_builder;
mod billing_mocks;
mod factories;
mod log_capture;

pub use app_state_builder::*;
pub use billing_mocks::*;
pub use factories::*;
pub use log_capture::*;
