//! Common utilities for integration tests

pub mod mock_steps;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_steps::{BlowUp, Frozen, NanAfter};
pub use test_helpers::{
    assert_bounded,
    exact_sine,
    front_width,
    line,
    periodic_config,
};
