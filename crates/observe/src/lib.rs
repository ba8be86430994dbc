//! Initialization logic for logging that is shared between the deploy binary
//! and the test suites.
pub mod tracing;
