//! Configuration wrapper integration tests
//!
//! Tests are organized by concern: construction and conversion, mapping
//! operations, sequence operations, final-segment search, required-key
//! policies, and the file-format adapters.

mod builder_tests;
mod helpers;
mod map_tests;
mod search_tests;
