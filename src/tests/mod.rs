//! tests/mod.rs
mod alert_tests;
mod support;
