//! config/mod.rs
pub mod sms_config;
