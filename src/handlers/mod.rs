//! handlers/mod.rs
//! Módulo que agrupa los distintos handlers (SMS, alertas).
pub mod alert_handler;
pub mod sms_handler;
