//! services/mod.rs
//! Módulo que agrupa distintos "servicios" o "capas de negocio" de la app.

pub mod alert_service;
pub mod auth_service;
pub mod sms_dispatch_service;
pub mod twilio_service;
