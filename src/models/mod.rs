//! models/mod.rs
//! Módulo raíz para modelos/estructuras compartidas.

pub mod alert_model;
pub mod auth_model;
pub mod sms_model;
