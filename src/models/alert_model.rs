use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRecord {
    pub id: String,
    pub title: Option<String>,
    /// contact_id -> true (entregado) / false (fallido). Ausente = sin intento.
    pub contact_receipts: BTreeMap<String, bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request para registrar una alerta
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAlertRequest {
    pub id: Option<String>,
    pub title: Option<String>,
}
