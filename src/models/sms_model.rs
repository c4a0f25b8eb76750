//! models/sms_model.rs
//! Estructuras del callable de envío de SMS.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Respuesta del callable: `{"result": {...}}`
#[derive(Debug, Clone, Serialize)]
pub struct CallableResponse<T> {
    pub result: T,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendSmsRequest {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub alert_id: Option<String>,
    #[serde(default)]
    pub contact_id: Option<String>,
}

impl SendSmsRequest {
    /// Extrae los campos del sobre callable `{"data": {...}}` uno por uno:
    /// un campo con tipo inesperado queda ausente sin invalidar a los demás.
    pub fn from_callable_body(body: &Value) -> Self {
        let Some(data) = body.get("data") else {
            return Self::default();
        };

        Self {
            phone: field_as_string(data, "phone"),
            message: field_as_string(data, "message"),
            alert_id: field_as_string(data, "alertId"),
            contact_id: field_as_string(data, "contactId"),
        }
    }

    /// Devuelve `(alert_id, contact_id)` sólo si ambos vienen informados.
    pub fn receipt_target(&self) -> Option<(&str, &str)> {
        match (non_empty(&self.alert_id), non_empty(&self.contact_id)) {
            (Some(alert_id), Some(contact_id)) => Some((alert_id, contact_id)),
            _ => None,
        }
    }
}

/// Texto tal cual; los números se pasan a texto. Otros tipos cuentan como ausentes.
fn field_as_string(data: &Value, key: &str) -> Option<String> {
    match data.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Un campo opcional cuenta como ausente si viene vacío.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendSmsResult {
    pub success: bool,
    pub sid: String,
    pub status: String,
}

/// Mensaje saliente tal como se entrega al gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundSms {
    pub from: String,
    pub to: String,
    pub body: String,
}

/// Lo que devuelve el proveedor al aceptar el mensaje.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GatewayReceipt {
    pub sid: String,
    pub status: String,
}
