//! config/sms_config.rs
//! Credenciales de Twilio. Se leen en cada invocación, no al arrancar.

use std::env;

pub const DEFAULT_TWILIO_API_BASE_URL: &str = "https://api.twilio.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    /// Número remitente (`From`)
    pub from_number: String,
    pub api_base_url: String,
}

impl TwilioConfig {
    /// Arma la config a partir de una función de búsqueda de variables.
    /// Devuelve `None` si falta o está vacía cualquiera de las tres credenciales.
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Some(TwilioConfig {
            account_sid: required("TWILIO_ACCOUNT_SID")?,
            auth_token: required("TWILIO_AUTH_TOKEN")?,
            from_number: required("TWILIO_PHONE_NUMBER")?,
            api_base_url: required("TWILIO_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_TWILIO_API_BASE_URL.to_string()),
        })
    }
}

/// Fuente de configuración del gateway.
pub trait SmsConfigSource: Send + Sync {
    fn twilio_config(&self) -> Option<TwilioConfig>;
}

/// Lee las variables de entorno del proceso (incluye lo cargado desde `.env`).
#[derive(Debug, Clone, Default)]
pub struct EnvSmsConfig;

impl SmsConfigSource for EnvSmsConfig {
    fn twilio_config(&self) -> Option<TwilioConfig> {
        TwilioConfig::from_lookup(|key| env::var(key).ok())
    }
}

/// Config fija para tests.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct StaticSmsConfig(pub Option<TwilioConfig>);

#[cfg(test)]
impl SmsConfigSource for StaticSmsConfig {
    fn twilio_config(&self) -> Option<TwilioConfig> {
        self.0.clone()
    }
}
