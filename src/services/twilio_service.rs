//! services/twilio_service.rs
//! Cliente del API REST de Twilio para envío de SMS.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    config::sms_config::TwilioConfig,
    models::sms_model::{GatewayReceipt, OutboundSms},
};

/// Gateway de SMS. Cada llamada recibe las credenciales vigentes.
#[async_trait]
pub trait SmsGateway: Send + Sync {
    async fn send_sms(&self, config: &TwilioConfig, sms: &OutboundSms) -> Result<GatewayReceipt>;
}

/// Cuerpo de error que devuelve Twilio (`{"code":21211,"message":"...","status":400}`)
#[derive(Debug, Deserialize)]
struct TwilioErrorBody {
    code: Option<i64>,
    message: String,
}

/// Cliente ligado a unas credenciales. Se crea uno por invocación.
pub struct TwilioClient<'a> {
    http_client: &'a Client,
    config: &'a TwilioConfig,
}

impl<'a> TwilioClient<'a> {
    pub fn new(http_client: &'a Client, config: &'a TwilioConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.account_sid
        )
    }

    pub async fn create_message(&self, sms: &OutboundSms) -> Result<GatewayReceipt> {
        let url = self.messages_url();
        log::info!("(create_message) POST {} to={}", url, sms.to);

        let params = [
            ("To", sms.to.as_str()),
            ("From", sms.from.as_str()),
            ("Body", sms.body.as_str()),
        ];

        let resp = self
            .http_client
            .post(&url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await
            .context("Fallo al hacer POST a Twilio")?;

        let status = resp.status();
        let body_txt = resp
            .text()
            .await
            .context("No se pudo leer la respuesta de Twilio")?;

        if !status.is_success() {
            log::error!("(create_message) Twilio respondió {}: {}", status, body_txt);
            return Err(match serde_json::from_str::<TwilioErrorBody>(&body_txt) {
                Ok(err) => {
                    log::error!("(create_message) Código de error Twilio: {:?}", err.code);
                    anyhow!(err.message)
                }
                Err(_) => anyhow!("Twilio respondió {}: {}", status, body_txt),
            });
        }

        serde_json::from_str::<GatewayReceipt>(&body_txt)
            .context("Respuesta de Twilio sin 'sid' o 'status'")
    }
}

#[derive(Clone)]
pub struct TwilioGateway {
    http_client: Client,
}

impl TwilioGateway {
    pub fn new(http_client: Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl SmsGateway for TwilioGateway {
    async fn send_sms(&self, config: &TwilioConfig, sms: &OutboundSms) -> Result<GatewayReceipt> {
        TwilioClient::new(&self.http_client, config)
            .create_message(sms)
            .await
    }
}
