//! tests/support.rs
//! Dobles de prueba compartidos por los tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};

use crate::{
    config::sms_config::{StaticSmsConfig, TwilioConfig},
    models::sms_model::{GatewayReceipt, OutboundSms},
    services::{
        alert_service::{AlertService, ReceiptStore},
        sms_dispatch_service::SmsDispatchService,
        twilio_service::SmsGateway,
    },
};

pub const TEST_JWT_SECRET: &str = "test-secret";

pub fn twilio_config() -> TwilioConfig {
    TwilioConfig {
        account_sid: "AC123".to_string(),
        auth_token: "secret-token".to_string(),
        from_number: "+15550000000".to_string(),
        api_base_url: "http://127.0.0.1:9".to_string(),
    }
}

/// Gateway que registra cada envío y responde con un resultado fijo.
pub struct RecordingGateway {
    pub sent: Mutex<Vec<OutboundSms>>,
    outcome: std::result::Result<GatewayReceipt, String>,
}

impl RecordingGateway {
    pub fn succeeding(sid: &str, status: &str) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(vec![]),
            outcome: Ok(GatewayReceipt {
                sid: sid.to_string(),
                status: status.to_string(),
            }),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(vec![]),
            outcome: Err(message.to_string()),
        })
    }

    pub fn calls(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl SmsGateway for RecordingGateway {
    async fn send_sms(&self, _config: &TwilioConfig, sms: &OutboundSms) -> Result<GatewayReceipt> {
        self.sent.lock().unwrap().push(sms.clone());
        self.outcome.clone().map_err(|msg| anyhow!(msg))
    }
}

/// Store en memoria que registra las escrituras; puede forzarse a fallar.
#[derive(Default)]
pub struct RecordingStore {
    pub writes: Mutex<Vec<(String, String, bool)>>,
    pub fail: bool,
}

impl RecordingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn broken() -> Arc<Self> {
        Arc::new(Self {
            writes: Mutex::new(vec![]),
            fail: true,
        })
    }

    pub fn writes(&self) -> Vec<(String, String, bool)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReceiptStore for RecordingStore {
    async fn set_contact_receipt(
        &self,
        alert_id: &str,
        contact_id: &str,
        delivered: bool,
    ) -> Result<()> {
        self.writes
            .lock()
            .unwrap()
            .push((alert_id.to_string(), contact_id.to_string(), delivered));
        if self.fail {
            return Err(anyhow!("store no disponible"));
        }
        Ok(())
    }
}

pub fn dispatcher(
    config: Option<TwilioConfig>,
    gateway: Arc<RecordingGateway>,
    store: Arc<dyn ReceiptStore>,
) -> SmsDispatchService {
    SmsDispatchService::new(Arc::new(StaticSmsConfig(config)), gateway, store)
}

/// SQLite en memoria con las migraciones aplicadas.
pub async fn memory_alert_service() -> AlertService {
    let pool: Pool<Sqlite> = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect("sqlite::memory:")
        .await
        .expect("no se pudo abrir sqlite en memoria");
    let service = AlertService::new(pool);
    service
        .run_migrations()
        .await
        .expect("fallaron las migraciones");
    service
}

/// SQLite en un archivo temporal, con varias conexiones para probar escrituras concurrentes.
pub async fn file_alert_service(max_connections: u32) -> (AlertService, std::path::PathBuf) {
    let db_path = std::env::temp_dir().join(format!("alerts-{}.db", uuid::Uuid::new_v4()));
    let pool: Pool<Sqlite> = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(&format!("sqlite:{}?mode=rwc", db_path.to_string_lossy()))
        .await
        .expect("no se pudo abrir sqlite en archivo");
    let service = AlertService::new(pool);
    service
        .run_migrations()
        .await
        .expect("fallaron las migraciones");
    (service, db_path)
}
