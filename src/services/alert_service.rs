use std::collections::BTreeMap;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Row, Sqlite};
use uuid::Uuid;

use crate::models::alert_model::{AlertRecord, CreateAlertRequest};

/// Destino de los acuses de recepción por contacto.
#[async_trait]
pub trait ReceiptStore: Send + Sync {
    /// Fija `contactReceipts[contact_id] = delivered` y refresca `updated_at`.
    /// No toca otros contactos ni otros campos de la alerta.
    async fn set_contact_receipt(
        &self,
        alert_id: &str,
        contact_id: &str,
        delivered: bool,
    ) -> Result<()>;
}

#[derive(Clone, Debug)]
pub struct AlertService {
    db_pool: Pool<Sqlite>,
}

impl AlertService {
    pub fn new(db_pool: Pool<Sqlite>) -> Self {
        AlertService { db_pool }
    }

    /// Corre migraciones con sqlx
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.db_pool)
            .await
            .context("Failed to run alert migrations")?;
        Ok(())
    }

    pub async fn create_alert(&self, req: CreateAlertRequest) -> Result<AlertRecord> {
        let id = req
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let now = Utc::now();
        let now_txt = now.to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO alerts (id, title, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?3)
            "#,
        )
        .bind(&id)
        .bind(&req.title)
        .bind(&now_txt)
        .execute(&self.db_pool)
        .await
        .map_err(|e| {
            let duplicate = matches!(
                &e,
                sqlx::Error::Database(db_err) if db_err.is_unique_violation()
            );
            if duplicate {
                anyhow!("Alert {} already exists", id)
            } else {
                anyhow::Error::new(e).context("Fallo al insertar alerta")
            }
        })?;

        Ok(AlertRecord {
            id,
            title: req.title,
            contact_receipts: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Obtiene la alerta con todos sus acuses
    pub async fn get_alert(&self, alert_id: &str) -> Result<AlertRecord> {
        let row = sqlx::query(
            r#"
            SELECT id, title, created_at, updated_at
            FROM alerts
            WHERE id = ?1
            "#,
        )
        .bind(alert_id)
        .fetch_optional(&self.db_pool)
        .await
        .context("Fallo al consultar alerta")?
        .ok_or_else(|| anyhow!("Alert {} not found", alert_id))?;

        let receipts = sqlx::query(
            r#"
            SELECT contact_id, delivered
            FROM alert_contact_receipts
            WHERE alert_id = ?1
            "#,
        )
        .bind(alert_id)
        .fetch_all(&self.db_pool)
        .await
        .context("Fallo al consultar acuses de la alerta")?;

        let mut contact_receipts = BTreeMap::new();
        for r in receipts {
            let contact_id: String = r.try_get("contact_id")?;
            let delivered: i64 = r.try_get("delivered")?;
            contact_receipts.insert(contact_id, delivered != 0);
        }

        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;

        Ok(AlertRecord {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            contact_receipts,
            created_at: created_at.parse::<DateTime<Utc>>()?,
            updated_at: updated_at.parse::<DateTime<Utc>>()?,
        })
    }
}

#[async_trait]
impl ReceiptStore for AlertService {
    async fn set_contact_receipt(
        &self,
        alert_id: &str,
        contact_id: &str,
        delivered: bool,
    ) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let mut tx = self
            .db_pool
            .begin()
            .await
            .context("No se pudo abrir transacción")?;

        // Igual que un `update` de documento: la alerta debe existir.
        let touched = sqlx::query(r#"UPDATE alerts SET updated_at = ?1 WHERE id = ?2"#)
            .bind(&now)
            .bind(alert_id)
            .execute(&mut *tx)
            .await
            .context("Fallo al actualizar updated_at de la alerta")?;

        if touched.rows_affected() == 0 {
            tx.rollback().await.ok();
            return Err(anyhow!("Alert {} not found", alert_id));
        }

        sqlx::query(
            r#"
            INSERT INTO alert_contact_receipts (alert_id, contact_id, delivered, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (alert_id, contact_id)
            DO UPDATE SET delivered = excluded.delivered, updated_at = excluded.updated_at
            "#,
        )
        .bind(alert_id)
        .bind(contact_id)
        .bind(delivered as i64)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .context("Fallo al guardar acuse de contacto")?;

        tx.commit().await.context("Fallo al confirmar acuse")?;
        Ok(())
    }
}
