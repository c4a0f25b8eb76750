//! services/sms_dispatch_service.rs
//! Envío de un SMS y registro del acuse en la alerta.

use std::sync::Arc;

use crate::{
    config::sms_config::SmsConfigSource,
    errors::DispatchError,
    models::{
        auth_model::RequestContext,
        sms_model::{non_empty, OutboundSms, SendSmsRequest, SendSmsResult},
    },
    services::{alert_service::ReceiptStore, twilio_service::SmsGateway},
};

#[derive(Clone)]
pub struct SmsDispatchService {
    config: Arc<dyn SmsConfigSource>,
    gateway: Arc<dyn SmsGateway>,
    receipts: Arc<dyn ReceiptStore>,
}

impl SmsDispatchService {
    pub fn new(
        config: Arc<dyn SmsConfigSource>,
        gateway: Arc<dyn SmsGateway>,
        receipts: Arc<dyn ReceiptStore>,
    ) -> Self {
        Self {
            config,
            gateway,
            receipts,
        }
    }

    pub async fn dispatch(
        &self,
        ctx: &RequestContext,
        req: SendSmsRequest,
    ) -> Result<SendSmsResult, DispatchError> {
        // 1) Autenticación
        let Some(caller) = ctx.auth.as_ref() else {
            return Err(DispatchError::Unauthenticated(
                "Usuario no autenticado".to_string(),
            ));
        };

        // 2) Campos requeridos
        let (Some(phone), Some(message)) = (non_empty(&req.phone), non_empty(&req.message))
        else {
            return Err(DispatchError::InvalidArgument(
                "Teléfono y mensaje son requeridos".to_string(),
            ));
        };

        // 3) Config de Twilio, leída en cada llamada
        let Some(twilio) = self.config.twilio_config() else {
            log::warn!("(dispatch) Configuración de Twilio incompleta");
            return Err(DispatchError::FailedPrecondition(
                "Configuración de Twilio no encontrada. Configura las variables de entorno."
                    .to_string(),
            ));
        };

        log::info!("(dispatch) uid={} enviando SMS a {}", caller.uid, phone);

        // 4) Envío
        let sms = OutboundSms {
            from: twilio.from_number.clone(),
            to: phone.to_string(),
            body: message.to_string(),
        };

        match self.gateway.send_sms(&twilio, &sms).await {
            Ok(receipt) => {
                // 5) Acuse positivo
                self.record_receipt(&req, true).await;
                log::info!(
                    "(dispatch) SMS enviado exitosamente a {}. SID: {}",
                    phone,
                    receipt.sid
                );
                Ok(SendSmsResult {
                    success: true,
                    sid: receipt.sid,
                    status: receipt.status,
                })
            }
            Err(e) => {
                log::error!("(dispatch) Error enviando SMS: {:#}", e);
                // 6) Acuse negativo, sin tapar el error original
                self.record_receipt(&req, false).await;
                Err(DispatchError::Internal(format!("Error enviando SMS: {:#}", e)))
            }
        }
    }

    /// Escritura best-effort: los errores se registran y se descartan.
    async fn record_receipt(&self, req: &SendSmsRequest, delivered: bool) {
        let Some((alert_id, contact_id)) = req.receipt_target() else {
            return;
        };

        if let Err(e) = self
            .receipts
            .set_contact_receipt(alert_id, contact_id, delivered)
            .await
        {
            log::error!(
                "(record_receipt) Error actualizando estado de recepción alert={} contact={}: {:#}",
                alert_id,
                contact_id,
                e
            );
        }
    }
}
