use actix_web::{web, HttpRequest, HttpResponse};

use crate::{
    errors::DispatchError,
    models::sms_model::{CallableResponse, SendSmsRequest},
    services::{auth_service::AuthService, sms_dispatch_service::SmsDispatchService},
};

/// POST /api/sms/send
///
/// Body: `{"data": {"phone", "message", "alertId"?, "contactId"?}}`
pub async fn send_sms_endpoint(
    req: HttpRequest,
    body: web::Bytes,
    auth_service: web::Data<AuthService>,
    dispatch_service: web::Data<SmsDispatchService>,
) -> Result<HttpResponse, DispatchError> {
    let ctx = auth_service.context_from_request(&req);

    // Un body ilegible se trata como datos vacíos: el dispatcher valida
    // autenticación antes que campos, así el orden de errores se mantiene.
    let data = match serde_json::from_slice::<serde_json::Value>(&body) {
        Ok(envelope) => SendSmsRequest::from_callable_body(&envelope),
        Err(e) => {
            log::warn!("(send_sms_endpoint) Body inválido: {}", e);
            SendSmsRequest::default()
        }
    };

    let result = dispatch_service.dispatch(&ctx, data).await?;
    Ok(HttpResponse::Ok().json(CallableResponse { result }))
}
