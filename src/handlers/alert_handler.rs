//! handlers/alert_handler.rs
use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::models::alert_model::CreateAlertRequest;
use crate::services::{alert_service::AlertService, auth_service::AuthService};

fn unauthenticated() -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({
        "success": false,
        "error": "Usuario no autenticado"
    }))
}

/// POST /api/alerts
pub async fn create_alert_endpoint(
    req: HttpRequest,
    auth_service: web::Data<AuthService>,
    alert_service: web::Data<AlertService>,
    body: web::Json<CreateAlertRequest>,
) -> HttpResponse {
    if auth_service.context_from_request(&req).auth.is_none() {
        return unauthenticated();
    }

    match alert_service.create_alert(body.into_inner()).await {
        Ok(alert) => HttpResponse::Ok().json(alert),
        Err(e) if e.to_string().contains("already exists") => {
            HttpResponse::Conflict().json(json!({
                "success": false,
                "error": e.to_string()
            }))
        }
        Err(e) => {
            log::error!("(create_alert_endpoint) {:?}", e);
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "error": format!("{:#}", e)
            }))
        }
    }
}

/// GET /api/alerts/{alert_id}
pub async fn get_alert_endpoint(
    req: HttpRequest,
    auth_service: web::Data<AuthService>,
    alert_service: web::Data<AlertService>,
    path: web::Path<String>,
) -> HttpResponse {
    if auth_service.context_from_request(&req).auth.is_none() {
        return unauthenticated();
    }

    let alert_id = path.into_inner();
    match alert_service.get_alert(&alert_id).await {
        Ok(alert) => HttpResponse::Ok().json(alert),
        Err(e) => {
            let status_code = if e.to_string().contains("not found") {
                actix_web::http::StatusCode::NOT_FOUND
            } else {
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
            };

            HttpResponse::build(status_code).json(json!({
                "success": false,
                "error": e.to_string()
            }))
        }
    }
}
