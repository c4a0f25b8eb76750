//! app.rs
use crate::handlers::{alert_handler, sms_handler};
use actix_web::web;

pub fn init_app(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(
                web::scope("/sms").route("/send", web::post().to(sms_handler::send_sms_endpoint)),
            )
            .service(
                web::scope("/alerts")
                    .route("", web::post().to(alert_handler::create_alert_endpoint))
                    .route(
                        "/{alert_id}",
                        web::get().to(alert_handler::get_alert_endpoint),
                    ),
            ),
    );
}
