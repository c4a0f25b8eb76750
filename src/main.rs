use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use sqlx::{Pool, Sqlite};

use crate::config::sms_config::EnvSmsConfig;
use crate::logger::init_logger;
use crate::services::alert_service::AlertService;
use crate::services::auth_service::AuthService;
use crate::services::sms_dispatch_service::SmsDispatchService;
use crate::services::twilio_service::TwilioGateway;

mod app;
mod config;
mod errors;
mod handlers;
mod logger;
mod models;
mod services;
#[cfg(test)]
mod tests;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5022";

async fn setup_database() -> anyhow::Result<Pool<Sqlite>> {
    let db_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            // Ruta por defecto: ./data/alerts.db
            std::fs::create_dir_all("data")?;
            let db_path = std::env::current_dir()?.join("data").join("alerts.db");
            format!("sqlite:{}?mode=rwc", db_path.to_string_lossy())
        }
    };

    log::info!("Conectando a SQLite en {}", db_url);
    let db_pool = Pool::<Sqlite>::connect(&db_url).await?;
    Ok(db_pool)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok(); // Cargar .env al inicio
    init_logger();

    let db_pool = setup_database()
        .await
        .map_err(|e| std::io::Error::other(format!("No se pudo abrir la base de datos: {e:#}")))?;

    let alert_service = AlertService::new(db_pool.clone());
    alert_service
        .run_migrations()
        .await
        .map_err(|e| std::io::Error::other(format!("Fallo en migraciones: {e:#}")))?;

    let auth_service = AuthService::from_env();

    let dispatch_service = SmsDispatchService::new(
        Arc::new(EnvSmsConfig),
        Arc::new(TwilioGateway::new(reqwest::Client::new())),
        Arc::new(alert_service.clone()),
    );

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    log::info!("Levantando servidor en {}", bind_addr);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(alert_service.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(dispatch_service.clone()))
            .configure(app::init_app)
    })
    .bind(bind_addr)?
    .run()
    .await
}
