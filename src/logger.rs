//! logger.rs
//! Logger de la app sobre env_logger.

use env_logger::Builder;

const DEFAULT_FILTER: &str = "info";

/// Builder con los filtros dados (sintaxis de `RUST_LOG`) y timestamps en ms.
pub fn build_logger(filters: &str) -> Builder {
    let mut builder = Builder::new();
    builder
        .parse_filters(filters)
        .format_timestamp_millis()
        .format_module_path(false);
    builder
}

pub fn init_logger() {
    let filters = std::env::var("RUST_LOG")
        .ok()
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string());

    if build_logger(&filters).try_init().is_err() {
        log::warn!("El logger ya estaba inicializado");
    }
}
