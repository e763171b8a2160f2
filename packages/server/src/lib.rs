#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the candy map application.
//!
//! Loads an assessor dataset once at startup and serves street rankings
//! for the map frontend.

mod handlers;

use std::path::PathBuf;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use candy_map_property::PropertyRecord;
use candy_map_ranking::Ranker;

/// Default dataset path when `CANDY_MAP_DATA` is unset.
pub const DEFAULT_DATA_PATH: &str = "data/properties.json";

/// Shared application state.
pub struct AppState {
    /// Property records loaded at startup.
    pub records: Vec<PropertyRecord>,
    /// Ranker applied to each request's records.
    pub ranker: Ranker,
}

/// Server settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Dataset file (`CANDY_MAP_DATA`).
    pub data_path: PathBuf,
    /// Bind address (`BIND_ADDR`).
    pub bind_addr: String,
    /// Listen port (`PORT`).
    pub port: u16,
}

impl ServerConfig {
    /// Reads settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            data_path: lookup("CANDY_MAP_DATA")
                .map_or_else(|| PathBuf::from(DEFAULT_DATA_PATH), PathBuf::from),
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }
}

/// Registers the `/api` routes.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/neighborhoods", web::get().to(handlers::neighborhoods))
            .route("/top-streets", web::get().to(handlers::top_streets)),
    );
}

/// Starts the candy map API server.
///
/// This is a regular async function; the caller provides the runtime
/// (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the dataset cannot be loaded, or
/// if the HTTP server fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    log::info!("Loading dataset from {}...", config.data_path.display());
    let records =
        candy_map_property::load_records(&config.data_path).map_err(std::io::Error::other)?;

    let state = web::Data::new(AppState {
        records,
        ranker: Ranker::default(),
    });

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(routes)
    })
    .bind((config.bind_addr, config.port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use candy_map_property::parse_records;

    use super::*;

    fn state() -> web::Data<AppState> {
        let records = parse_records(
            r#"[
                {"property_location": "0000 0123 PINE ST 0000", "assessor_neighborhood": "Nob Hill",
                 "use_definition": "Single Family Residential", "number_of_units": 1,
                 "property_class_code_definition": "Dwelling"},
                {"property_location": "0000 0125 PINE ST 0000", "assessor_neighborhood": "Nob Hill",
                 "use_definition": "Single Family Residential", "number_of_units": 1,
                 "property_class_code_definition": "Dwelling"},
                {"property_location": "0000 0127 PINE ST 0000", "assessor_neighborhood": "Nob Hill",
                 "use_definition": "Single Family Residential", "number_of_units": 1,
                 "property_class_code_definition": "Dwelling"},
                {"property_location": "0000 0129 PINE ST 0000", "assessor_neighborhood": "Nob Hill",
                 "use_definition": "Commercial Store", "number_of_units": 1,
                 "property_class_code_definition": "Commercial"},
                {"property_location": "0000 0001 1ST AV 0000", "assessor_neighborhood": "Mission",
                 "use_definition": "Condominium", "number_of_units": 1,
                 "property_class_code_definition": "Condominium"}
            ]"#,
        )
        .unwrap();
        web::Data::new(AppState {
            records,
            ranker: Ranker::default(),
        })
    }

    #[actix_web::test]
    async fn health_reports_version() {
        let app = test::init_service(App::new().configure(routes)).await;
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["healthy"], true);
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[actix_web::test]
    async fn lists_neighborhoods() {
        let app = test::init_service(App::new().app_data(state()).configure(routes)).await;
        let req = test::TestRequest::get()
            .uri("/api/neighborhoods")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, serde_json::json!(["Mission", "Nob Hill"]));
    }

    #[actix_web::test]
    async fn ranks_residential_streets() {
        let app = test::init_service(App::new().app_data(state()).configure(routes)).await;
        let req = test::TestRequest::get()
            .uri("/api/top-streets?neighborhood=Nob%20Hill&count=10")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body,
            serde_json::json!([
                {"street": "PINE ST", "score": 62.0, "num_houses": 3, "num_units": 3}
            ])
        );
    }

    #[actix_web::test]
    async fn too_few_properties_yields_empty_list() {
        let app = test::init_service(App::new().app_data(state()).configure(routes)).await;
        let req = test::TestRequest::get()
            .uri("/api/top-streets?neighborhood=Mission")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, serde_json::json!([]));
    }

    #[actix_web::test]
    async fn missing_neighborhood_is_bad_request() {
        let app = test::init_service(App::new().app_data(state()).configure(routes)).await;
        let req = test::TestRequest::get()
            .uri("/api/top-streets?count=5")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            serde_json::json!({"error": "Missing parameter: neighborhood"})
        );
    }

    #[::core::prelude::v1::test]
    fn config_defaults() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.port, 8080);
    }

    #[::core::prelude::v1::test]
    fn config_reads_overrides() {
        let config = ServerConfig::from_lookup(|key| match key {
            "CANDY_MAP_DATA" => Some("/tmp/sf.json".to_string()),
            "BIND_ADDR" => Some("0.0.0.0".to_string()),
            "PORT" => Some("not-a-port".to_string()),
            _ => None,
        });
        assert_eq!(config.data_path, PathBuf::from("/tmp/sf.json"));
        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.port, 8080);
    }
}
