use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::prelude::*;

use clientdesk_api::auth::AuthService;
use clientdesk_api::config::ApiConfig;
use clientdesk_api::handlers;
use clientdesk_api::helpers;
use clientdesk_api::store::{Collection, RecordStore};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long)]
    log_file_path: Option<String>,

    /// Config file to use instead of the platform default
    #[arg(long)]
    config: Option<String>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = args.log_file_path {
        let log_path = std::path::Path::new(&log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("clientdesk-api.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard);

        tracing_subscriber::registry()
            .with(env_filter.clone())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stdout),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = match args.config {
        Some(path) => ApiConfig::load_from(std::path::Path::new(&path)),
        None => ApiConfig::load().map(|(config, _)| config),
    }
    .map_err(|e| std::io::Error::other(format!("Failed to load config: {e}")))?;

    let db = helpers::database::initialize_database(&config)
        .map_err(|e| std::io::Error::other(format!("Failed to initialize database: {e}")))?;

    let store = Arc::new(RecordStore::new(db.async_connection.clone()));
    let auth = Arc::new(AuthService::new(
        db.async_connection.clone(),
        config.session_ttl(),
    ));

    // Keep a running tally in the log; the subscription lives for the whole process
    let _project_log = store
        .subscribe(Collection::Projects, |snapshot| {
            tracing::debug!("Projects snapshot published ({} records)", snapshot.len());
        })
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let _auth_log = auth.on_auth_change(|user| match user {
        Some(user) => tracing::info!("Signed in: {}", user.email),
        None => tracing::info!("A session was signed out"),
    });

    let server_config = config.server();
    let (host, port) = (server_config.host, server_config.port);
    tracing::info!("Server will listen on {}:{}", host, port);

    let cors_config = config.cors.clone();
    let server = HttpServer::new(move || {
        let cors = if let Some(cors_config) = &cors_config {
            let mut cors_builder = Cors::default();
            for origin in &cors_config.allowed_origins {
                cors_builder = cors_builder.allowed_origin(origin);
            }
            cors_builder
                .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                .allowed_headers(vec!["Authorization", "Accept", "Content-Type"])
                .max_age(3600)
        } else {
            Cors::default()
                .allow_any_origin()
                .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                .allowed_headers(vec!["Authorization", "Accept", "Content-Type"])
                .max_age(3600)
        };

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(db.clone()))
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(auth.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((host.as_str(), port))?
    .run();

    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }

        tracing::info!("Ctrl+C received, shutting down...");
        handle.stop(true).await;
    });

    server.await
}
