//! Shared setup for the command line tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use clap::Parser;
use jardine::cli::{Cli, run};
use jardine::config::Config;
use serde_json::{Value, json};
use temp_dir::TempDir;

pub const API_KEY: &str = "household-key";

/// Config with its own database file and remote sync turned off.
pub fn offline_config(dir: &TempDir, name: &str) -> Config {
    let mut config = Config::default();
    config.storage.database_url = format!("sqlite://{}", dir.child(name).display());

    config
}

pub fn online_config(dir: &TempDir, name: &str, base_url: &str) -> Config {
    let mut config = offline_config(dir, name);
    config.remote.enabled = true;
    config.remote.base_url = base_url.to_owned();
    config.remote.api_key = API_KEY.to_owned();

    config
}

/// Runs one `jardine` invocation and returns what it printed.
pub async fn jardine(config: &Config, args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("jardine").chain(args.iter().copied()))?;

    let mut out = Vec::new();
    run(config, cli.command, &mut out).await?;

    Ok(String::from_utf8(out)?)
}

/// In-memory stand-in for the backend functions.
#[derive(Clone, Default)]
pub struct Backend {
    pub snapshot: Arc<Mutex<Option<Value>>>,
    pub pushes: Arc<Mutex<usize>>,
    pub fail_aggregation: bool,
}

async fn get_state(State(backend): State<Backend>) -> (StatusCode, Json<Value>) {
    match backend.snapshot.lock().unwrap().clone() {
        Some(value) => (StatusCode::OK, Json(value)),
        None => (StatusCode::NOT_FOUND, Json(Value::Null)),
    }
}

async fn post_state(State(backend): State<Backend>, Json(body): Json<Value>) -> StatusCode {
    *backend.snapshot.lock().unwrap() = Some(body);
    *backend.pushes.lock().unwrap() += 1;

    StatusCode::OK
}

async fn import_recipe(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let url = body["url"].as_str().unwrap_or_default().to_owned();
    if url.contains("broken") {
        return (StatusCode::BAD_GATEWAY, Json(Value::Null));
    }

    let slug = url.rsplit('/').next().unwrap_or_default().replace('-', " ");

    (
        StatusCode::OK,
        Json(json!({
            "url": url,
            "title": slug,
            "ingredients": ["200 g spaghetti", "1 onion"],
            "instructions": ["Boil.", "Serve."],
        })),
    )
}

async fn aggregate(State(backend): State<Backend>) -> (StatusCode, Json<Value>) {
    if backend.fail_aggregation {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(Value::Null));
    }

    (
        StatusCode::OK,
        Json(json!([{"name": "spaghetti", "quantity": 400, "unit": "g"}])),
    )
}

/// Serves `backend` on a random local port, returns the base url.
pub async fn serve(backend: Backend) -> anyhow::Result<String> {
    let app = Router::new()
        .route("/state", get(get_state).post(post_state))
        .route("/import-recipe", post(import_recipe))
        .route("/aggregate-ingredients", post(aggregate))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(format!("http://{addr}"))
}
