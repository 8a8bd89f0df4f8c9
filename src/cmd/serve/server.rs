// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::Form;
use axum::Json;
use axum::Router;
use axum::extract::Query;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use contagem_core::error::Fallible;
use contagem_core::instance::ClientInstance;
use contagem_core::instance::generate;
use contagem_core::instance::grade;
use serde::Deserialize;
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::signal;

use crate::cmd::serve::template::answer_page;
use crate::cmd::serve::template::quiz_page;
use crate::utils::CACHE_CONTROL_IMMUTABLE;
use crate::utils::clock_seed;

/// Activity title, shown on the practice page and in payload metadata.
pub const TITULO: &str = "Contagem de bits";

pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

pub async fn start_server(config: ServerConfig) -> Fallible<()> {
    let app = Router::new();
    let app = app.route("/", get(get_handler));
    let app = app.route("/", post(post_handler));
    let app = app.route("/api/instance", get(instance_handler));
    let app = app.route("/api/answer", post(answer_handler));
    let app = app.route("/style.css", get(style_handler));
    let app = app.fallback(not_found_handler);
    let bind = format!("{}:{}", config.host, config.port);

    // Start the server with graceful shutdown on Ctrl+C.
    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[derive(Deserialize)]
struct InstanceParams {
    /// Optional seed for deterministic replay; wraps to 32 bits.
    seed: Option<i64>,
}

#[derive(Serialize)]
struct Meta {
    titulo: &'static str,
}

#[derive(Serialize)]
struct InstanceResponse {
    meta: Meta,
    instance: ClientInstance,
}

async fn instance_handler(Query(params): Query<InstanceParams>) -> Response {
    let seed: u32 = match params.seed {
        Some(seed) => seed as u32,
        None => clock_seed(),
    };
    match generate(seed) {
        Ok(instance) => Json(InstanceResponse {
            meta: Meta { titulo: TITULO },
            // The client payload never carries the correctness flags.
            instance: instance.redact(),
        })
        .into_response(),
        Err(e) => {
            log::error!("Instance generation failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

#[derive(Deserialize)]
struct AnswerBody {
    seed: i64,
    id: String,
}

#[derive(Serialize)]
struct Verdict {
    correct: bool,
}

async fn answer_handler(Json(body): Json<AnswerBody>) -> Response {
    // Grading re-derives the instance from the seed; the client's view of
    // which alternative is correct is never consulted.
    let instance = match generate(body.seed as u32) {
        Ok(instance) => instance,
        Err(e) => {
            log::error!("Instance generation failed: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
        }
    };
    match instance.alternatives.iter().find(|alt| alt.id == body.id) {
        Some(alt) => Json(Verdict {
            correct: alt.correct,
        })
        .into_response(),
        None => (
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("unknown alternative id: '{}'.", body.id),
        )
            .into_response(),
    }
}

async fn get_handler() -> Response {
    let seed = clock_seed();
    match generate(seed) {
        Ok(instance) => Html(quiz_page(&instance.redact()).into_string()).into_response(),
        Err(e) => {
            log::error!("Instance generation failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

#[derive(Deserialize)]
struct AnswerForm {
    seed: i64,
    alternative: String,
}

async fn post_handler(Form(form): Form<AnswerForm>) -> Response {
    match grade(form.seed as u32, &form.alternative) {
        Ok(correct) => Html(answer_page(correct).into_string()).into_response(),
        Err(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response(),
    }
}

async fn style_handler() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, CACHE_CONTROL_IMMUTABLE),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}

async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    log::debug!("Received Ctrl+C, shutting down gracefully");
}
