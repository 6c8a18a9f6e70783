//! Griddle benchmark server
//!
//! Serves the CPU-bound kernels as plain-text HTTP endpoints:
//! - `GET /fannkuch?n=7`: flip checksum over the whole permutation space
//! - `GET /factorial?number=12`: naive factorial
//! - `GET /primes?number=100`: largest prime up to a limit
//!
//! Every endpoint parses one integer query parameter, falls back to a
//! default when it is missing or malformed, invokes the kernel, and
//! renders the result as text. Invalid-but-parseable input (sizes the
//! engine rejects, overflowing factorials) is a 400 with a JSON error
//! body.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::info;

use griddle_core::kernels;

/// Serving cap for the flip engine. Larger sizes are valid for the
/// engine itself but run far too long to answer within one request.
const MAX_SERVED_N: usize = 12;

const DEFAULT_N: usize = 12;
const DEFAULT_BLOCKS: usize = 24;
const DEFAULT_FACTORIAL: u64 = 12;
const DEFAULT_PRIME_LIMIT: u32 = 100;

#[derive(Debug, Clone)]
pub struct AppState {
    /// Block partitioning handed to the flip engine.
    pub blocks: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(s) => (StatusCode::BAD_REQUEST, s),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<griddle_core::Error> for AppError {
    fn from(e: griddle_core::Error) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

/// One integer query parameter, with a silent fallback when the value is
/// missing or not a number.
fn query_or<T: std::str::FromStr>(
    params: &HashMap<String, String>,
    key: &str,
    default: T,
) -> T {
    params
        .get(key)
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

// =============================================================================
// Handlers
// =============================================================================

async fn index() -> &'static str {
    "griddle benchmark kernels\n\
     GET /fannkuch?n=7\n\
     GET /factorial?number=12\n\
     GET /primes?number=100\n"
}

async fn fannkuch(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<String, AppError> {
    let n = query_or(&params, "n", DEFAULT_N);
    if n > MAX_SERVED_N {
        return Err(AppError::BadRequest(format!(
            "n must be at most {MAX_SERVED_N}"
        )));
    }

    let summary = griddle_core::run(n, state.blocks)?;
    info!(
        "fannkuch n={} blocks={} checksum={} max_flips={}",
        n, state.blocks, summary.checksum, summary.max_flips
    );

    Ok(format!(
        "Checksum: {}\nPfannkuchen({}) = {}\n",
        summary.checksum, n, summary.max_flips
    ))
}

async fn factorial(
    Query(params): Query<HashMap<String, String>>,
) -> Result<String, AppError> {
    let number = query_or(&params, "number", DEFAULT_FACTORIAL);
    let value = kernels::factorial(number).ok_or_else(|| {
        AppError::BadRequest(format!("{number}! overflows a 64-bit integer"))
    })?;
    Ok(format!("Factorial of {} is: {}", number, value))
}

async fn primes(
    Query(params): Query<HashMap<String, String>>,
) -> Result<String, AppError> {
    let limit = query_or(&params, "number", DEFAULT_PRIME_LIMIT);
    let prime = kernels::last_prime(limit)
        .ok_or_else(|| AppError::BadRequest(format!("no prime at or below {limit}")))?;
    Ok(format!("The last prime number up to {} is: {}", limit, prime))
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("griddle_server=debug,tower_http=debug")
        .init();

    let blocks = std::env::var("GRIDDLE_BLOCKS")
        .ok()
        .and_then(|value| value.parse().ok())
        .filter(|&blocks| blocks >= 1)
        .unwrap_or(DEFAULT_BLOCKS);
    let state = Arc::new(AppState { blocks });

    let app = Router::new()
        .route("/", get(index))
        .route("/fannkuch", get(fannkuch))
        .route("/factorial", get(factorial))
        .route("/primes", get(primes))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(8080);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("griddle server listening on {}", listener.local_addr()?);
    info!("flip engine block count: {}", blocks);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|&(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn error_bodies_serialize_as_json() {
        let body = ErrorResponse {
            error: "n must be at most 12".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"error":"n must be at most 12"}"#
        );
    }

    #[test]
    fn query_parsing_falls_back_on_garbage() {
        assert_eq!(query_or(&params(&[("n", "9")]), "n", 12usize), 9);
        assert_eq!(query_or(&params(&[("n", "nine")]), "n", 12usize), 12);
        assert_eq!(query_or(&params(&[]), "n", 12usize), 12);
    }

    #[tokio::test]
    async fn fannkuch_renders_the_classic_text() {
        let state = Arc::new(AppState { blocks: 24 });
        let body = fannkuch(State(state), Query(params(&[("n", "7")])))
            .await
            .unwrap();
        assert_eq!(body, "Checksum: 228\nPfannkuchen(7) = 16\n");
    }

    #[tokio::test]
    async fn fannkuch_rejects_sizes_above_the_serving_cap() {
        let state = Arc::new(AppState { blocks: 24 });
        let result = fannkuch(State(state), Query(params(&[("n", "13")]))).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn factorial_overflow_is_a_bad_request() {
        let ok = factorial(Query(params(&[("number", "12")]))).await.unwrap();
        assert_eq!(ok, "Factorial of 12 is: 479001600");
        assert!(factorial(Query(params(&[("number", "21")]))).await.is_err());
    }

    #[tokio::test]
    async fn primes_renders_the_classic_text() {
        let body = primes(Query(params(&[("number", "100")]))).await.unwrap();
        assert_eq!(body, "The last prime number up to 100 is: 97");
        assert!(primes(Query(params(&[("number", "1")]))).await.is_err());
    }
}
