//! Axum route handlers for the Sudoku puzzle API.

use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::{header, HeaderValue, StatusCode, Uri},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use sudoku_core::{decode_board, Board, PuzzleId, PuzzleStore, RowPolicy, StoreError};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::{config::GatewayConfig, error::GatewayError};

/// `Access-Control-Allow-Methods` sent on every response.
pub const ALLOW_METHODS: &str = "GET, POST";

/// `Access-Control-Allow-Headers` sent on every response.
pub const ALLOW_HEADERS: &str = "X-Requested-With,content-type";

// ── Shared state ─────────────────────────────────────────────────────────────

/// Per-process state handed to every handler. Read-only after startup.
#[derive(Debug)]
pub struct AppState {
    pub store: PuzzleStore,
    pub row_policy: RowPolicy,
}

type Shared = Arc<AppState>;

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router from the gateway configuration.
pub fn create_router(config: &GatewayConfig) -> Router {
    let state = Arc::new(AppState {
        store: PuzzleStore::new(config.data_dir.clone()),
        row_policy: config.row_policy,
    });

    Router::new()
        .route("/sudoku/new", get(random_puzzle))
        .route("/sudoku/{id}", get(puzzle_by_id))
        .route("/health", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            config.allow_origin.clone(),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ))
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /health` — liveness check.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

/// `GET /sudoku/new` — a randomly selected puzzle.
///
/// # Errors
/// Returns [`GatewayError::Store`] wrapping `NoPuzzlesAvailable` or
/// `StorageUnavailable` when nothing can be served.
pub async fn random_puzzle(State(state): State<Shared>) -> Result<Json<Board>, GatewayError> {
    let (id, text) = state.store.fetch_random().await?;
    Ok(Json(decode(&id, &text, state.row_policy)))
}

/// `GET /sudoku/:id` — the puzzle stored as `<id>.txt`.
///
/// # Errors
/// Returns [`GatewayError::Store`] wrapping `InvalidId` for ids that are not
/// valid percent-encoded UTF-8 or could escape the storage root,
/// `PuzzleNotFound` when no such file exists, or `StorageUnavailable` on other
/// read failures.
pub async fn puzzle_by_id(
    State(state): State<Shared>,
    uri: Uri,
    raw: Result<Path<String>, PathRejection>,
) -> Result<Json<Board>, GatewayError> {
    let Path(raw) = raw.map_err(|rejection| {
        tracing::debug!(error = %rejection, "undecodable puzzle id");
        StoreError::InvalidId {
            id: last_segment(&uri).to_owned(),
            reason: "must be valid percent-encoded UTF-8",
        }
    })?;
    let id = PuzzleId::parse(raw)?;
    let text = state.store.fetch_by_id(&id).await?;
    Ok(Json(decode(&id, &text, state.row_policy)))
}

fn last_segment(uri: &Uri) -> &str {
    uri.path().rsplit('/').next().unwrap_or_default()
}

fn decode(id: &PuzzleId, text: &str, policy: RowPolicy) -> Board {
    let decoded = decode_board(text, policy);
    if let Some(first) = decoded.anomalies.first() {
        tracing::warn!(
            %id,
            %policy,
            count = decoded.anomalies.len(),
            %first,
            "puzzle contains non-digit characters"
        );
    }
    tracing::debug!(%id, cells = decoded.board.len(), "serving puzzle");
    decoded.board
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, Response, StatusCode},
    };
    use tower::ServiceExt;

    fn temp_root() -> tempfile::TempDir {
        match tempfile::tempdir() {
            Ok(d) => d,
            Err(e) => panic!("failed to create tempdir: {e}"),
        }
    }

    async fn send_get(app: Router, uri: &str) -> Response<Body> {
        let req = match Request::builder().uri(uri).body(Body::empty()) {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        };
        match app.oneshot(req).await {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        }
    }

    async fn json_body(resp: Response<Body>) -> serde_json::Value {
        let bytes = match axum::body::to_bytes(resp.into_body(), 64 * 1024).await {
            Ok(b) => b,
            Err(e) => panic!("failed to read body: {e}"),
        };
        match serde_json::from_slice(&bytes) {
            Ok(v) => v,
            Err(e) => panic!("invalid JSON: {e}"),
        }
    }

    #[tokio::test]
    async fn health_response_format_returns_ok_with_status_field() {
        let dir = temp_root();
        let app = create_router(&GatewayConfig::new(dir.path()));
        let resp = send_get(app, "/health").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await["status"], "ok");
    }

    #[tokio::test]
    async fn cors_headers_are_set_on_success_and_error() {
        let dir = temp_root();
        let app = create_router(&GatewayConfig::new(dir.path()));

        for uri in ["/health", "/sudoku/missing", "/sudoku/new"] {
            let resp = send_get(app.clone(), uri).await;
            let headers = resp.headers();
            assert_eq!(
                headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).map(HeaderValue::as_bytes),
                Some(&b"null"[..]),
                "{uri} must carry Access-Control-Allow-Origin"
            );
            assert_eq!(
                headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).map(HeaderValue::as_bytes),
                Some(&b"GET, POST"[..]),
                "{uri} must carry Access-Control-Allow-Methods"
            );
            assert_eq!(
                headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).map(HeaderValue::as_bytes),
                Some(&b"X-Requested-With,content-type"[..]),
                "{uri} must carry Access-Control-Allow-Headers"
            );
        }
    }

    #[tokio::test]
    async fn configured_origin_is_used() {
        let dir = temp_root();
        let mut config = GatewayConfig::new(dir.path());
        config.allow_origin = HeaderValue::from_static("https://play.example");
        let resp = send_get(create_router(&config), "/health").await;
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).map(HeaderValue::as_bytes),
            Some(&b"https://play.example"[..])
        );
    }

    #[tokio::test]
    async fn missing_puzzle_returns_404_with_error_field() {
        let dir = temp_root();
        let app = create_router(&GatewayConfig::new(dir.path()));
        let resp = send_get(app, "/sudoku/missing").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = json_body(resp).await;
        assert_eq!(body["error"], "puzzle not found: missing");
    }

    #[tokio::test]
    async fn undecodable_id_returns_400_with_error_field() {
        let dir = temp_root();
        let app = create_router(&GatewayConfig::new(dir.path()));
        let resp = send_get(app, "/sudoku/%FF").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).map(HeaderValue::as_bytes),
            Some(&b"application/json"[..])
        );
        let body = json_body(resp).await;
        assert_eq!(
            body["error"],
            "invalid puzzle id '%FF': must be valid percent-encoded UTF-8"
        );
    }

    #[tokio::test]
    async fn row_policy_from_config_reaches_decoder() {
        let dir = temp_root();
        if let Err(e) = std::fs::write(dir.path().join("crlf.txt"), "12\r\n34\r\n") {
            panic!("failed to write puzzle: {e}");
        }

        let verbatim = create_router(&GatewayConfig::new(dir.path()));
        let body = json_body(send_get(verbatim, "/sudoku/crlf").await).await;
        assert_eq!(body.as_array().map(Vec::len), Some(6));
        assert_eq!(body[2]["value"], -1);

        let mut config = GatewayConfig::new(dir.path());
        config.row_policy = RowPolicy::Normalized;
        let body = json_body(send_get(create_router(&config), "/sudoku/crlf").await).await;
        assert_eq!(body.as_array().map(Vec::len), Some(4));
        assert_eq!(body[3]["value"], 4);
    }
}
