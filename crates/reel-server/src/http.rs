use anyhow::Context;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use rand::rngs::StdRng;
use reel_media::listing::{self, ListQuery, ListingMode};
use reel_media::media::{MediaEntry, MediaList};
use rust_embed::RustEmbed;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

#[derive(RustEmbed)]
#[folder = "static/"]
struct Assets;

#[derive(Clone)]
pub struct HttpState {
    media: MediaList,
    rng: Arc<Mutex<StdRng>>,
    mode: ListingMode,
    default_limit: usize,
}

impl HttpState {
    pub fn new(media: MediaList, rng: StdRng, mode: ListingMode, default_limit: usize) -> Self {
        Self {
            media,
            rng: Arc::new(Mutex::new(rng)),
            mode,
            default_limit,
        }
    }
}

pub fn router(state: HttpState, media_dir: &Path) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/videos", get(list_videos))
        .nest_service("/videos", ServeDir::new(media_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn bind(bind_address: &str, port: u16) -> anyhow::Result<TcpListener> {
    let addr = format!("{}:{}", bind_address, port);
    TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind HTTP server to {}", addr))
}

async fn index() -> Response {
    match Assets::get("index.html") {
        Some(file) => Html(file.data.into_owned()).into_response(),
        None => {
            error!("index.html missing from embedded assets");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read index.html").into_response()
        }
    }
}

async fn list_videos(
    State(state): State<HttpState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<MediaEntry>> {
    let selected: Vec<MediaEntry> = listing::select(
        &state.media,
        &query,
        state.mode,
        state.default_limit,
        &state.rng,
    )
    .into_iter()
    .cloned()
    .collect();

    debug!(
        "HTTP API: {} of {} entries (mode={}, types={:?})",
        selected.len(),
        state.media.len(),
        state.mode,
        query.types
    );
    Json(selected)
}
