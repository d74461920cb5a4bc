//! HTTP server exposing the blog listing and single posts

use anyhow::Result;
use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::content::{render, Block, Post};
use crate::helpers::{article_page, blocks_to_html, index_page, not_found_page};
use crate::query::{ListParams, ListQuery};
use crate::{Folio, ListResponse, ListStatus};

/// Server state
struct ServerState {
    folio: Folio,
}

/// Detail projection of a post as served by the API
#[derive(Debug, Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Post,
    pub blocks: Vec<Block>,
    pub html: String,
}

impl PostDetail {
    fn new(post: Post) -> Self {
        let blocks = render(post.body.as_deref().unwrap_or_default());
        let html = blocks_to_html(&blocks);
        Self { post, blocks, html }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

/// Build the application router
pub fn router(folio: Folio) -> Router {
    let state = Arc::new(ServerState { folio });

    Router::new()
        .route("/api/blog", get(list_handler))
        .route("/api/blog/:slug", get(post_json_handler))
        .route("/api/tags", get(tags_handler))
        .route("/blog", get(index_handler))
        .route("/blog/:slug", get(post_page_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server
pub async fn start(folio: &Folio, ip: &str, port: u16) -> Result<()> {
    let app = router(folio.clone());

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Serving content from {:?}", folio.content_dir);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Run blocking filesystem work off the async executor
async fn blocking<T, F>(state: Arc<ServerState>, f: F) -> Option<T>
where
    T: Send + 'static,
    F: FnOnce(&Folio) -> T + Send + 'static,
{
    match tokio::task::spawn_blocking(move || f(&state.folio)).await {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::error!("Content task failed: {}", e);
            None
        }
    }
}

/// Listing query from the raw query string, defaults for anything unusable
fn list_query(state: &ServerState, raw: Option<String>) -> ListQuery {
    ListParams::from_query_string(raw.as_deref().unwrap_or_default())
        .into_query(state.folio.config.per_page)
}

/// HTTP status for a listing outcome; the body shape is the same for all
fn list_status(status: ListStatus) -> StatusCode {
    match status {
        ListStatus::Ok | ListStatus::SourceUnavailable => StatusCode::OK,
        ListStatus::Failed => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn list_response(response: ListResponse) -> Response {
    (list_status(response.status), Json(response)).into_response()
}

/// GET /api/blog
async fn list_handler(
    State(state): State<Arc<ServerState>>,
    RawQuery(raw): RawQuery,
) -> Response {
    let query = list_query(&state, raw);
    let fallback = query.clone();

    let response = blocking(state, move |folio| folio.list_posts(&query))
        .await
        .unwrap_or_else(|| ListResponse::failed(&fallback));
    list_response(response)
}

/// GET /blog
async fn index_handler(
    State(state): State<Arc<ServerState>>,
    RawQuery(raw): RawQuery,
) -> Response {
    let query = list_query(&state, raw);
    let fallback = query.clone();
    let site_title = state.folio.config.title.clone();
    let per_page = state.folio.config.per_page;

    let (response, tags) = blocking(state, move |folio| {
        (folio.list_posts(&query), folio.tag_summary())
    })
    .await
    .unwrap_or_else(|| (ListResponse::failed(&fallback), Vec::new()));

    let html = index_page(&site_title, &response, &fallback, per_page, &tags);
    (list_status(response.status), Html(html)).into_response()
}

/// GET /api/tags
async fn tags_handler(State(state): State<Arc<ServerState>>) -> Response {
    let tags = blocking(state, |folio| folio.tag_summary())
        .await
        .unwrap_or_default();
    Json(tags).into_response()
}

/// GET /api/blog/:slug
async fn post_json_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    let detail = blocking(state, move |folio| folio.find_post(&slug).map(PostDetail::new))
        .await
        .flatten();

    match detail {
        Some(detail) => Json(detail).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorBody {
                error: "Post not found",
            }),
        )
            .into_response(),
    }
}

/// GET /blog/:slug
async fn post_page_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    let site_title = state.folio.config.title.clone();
    let page = blocking(state, move |folio| {
        folio.find_post(&slug).map(|post| {
            let blocks = render(post.body.as_deref().unwrap_or_default());
            article_page(&folio.config.title, &post, &blocks)
        })
    })
    .await
    .flatten();

    match page {
        Some(html) => Html(html).into_response(),
        None => (StatusCode::NOT_FOUND, Html(not_found_page(&site_title))).into_response(),
    }
}
