//! HTTP request handlers

use super::state::AppState;
use crate::controller::{Submission, SuggestionList};
use crate::index;
use axum::{
    extract::{Form, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tera::Context;
use tracing::{debug, error};

/// Query parameters for suggestion endpoints
#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    #[serde(default)]
    pub q: String,
}

/// Form body for accepting a suggestion
#[derive(Debug, Deserialize)]
pub struct AcceptParams {
    pub q: String,
}

/// Resolve raw input the same way the interactive controller does
async fn resolve(state: &AppState, raw: &str) -> SuggestionList {
    match Submission::from_raw(raw) {
        Submission::ShowHistory => {
            let queries = state.history().queries();
            SuggestionList::history(queries)
        }
        Submission::Lookup(query) => SuggestionList::live(state.service.lookup(&query).await),
    }
}

/// Reject suggestion requests over the configured rate
pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if state.limiter.check().is_err() {
        debug!("Rate limit exceeded for {}", request.uri());
        return StatusCode::TOO_MANY_REQUESTS.into_response();
    }
    next.run(request).await
}

/// Search page handler
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let mut ctx = Context::new();
    ctx.insert("instance_name", state.instance_name());
    ctx.insert("debounce_ms", &state.settings.autocomplete.debounce_ms);

    match state.templates.render_with_context("index.html", &ctx) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Template error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

/// OpenSearch-style suggestions: `[query, [words...]]`
pub async fn autocomplete(
    State(state): State<AppState>,
    Query(params): Query<SuggestParams>,
) -> impl IntoResponse {
    let list = resolve(&state, &params.q).await;
    Json((params.q, list.items))
}

/// Suggestion rows as an HTML fragment
pub async fn suggestions(
    State(state): State<AppState>,
    Query(params): Query<SuggestParams>,
) -> Response {
    let list = resolve(&state, &params.q).await;

    match state.templates.render("suggestions.html", &list) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Template error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

/// Record a chosen suggestion in the recency list
pub async fn accept(State(state): State<AppState>, Form(params): Form<AcceptParams>) -> StatusCode {
    if state.history().accept(&params.q) {
        debug!("Accepted '{}'", params.q.trim());
    }
    StatusCode::NO_CONTENT
}

/// Recency list, most recent first
pub async fn history(State(state): State<AppState>) -> impl IntoResponse {
    let entries: Vec<_> = state.history().entries().cloned().collect();
    Json(entries)
}

/// Index size and lookup metrics
pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    let (words, nodes) = {
        let index = index::read(state.service.index());
        (index.len(), index.node_count())
    };

    Json(serde_json::json!({
        "backend": state.service.backend_name(),
        "words": words,
        "nodes": nodes,
        "metrics": state.service.metrics().snapshot(),
    }))
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}
