use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use formbuilder_document::Document;
use formbuilder_forms::{capture, form_fields, unique_slug, FormSettings, Submission};
use formbuilder_renderer::{
    html::{to_html, HtmlOptions},
    render, validate_document, DocumentIssue,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

type ApiResult<T> = Result<T, ApiError>;

/// Storage key for a wildcard path segment
fn storage_key(path: &str) -> String {
    format!("/{}", path.trim_start_matches('/'))
}

/// The document at `key` if it exists and is published
async fn published_document(state: &AppState, key: &str) -> ApiResult<Option<Document>> {
    let document = state.store.load(key).await?;
    Ok(document.filter(|document| FormSettings::of(document).published))
}

pub async fn components(State(state): State<AppState>) -> Json<Value> {
    Json(state.registry.schema())
}

pub async fn list_documents(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.store.keys().await?))
}

pub async fn get_document(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> ApiResult<Json<Document>> {
    let document = state.store.resolve(&storage_key(&path)).await?;
    Ok(Json(document))
}

pub async fn put_document(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<StatusCode> {
    let key = storage_key(&path);
    let document = Document::from_value(body)?;
    state.store.save(&key, &document).await?;

    info!(key = %key, nodes = document.len(), "Saved document");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_document(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> ApiResult<StatusCode> {
    let key = storage_key(&path);
    if state.store.delete(&key).await? {
        info!(key = %key, "Deleted document");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(key))
    }
}

pub async fn document_issues(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> ApiResult<Json<Vec<DocumentIssue>>> {
    let document = state.store.resolve(&storage_key(&path)).await?;
    Ok(Json(validate_document(&state.registry, &document)))
}

pub async fn public_page(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> ApiResult<Response> {
    let Some(document) = published_document(&state, &storage_key(&path)).await? else {
        return Ok((StatusCode::NOT_FOUND, Html("<h1>Form not found</h1>")).into_response());
    };
    let page = render(&document, &state.registry);
    let options = HtmlOptions::public().with_form_action(format!("/f/{}", path.trim_start_matches('/')));

    Ok(Html(to_html(&page, &options)).into_response())
}

pub async fn canvas_page(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> ApiResult<Html<String>> {
    let document = state.store.resolve(&storage_key(&path)).await?;
    let page = render(&document, &state.registry);

    Ok(Html(to_html(&page, &HtmlOptions::canvas())))
}

pub async fn submit_form(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Form(entries): Form<Vec<(String, String)>>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let key = storage_key(&path);
    let document = published_document(&state, &key)
        .await?
        .ok_or_else(|| ApiError::NotFound(key.clone()))?;

    let fields = form_fields(&state.registry, &document);
    let submission = capture(&fields, &FormSettings::of(&document), entries)?;
    let count = state.submissions.record(&key, submission.clone()).await;

    info!(key = %key, count, "Captured form submission");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "submission": submission })),
    ))
}

pub async fn list_submissions(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Json<Vec<Submission>> {
    Json(state.submissions.list(&storage_key(&path)).await)
}

pub async fn submission_count(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Json<Value> {
    let count = state.submissions.count(&storage_key(&path)).await;
    Json(json!({ "count": count }))
}

#[derive(Debug, Deserialize)]
pub struct NewForm {
    pub title: String,
}

/// Store an empty draft form under a slug derived from its title
pub async fn create_form(
    State(state): State<AppState>,
    Json(body): Json<NewForm>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let keys = state.store.keys().await?;
    let slug = unique_slug(&body.title, |slug| keys.contains(&storage_key(slug)));
    let key = storage_key(&slug);

    state.store.save(&key, &Document::empty(body.title)).await?;

    info!(key = %key, "Created form");
    Ok((StatusCode::CREATED, Json(json!({ "key": key, "slug": slug }))))
}

/// Settings fields left out of the body keep their stored value
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub published: Option<bool>,
    pub require_email: Option<bool>,
}

pub async fn get_settings(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> ApiResult<Json<FormSettings>> {
    let key = storage_key(&path);
    let document = state
        .store
        .load(&key)
        .await?
        .ok_or(ApiError::NotFound(key))?;
    Ok(Json(FormSettings::of(&document)))
}

pub async fn put_settings(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Json(update): Json<SettingsUpdate>,
) -> ApiResult<Json<FormSettings>> {
    let key = storage_key(&path);
    let mut document = state
        .store
        .load(&key)
        .await?
        .ok_or_else(|| ApiError::NotFound(key.clone()))?;

    let mut settings = FormSettings::of(&document);
    if let Some(published) = update.published {
        settings.published = published;
    }
    if let Some(require_email) = update.require_email {
        settings.require_email = require_email;
    }
    settings.write_to(&mut document);
    state.store.save(&key, &document).await?;

    info!(
        key = %key,
        published = settings.published,
        require_email = settings.require_email,
        "Updated form settings"
    );
    Ok(Json(settings))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub documents: usize,
    pub published: usize,
    pub submissions: usize,
    pub submissions_per_key: HashMap<String, usize>,
}

pub async fn stats(State(state): State<AppState>) -> ApiResult<Json<Stats>> {
    let keys = state.store.keys().await?;
    let mut published = 0;
    for key in &keys {
        if published_document(&state, key).await?.is_some() {
            published += 1;
        }
    }
    let submissions_per_key = state.submissions.counts().await;

    Ok(Json(Stats {
        documents: keys.len(),
        published,
        submissions: submissions_per_key.values().sum(),
        submissions_per_key,
    }))
}
