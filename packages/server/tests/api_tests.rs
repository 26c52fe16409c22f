use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use formbuilder_components::full_registry;
use formbuilder_document::{ContentNode, Document};
use formbuilder_forms::FormSettings;
use formbuilder_server::{router, AppState};
use formbuilder_storage::{DocumentStore, MemoryStore};
use serde_json::{json, Value};
use tower::ServiceExt;

fn contact_form() -> Document {
    let mut doc = Document::empty("Contact");
    doc.content
        .push(ContentNode::new("Heading", "h").with_prop("text", "Get in touch"));
    doc.content.push(ContentNode::new("EmailInput", "e"));
    doc.content.push(
        ContentNode::new("TextInput", "n")
            .with_prop("name", "full_name")
            .with_prop("required", true),
    );
    doc.content.push(ContentNode::new("SubmitButton", "b"));
    FormSettings {
        published: true,
        require_email: true,
    }
    .write_to(&mut doc);
    doc
}

async fn app() -> (Router, AppState) {
    let store = MemoryStore::new();
    store.save("/contact", &contact_form()).await.unwrap();

    let state = AppState::new(full_registry().unwrap(), store);
    (router(state.clone()), state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_missing_document_resolves_to_new_page() {
    let (app, _) = app().await;

    let (status, body) = get(&app, "/api/documents/missing-path").await;

    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["root"]["props"]["title"], "New Page");
    assert_eq!(value["content"], json!([]));
}

#[tokio::test]
async fn test_put_then_get_document() {
    let (app, state) = app().await;
    let payload = json!({
        "root": { "props": { "title": "About" } },
        "content": [ { "type": "Text", "props": { "id": "Text-1", "text": "Hello" } } ]
    });

    let (status, _) = send(
        &app,
        Request::put("/api/documents/about")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let stored = state.store.load("/about").await.unwrap().unwrap();
    assert_eq!(stored.content[0].id, "Text-1");

    let (status, body) = get(&app, "/api/documents/about").await;
    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["content"][0]["id"], "Text-1");
    assert_eq!(value["content"][0]["props"]["text"], "Hello");

    let (_, keys) = get(&app, "/api/documents").await;
    assert_eq!(keys, r#"["/about","/contact"]"#);
}

#[tokio::test]
async fn test_put_rejects_malformed_document() {
    let (app, _) = app().await;

    let (status, body) = send(
        &app,
        Request::put("/api/documents/bad")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{ "content": "nope" }"#))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("error"));
}

#[tokio::test]
async fn test_delete_document() {
    let (app, _) = app().await;
    let delete = || Request::delete("/api/documents/contact").body(Body::empty()).unwrap();

    assert_eq!(send(&app, delete()).await.0, StatusCode::NO_CONTENT);
    assert_eq!(send(&app, delete()).await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_component_schema_lists_registry() {
    let (app, _) = app().await;

    let (status, body) = get(&app, "/api/components").await;

    assert_eq!(status, StatusCode::OK);
    let schema: Vec<Value> = serde_json::from_str(&body).unwrap();
    assert_eq!(schema.len(), 16);
}

#[tokio::test]
async fn test_public_page_wraps_form() {
    let (app, _) = app().await;

    let (status, html) = get(&app, "/p/contact").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<title>Contact</title>"));
    assert!(html.contains(r#"<form method="post" action="/f/contact">"#));
    assert!(html.contains("Get in touch"));
    assert!(!html.contains("data-node-id"));
}

#[tokio::test]
async fn test_canvas_page_annotates_nodes() {
    let (app, _) = app().await;

    let (status, html) = get(&app, "/canvas/contact").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"data-node-id="h" data-component="Heading""#));
    assert!(!html.contains("<form"));
}

#[tokio::test]
async fn test_issues_for_invalid_props() {
    let (app, state) = app().await;
    let mut doc = Document::empty("Broken");
    doc.content
        .push(ContentNode::new("Heading", "h").with_prop("size", "9xl"));
    doc.content.push(ContentNode::new("Mystery", "m"));
    state.store.save("/broken", &doc).await.unwrap();

    let (status, body) = get(&app, "/api/issues/broken").await;

    assert_eq!(status, StatusCode::OK);
    let issues: Vec<Value> = serde_json::from_str(&body).unwrap();
    assert!(issues.iter().any(|issue| issue["node_id"] == "h"));
    assert!(issues.iter().any(|issue| issue["node_id"] == "m"));
}

#[tokio::test]
async fn test_submit_form() {
    let (app, _) = app().await;

    let (status, body) = send(
        &app,
        post_form("/f/contact", "email=ada%40example.com&full_name=Ada+Lovelace"),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["submission"]["email"], "ada@example.com");
    assert_eq!(value["submission"]["data"]["full_name"], "Ada Lovelace");

    let (_, listed) = get(&app, "/api/submissions/contact").await;
    let listed: Vec<Value> = serde_json::from_str(&listed).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["email"], "ada@example.com");
}

#[tokio::test]
async fn test_submit_missing_required_is_unprocessable() {
    let (app, _) = app().await;

    let (status, body) = send(&app, post_form("/f/contact", "email=a%40b.c")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["fields"], json!(["full_name"]));

    let (_, listed) = get(&app, "/api/submissions/contact").await;
    assert_eq!(listed, "[]");
}

#[tokio::test]
async fn test_submit_unknown_form_is_not_found() {
    let (app, _) = app().await;

    let (status, _) = send(&app, post_form("/f/nowhere", "email=a%40b.c")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_drafts_are_hidden_from_public_routes() {
    let (app, state) = app().await;
    let mut draft = contact_form();
    FormSettings::default().write_to(&mut draft);
    state.store.save("/draft", &draft).await.unwrap();

    let (status, html) = get(&app, "/p/draft").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("Form not found"));

    let (status, _) = send(&app, post_form("/f/draft", "email=a%40b.c&full_name=A")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(state.submissions.list("/draft").await.is_empty());

    let (status, _) = get(&app, "/p/nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The editor still sees drafts
    let (status, _) = get(&app, "/canvas/draft").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_publishing_through_settings() {
    let (app, _) = app().await;
    let (status, body) = send(
        &app,
        json_request("POST", "/api/forms", json!({ "title": "Survey" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(created["key"], "/survey");

    let (_, settings) = get(&app, "/api/settings/survey").await;
    let settings: Value = serde_json::from_str(&settings).unwrap();
    assert_eq!(settings, json!({ "published": false, "requireEmail": true }));
    assert_eq!(get(&app, "/p/survey").await.0, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        json_request("PUT", "/api/settings/survey", json!({ "published": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let settings: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(settings, json!({ "published": true, "requireEmail": true }));

    let (status, html) = get(&app, "/p/survey").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<title>Survey</title>"));

    let (status, _) = send(
        &app,
        json_request("PUT", "/api/settings/absent", json!({ "published": true })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_form_picks_unused_slug() {
    let (app, state) = app().await;
    let create = || json_request("POST", "/api/forms", json!({ "title": "Contact Us" }));

    let (_, first) = send(&app, create()).await;
    let (_, second) = send(&app, create()).await;
    let (_, clash) = send(
        &app,
        json_request("POST", "/api/forms", json!({ "title": "Contact" })),
    )
    .await;

    let slug = |body: &str| serde_json::from_str::<Value>(body).unwrap()["slug"].clone();
    assert_eq!(slug(&first), "contact-us");
    assert_eq!(slug(&second), "contact-us-1");
    assert_eq!(slug(&clash), "contact-1");

    let stored = state.store.load("/contact-us-1").await.unwrap().unwrap();
    assert_eq!(stored.title(), Some("Contact Us"));
    assert!(stored.content.is_empty());
}

#[tokio::test]
async fn test_email_requirement_follows_settings() {
    let (app, state) = app().await;
    let mut feedback = Document::empty("Feedback");
    feedback
        .content
        .push(ContentNode::new("TextArea", "c").with_prop("name", "comment"));
    FormSettings {
        published: true,
        require_email: true,
    }
    .write_to(&mut feedback);
    state.store.save("/feedback", &feedback).await.unwrap();

    let (status, body) = send(&app, post_form("/f/feedback", "comment=Nice")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("Please provide a valid email address"));

    let (status, _) = send(
        &app,
        json_request("PUT", "/api/settings/feedback", json!({ "requireEmail": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, post_form("/f/feedback", "comment=Nice")).await;
    assert_eq!(status, StatusCode::CREATED);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["submission"]["email"], Value::Null);
    assert_eq!(value["submission"]["data"]["comment"], "Nice");
}

#[tokio::test]
async fn test_submission_count_and_stats() {
    let (app, state) = app().await;
    state.store.save("/about", &Document::empty("About")).await.unwrap();

    let (_, body) = get(&app, "/api/submission-count/contact").await;
    assert_eq!(body, r#"{"count":0}"#);

    for name in ["Ada", "Grace"] {
        let body = format!("email=x%40example.com&full_name={}", name);
        assert_eq!(send(&app, post_form("/f/contact", &body)).await.0, StatusCode::CREATED);
    }
    send(&app, post_form("/f/contact", "email=x%40example.com")).await;

    let (_, body) = get(&app, "/api/submission-count/contact").await;
    assert_eq!(body, r#"{"count":2}"#);

    let (status, body) = get(&app, "/api/stats").await;
    assert_eq!(status, StatusCode::OK);
    let stats: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(stats["documents"], 2);
    assert_eq!(stats["published"], 1);
    assert_eq!(stats["submissions"], 2);
    assert_eq!(stats["submissionsPerKey"]["/contact"], 2);
}
