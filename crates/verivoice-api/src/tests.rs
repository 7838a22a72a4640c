//! Router tests against an in-memory `SqliteStore`.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt as _;
use uuid::Uuid;
use verivoice_core::petition::PetitionStatus;
use verivoice_store_sqlite::SqliteStore;

use crate::api_router;

async fn app() -> (Router, Arc<SqliteStore>) {
  let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
  (api_router(Arc::clone(&store)), store)
}

async fn send(
  app:    &Router,
  method: &str,
  uri:    &str,
  body:   Option<Value>,
) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  let body = match body {
    Some(v) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let value = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
  };
  (status, value)
}

fn declaration(name: &str, nationality: &str) -> Value {
  json!({ "nationality": nationality, "full_name": name, "self_verified": true })
}

fn create_body(title: &str, nationality: &str) -> Value {
  json!({
    "title": title,
    "description": "Extend night train services",
    "nationality": nationality,
    "declaration": declaration("Creator", nationality),
  })
}

async fn create(app: &Router, title: &str, nationality: &str) -> Value {
  let (status, body) =
    send(app, "POST", "/petitions", Some(create_body(title, nationality))).await;
  assert_eq!(status, StatusCode::CREATED, "body: {body}");
  body
}

fn id_of(petition: &Value) -> Uuid { petition["id"].as_str().unwrap().parse().unwrap() }

// ─── Nationalities ───────────────────────────────────────────────────────────

#[tokio::test]
async fn nationalities_are_listed() {
  let (app, _) = app().await;
  let (status, body) = send(&app, "GET", "/nationalities", None).await;
  assert_eq!(status, StatusCode::OK);
  let list = body.as_array().unwrap();
  assert_eq!(list.len(), 190);
  assert!(list.contains(&json!("France")));
}

// ─── Create / get ────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_returns_active_petition_with_default_creator() {
  let (app, _) = app().await;
  let petition = create(&app, "Night trains", "Belgium").await;

  assert_eq!(petition["status"], "active");
  assert_eq!(petition["signatures"], 0);
  assert_eq!(petition["creator_name"], "Anonymous User");
  assert_eq!(petition["signers"], json!([]));

  let (status, fetched) =
    send(&app, "GET", &format!("/petitions/{}", id_of(&petition)), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(fetched, petition);
}

#[tokio::test]
async fn create_rejects_unknown_nationality() {
  let (app, _) = app().await;
  let (status, body) =
    send(&app, "POST", "/petitions", Some(create_body("x", "Atlantis"))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].as_str().unwrap().contains("Atlantis"));
}

#[tokio::test]
async fn create_requires_matching_declaration() {
  let (app, _) = app().await;
  let mut body = create_body("x", "Belgium");
  body["declaration"] = declaration("Creator", "France");

  let (status, _) = send(&app, "POST", "/petitions", Some(body)).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_rejects_blank_title() {
  let (app, _) = app().await;
  let (status, body) =
    send(&app, "POST", "/petitions", Some(create_body("  ", "Belgium"))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].as_str().unwrap().contains("title"));
}

#[tokio::test]
async fn get_missing_petition_is_404() {
  let (app, _) = app().await;
  let (status, _) =
    send(&app, "GET", &format!("/petitions/{}", Uuid::new_v4()), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ─── List ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_filters_by_status_and_text() {
  let (app, store) = app().await;
  let trains = create(&app, "Night trains", "Belgium").await;
  create(&app, "Bike lanes", "Denmark").await;
  let closed = create(&app, "Old ferry", "Denmark").await;
  store.set_status(id_of(&closed), PetitionStatus::Closed).await.unwrap();

  let (status, all) = send(&app, "GET", "/petitions?status=all", None).await;
  assert_eq!(status, StatusCode::OK);
  let titles: Vec<_> = all
    .as_array()
    .unwrap()
    .iter()
    .map(|p| p["title"].as_str().unwrap())
    .collect();
  assert_eq!(titles, ["Old ferry", "Bike lanes", "Night trains"]);

  let (_, active) = send(&app, "GET", "/petitions?status=active", None).await;
  assert_eq!(active.as_array().unwrap().len(), 2);

  let (_, searched) = send(&app, "GET", "/petitions?q=belgium", None).await;
  let searched = searched.as_array().unwrap();
  assert_eq!(searched.len(), 1);
  assert_eq!(searched[0]["id"], trains["id"]);

  let (status, _) = send(&app, "GET", "/petitions?status=archived", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ─── Signatures ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn sign_then_read_back() {
  let (app, _) = app().await;
  let petition = create(&app, "Night trains", "France").await;
  let id = id_of(&petition);

  let (status, signer) = send(
    &app,
    "POST",
    &format!("/petitions/{id}/signatures"),
    Some(declaration("Alice", "France")),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(signer["name"], "Alice");
  assert_eq!(signer["verified"], true);

  let (_, fetched) = send(&app, "GET", &format!("/petitions/{id}"), None).await;
  assert_eq!(fetched["signatures"], 1);
  assert_eq!(fetched["signers"][0]["name"], "Alice");
  assert_eq!(fetched["signers"][0]["verified"], true);

  let (status, check) = send(
    &app,
    "GET",
    &format!("/petitions/{id}/signatures/check?name=Alice"),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(check, json!({ "signed": true }));

  let (_, check) = send(
    &app,
    "GET",
    &format!("/petitions/{id}/signatures/check?name=Bob"),
    None,
  )
  .await;
  assert_eq!(check, json!({ "signed": false }));
}

#[tokio::test]
async fn second_signature_with_same_name_is_409() {
  let (app, _) = app().await;
  let id = id_of(&create(&app, "Night trains", "France").await);
  let uri = format!("/petitions/{id}/signatures");

  let (first, _) = send(&app, "POST", &uri, Some(declaration("Alice", "France"))).await;
  assert_eq!(first, StatusCode::CREATED);
  let (second, _) = send(&app, "POST", &uri, Some(declaration("Alice", "France"))).await;
  assert_eq!(second, StatusCode::CONFLICT);
}

#[tokio::test]
async fn sign_requires_matching_nationality() {
  let (app, _) = app().await;
  let id = id_of(&create(&app, "Night trains", "France").await);

  let (status, body) = send(
    &app,
    "POST",
    &format!("/petitions/{id}/signatures"),
    Some(declaration("Hans", "Germany")),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].as_str().unwrap().contains("France"));
}

#[tokio::test]
async fn closed_petition_refuses_signatures() {
  let (app, store) = app().await;
  let id = id_of(&create(&app, "Night trains", "France").await);
  store.set_status(id, PetitionStatus::Closed).await.unwrap();

  let (status, _) = send(
    &app,
    "POST",
    &format!("/petitions/{id}/signatures"),
    Some(declaration("Alice", "France")),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn signing_missing_petition_is_404() {
  let (app, _) = app().await;
  let (status, _) = send(
    &app,
    "POST",
    &format!("/petitions/{}/signatures", Uuid::new_v4()),
    Some(declaration("Alice", "France")),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}
