//! API integration tests, driving the router in-process

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, Local};
use serde_json::{json, Value};
use tower::ServiceExt;

use library_admin::{config::BiographyRule, create_router, AppConfig, AppState};

fn app() -> Router {
    create_router(AppState::new(AppConfig::default()))
}

/// Send a request and decode the JSON body (Null when empty)
async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(format!("/api/v1{}", uri));
    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app.clone().oneshot(request).await.expect("Failed to send request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response")
    };
    (status, value)
}

fn book(title: &str) -> Value {
    json!({
        "title": title,
        "author": "B",
        "isbn": "1234567890",
        "publicationDate": "2020-01-01"
    })
}

fn tomorrow() -> String {
    (Local::now().date_naive() + Duration::days(1))
        .format("%Y-%m-%d")
        .to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["books"], 0);
    assert_eq!(body["authors"], 0);
    assert_eq!(body["biography_rule"], "min");
    assert_eq!(body["biography_limit"], 100);
}

#[tokio::test]
async fn test_book_add_edit_delete_scenario() {
    let app = app();

    let (status, body) = send(&app, "POST", "/books", Some(book("A"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["action"], "added");
    assert_eq!(body["entry"]["position"], 0);
    assert_eq!(body["entry"]["book"], book("A"));
    assert_eq!(body["entry"]["summary"], "A by B (ISBN: 1234567890) - 2020-01-01");
    let id = body["entry"]["id"].clone();

    let (status, body) = send(&app, "POST", "/books/0/edit", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["heading"], "Edit Book");
    assert_eq!(body["submit_label"], "Update");
    assert_eq!(body["values"], book("A"));
    assert_eq!(body["mode"]["editing"]["position"], 0);

    let (status, body) = send(&app, "POST", "/books", Some(book("A2"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["action"], "updated");
    assert_eq!(body["entry"]["id"], id);

    let (_, body) = send(&app, "GET", "/books", None).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["books"][0]["book"]["title"], "A2");
    assert_eq!(body["mode"], "creating");

    let (status, _) = send(&app, "DELETE", "/books/0", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, "GET", "/books", None).await;
    assert_eq!(body["total"], 0);
    assert_eq!(body["books"], json!([]));
}

#[tokio::test]
async fn test_invalid_book_is_rejected_with_field_errors() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/books",
        Some(json!({
            "title": "",
            "author": "B",
            "isbn": "123456789",
            "publicationDate": tomorrow()
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "InvalidForm");
    assert_eq!(body["fields"]["title"], "Title is required");
    assert_eq!(body["fields"]["isbn"], "ISBN must be 10 or 13 digits long");
    assert_eq!(body["fields"]["publicationDate"], "Provide a valid publication date");
    assert!(body["fields"].get("author").is_none());

    let (_, body) = send(&app, "GET", "/books", None).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_thirteen_digit_isbn_accepted() {
    let app = app();
    let mut payload = book("Long ISBN");
    payload["isbn"] = json!("9780306406157");

    let (status, _) = send(&app, "POST", "/books", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = app();
    let (status, body) = send(&app, "POST", "/books", Some(json!({ "title": 42 }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
async fn test_out_of_range_positions_are_not_found() {
    let app = app();
    send(&app, "POST", "/books", Some(book("only"))).await;

    let (status, body) = send(&app, "POST", "/books/3/edit", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchRecord");

    let (status, _) = send(&app, "DELETE", "/books/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", "/books", None).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["mode"], "creating");
}

#[tokio::test]
async fn test_deleting_edited_book_returns_form_to_add_mode() {
    let app = app();
    send(&app, "POST", "/books", Some(book("one"))).await;
    send(&app, "POST", "/books", Some(book("two"))).await;

    send(&app, "POST", "/books/1/edit", None).await;
    send(&app, "DELETE", "/books/1", None).await;

    let (_, form) = send(&app, "GET", "/books/form", None).await;
    assert_eq!(form["heading"], "Add Book");
    assert_eq!(form["values"]["title"], "");

    let (status, body) = send(&app, "POST", "/books", Some(book("three"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["entry"]["position"], 1);
}

#[tokio::test]
async fn test_edit_follows_record_when_earlier_book_deleted() {
    let app = app();
    for title in ["one", "two", "three"] {
        send(&app, "POST", "/books", Some(book(title))).await;
    }

    send(&app, "POST", "/books/2/edit", None).await;
    send(&app, "DELETE", "/books/0", None).await;

    let (status, body) = send(&app, "POST", "/books", Some(book("THREE"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entry"]["position"], 1);

    let (_, body) = send(&app, "GET", "/books", None).await;
    let titles: Vec<&str> = body["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["book"]["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["two", "THREE"]);
}

#[tokio::test]
async fn test_cancel_edit() {
    let app = app();
    send(&app, "POST", "/authors", Some(json!({
        "authorName": "Italo Calvino",
        "birthDate": "1923-10-15"
    })))
    .await;

    let (_, form) = send(&app, "POST", "/authors/0/edit", None).await;
    assert_eq!(form["heading"], "Edit Author");
    assert_eq!(form["values"]["authorName"], "Italo Calvino");

    let (status, form) = send(&app, "DELETE", "/authors/edit", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(form["heading"], "Add Author");
    assert_eq!(form["submit_label"], "Add");
    assert_eq!(form["mode"], "creating");
}

#[tokio::test]
async fn test_author_validation() {
    let app = app();

    let (status, body) = send(&app, "POST", "/authors", Some(json!({
        "authorName": "",
        "birthDate": tomorrow(),
        "biography": "Too short."
    })))
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fields"]["authorName"], "Author name is required");
    assert_eq!(body["fields"]["birthDate"], "Birth date cannot be in the future");
    assert_eq!(
        body["fields"]["biography"],
        "Biography must be at least 100 characters long"
    );
}

#[tokio::test]
async fn test_biography_rule_from_config() {
    let mut config = AppConfig::default();
    config.validation.biography_rule = BiographyRule::Max;
    let app = create_router(AppState::new(config));

    let (status, body) = send(&app, "POST", "/authors", Some(json!({
        "authorName": "Jorge Luis Borges",
        "birthDate": "1899-08-24",
        "biography": "Argentine writer."
    })))
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body["entry"]["summary"],
        "Jorge Luis Borges (Born: 1899-08-24) - Argentine writer."
    );

    let (status, body) = send(&app, "POST", "/authors", Some(json!({
        "authorName": "Jorge Luis Borges",
        "birthDate": "1899-08-24",
        "biography": "x".repeat(101)
    })))
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["fields"]["biography"],
        "Biography must be at most 100 characters long"
    );
}

#[tokio::test]
async fn test_book_and_author_stores_are_independent() {
    let app = app();
    send(&app, "POST", "/books", Some(book("one"))).await;
    send(&app, "POST", "/books/0/edit", None).await;

    let (_, authors) = send(&app, "GET", "/authors", None).await;
    assert_eq!(authors["total"], 0);
    assert_eq!(authors["mode"], "creating");

    let (_, health) = send(&app, "GET", "/health", None).await;
    assert_eq!(health["books"], 1);
    assert_eq!(health["authors"], 0);
}

#[tokio::test]
async fn test_non_numeric_position_is_bad_request() {
    let app = app();
    send(&app, "POST", "/books", Some(book("only"))).await;

    let (status, body) = send(&app, "DELETE", "/books/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
    assert_eq!(body["code"], 18);

    let (status, body) = send(&app, "POST", "/authors/-1/edit", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");

    let (_, body) = send(&app, "GET", "/books", None).await;
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn test_author_add_edit_delete_scenario() {
    let app = app();
    let calvino = json!({
        "authorName": "Italo Calvino",
        "birthDate": "1923-10-15",
        "biography": ""
    });
    let borges = json!({
        "authorName": "Jorge Luis Borges",
        "birthDate": "1899-08-24",
        "biography": ""
    });

    let (status, body) = send(&app, "POST", "/authors", Some(calvino.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["entry"]["author"], calvino);
    let id = body["entry"]["id"].clone();
    send(&app, "POST", "/authors", Some(borges.clone())).await;

    let (status, form) = send(&app, "POST", "/authors/0/edit", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(form["values"], calvino);

    let mut renamed = calvino.clone();
    renamed["authorName"] = json!("Italo Calvino Mameli");
    let (status, body) = send(&app, "POST", "/authors", Some(renamed.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["action"], "updated");
    assert_eq!(body["entry"]["id"], id);
    assert_eq!(body["entry"]["position"], 0);

    let (_, body) = send(&app, "GET", "/authors", None).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["mode"], "creating");
    assert_eq!(body["authors"][0]["author"], renamed);
    assert_eq!(body["authors"][1]["author"], borges);

    let (status, _) = send(&app, "DELETE", "/authors/0", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, "GET", "/authors", None).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["authors"][0]["position"], 0);
    assert_eq!(body["authors"][0]["author"], borges);
}
