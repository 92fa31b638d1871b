//! API integration tests
//!
//! Each test serves a freshly seeded router on an ephemeral port and
//! exercises it with reqwest.

use bookstore_server::{api, models::Book, repository::Repository, services::Services, AppState};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

async fn start_server(repository: Repository) -> String {
    let state = AppState::new(Services::new(repository));
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn seeded_server() -> String {
    start_server(Repository::seeded()).await
}

async fn ids(client: &Client, base: &str) -> Vec<i64> {
    let body: Value = client
        .get(format!("{base}/books"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    body.as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let base = seeded_server().await;
    let client = Client::new();

    let response = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");

    let body: Value = client
        .get(format!("{base}/ready"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["books"], 3);
}

#[tokio::test]
async fn test_list_books() {
    let base = seeded_server().await;
    let client = Client::new();

    let response = client.get(format!("{base}/books")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let books: Vec<Book> = response.json().await.unwrap();
    assert_eq!(books, Book::seed());
}

#[tokio::test]
async fn test_get_book() {
    let base = seeded_server().await;
    let client = Client::new();

    let response = client.get(format!("{base}/books/1")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "id": 1,
            "title": "Hell Divers",
            "author": "Nicholas Sansbury Smith",
            "quantity": 3
        })
    );
}

#[tokio::test]
async fn test_get_book_errors() {
    let base = seeded_server().await;
    let client = Client::new();

    let response = client.get(format!("{base}/books/abc")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Unable to convert Id" }));

    let response = client.get(format!("{base}/books/99")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Book not found" }));
}

#[tokio::test]
async fn test_checkout_until_out_of_stock() {
    let base = seeded_server().await;
    let client = Client::new();

    for expected in [2, 1, 0] {
        let response = client
            .patch(format!("{base}/checkout?id=1"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["quantity"], expected);
    }

    let response = client
        .patch(format!("{base}/checkout?id=1"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Book out of stock" }));
}

#[tokio::test]
async fn test_checkout_bad_ids() {
    let base = seeded_server().await;
    let client = Client::new();

    let cases = [
        ("/checkout", "Id not valid."),
        ("/checkout?id=", "Unable to convert Id"),
        ("/checkout?id=one", "Unable to convert Id"),
        ("/checkout?id=42", "Book not found"),
    ];

    for (path, message) in cases {
        let response = client.patch(format!("{base}{path}")).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{path}");
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], message, "{path}");
    }
}

#[tokio::test]
async fn test_return_book() {
    let base = seeded_server().await;
    let client = Client::new();

    let response = client
        .patch(format!("{base}/return?id=2"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["quantity"], 6);

    let response = client.patch(format!("{base}/return")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Id not valid." }));

    let response = client
        .patch(format!("{base}/return?id=77"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Book not found" }));
}

#[tokio::test]
async fn test_create_book() {
    let base = seeded_server().await;
    let client = Client::new();

    let new_book = json!({ "id": 4, "title": "Dune", "author": "Herbert", "quantity": 2 });
    let response = client
        .post(format!("{base}/books"))
        .json(&new_book)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, new_book);

    assert_eq!(ids(&client, &base).await, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_create_allows_duplicate_ids() {
    let base = seeded_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{base}/books"))
        .json(&json!({ "id": 1, "title": "Copy", "author": "Someone", "quantity": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    assert_eq!(ids(&client, &base).await, vec![1, 2, 3, 1]);

    // Lookups still resolve to the first record
    let body: Value = client
        .get(format!("{base}/books/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["title"], "Hell Divers");
}

#[tokio::test]
async fn test_create_rejects_malformed_body() {
    let base = seeded_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{base}/books"))
        .header("content-type", "application/json")
        .body("{\"id\": 4, \"title\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["message"].is_string());

    let response = client
        .post(format!("{base}/books"))
        .json(&json!({ "id": "four", "title": "Dune", "author": "Herbert", "quantity": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .post(format!("{base}/books"))
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(ids(&client, &base).await, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_sell_all() {
    let base = seeded_server().await;
    let client = Client::new();

    let response = client
        .delete(format!("{base}/sellAll/3"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let remaining: Vec<Book> = response.json().await.unwrap();
    assert_eq!(remaining.iter().map(|b| b.id).collect::<Vec<_>>(), vec![1, 2]);

    let response = client
        .delete(format!("{base}/sellAll/3"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Book not found" }));
}

#[tokio::test]
async fn test_sell_all_removes_first_duplicate_only() {
    let base = start_server(Repository::new(vec![
        Book::new(5, "A", "X", 1),
        Book::new(6, "B", "Y", 1),
        Book::new(5, "C", "Z", 1),
    ]))
    .await;
    let client = Client::new();

    let response = client
        .delete(format!("{base}/sellAll/5"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let remaining: Vec<Book> = response.json().await.unwrap();
    let titles: Vec<_> = remaining.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["B", "C"]);
}

#[tokio::test]
async fn test_create_fills_missing_fields() {
    let base = seeded_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{base}/books"))
        .json(&json!({ "id": 4, "title": "Dune" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "id": 4, "title": "Dune", "author": "", "quantity": 0 })
    );
}

#[tokio::test]
async fn test_create_without_content_type() {
    let base = seeded_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{base}/books"))
        .body(r#"{"id":4,"title":"Dune","author":"Herbert","quantity":2}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["author"], "Herbert");

    assert_eq!(ids(&client, &base).await, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_repeated_id_parameter_uses_first_value() {
    let base = seeded_server().await;
    let client = Client::new();

    let response = client
        .patch(format!("{base}/checkout?id=1&id=2"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], 1);
    assert_eq!(body["quantity"], 2);

    let response = client
        .patch(format!("{base}/return?id=x&id=2"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()["content-type"],
        "application/json"
    );
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Unable to convert Id" }));
}
