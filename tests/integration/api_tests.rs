//! API integration tests
//!
//! Require a running server and a provisioned account:
//!   create-user --login admin --password admin --store-spot sch

use reqwest::{multipart, Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";
const XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Helper to get an authenticated client
async fn get_auth_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "user_id": "admin",
            "password": "admin",
            "store_spot": "sch"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["access_token"].as_str().expect("No token in response").to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "user_id": "admin",
            "password": "admin",
            "store_spot": "sch"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["access_token"].is_string());
    assert_eq!(body["token_type"], "bearer");
}

#[tokio::test]
#[ignore]
async fn test_login_rejects_each_wrong_factor() {
    let client = Client::new();

    for (user_id, password, store_spot) in [
        ("nobody", "admin", "sch"),
        ("admin", "wrong", "sch"),
        ("admin", "admin", "kongju"),
    ] {
        let response = client
            .post(format!("{}/auth/login", BASE_URL))
            .json(&json!({
                "user_id": user_id,
                "password": password,
                "store_spot": store_spot
            }))
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()["www-authenticate"], "Bearer");
    }
}

#[tokio::test]
#[ignore]
async fn test_store_spots() {
    let client = Client::new();

    let body: Value = client
        .get(format!("{}/auth/store-spots", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(body, json!(["sch", "sunmoon", "nasaret", "kongju", "mokwon"]));
}

#[tokio::test]
#[ignore]
async fn test_mutations_require_token() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({ "store_spot": "sch", "book_title": "Unauthorized" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", "Bearer not-a-token")
        .json(&json!({ "store_spot": "sch", "book_title": "Unauthorized" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_create_search_and_delete_book() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    // Create book
    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "store_spot": "sch",
            "book_title": "Introduction to Algorithms (integration)",
            "author": "Cormen",
            "publisher": "MIT Press",
            "request_count": 10,
            "received_count": 5,
            "price": 52000
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    let book_id = body["added_book"]["inserted_id"]
        .as_str()
        .expect("No book ID")
        .to_string();

    // Point lookup returns the submitted fields
    let book: Value = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(book["author"], "Cormen");
    assert_eq!(book["price"], 52000);
    assert_eq!(book["fulfillment_rate"], 0.5);

    // Case-insensitive substring search
    let response = client
        .get(format!("{}/books/search/INTRODUCTION?store_spot=sch", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["books"]
        .as_array()
        .expect("books array")
        .iter()
        .any(|b| b["id"] == book_id.as_str()));

    // Soft delete, then a second delete is a 404
    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_search_without_match_is_not_found() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books/search/zzzz-no-such-title-zzzz", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_upload_rejects_non_spreadsheet() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let part = multipart::Part::bytes(b"title,author\n".to_vec())
        .file_name("books.csv")
        .mime_str("text/csv")
        .expect("valid mime");
    let form = multipart::Form::new().part("file", part);

    let response = client
        .post(format!("{}/books/upload/excel?store_spot=sch", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_upload_rejects_unreadable_workbook() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let part = multipart::Part::bytes(b"not really a workbook".to_vec())
        .file_name("books.xlsx")
        .mime_str(XLSX)
        .expect("valid mime");
    let form = multipart::Form::new().part("file", part);

    let response = client
        .post(format!("{}/books/upload/excel?store_spot=sch", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
