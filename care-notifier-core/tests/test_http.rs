mod common;
pub use common::*;

use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

#[tokio::test]
#[ignore = "requires running care-notifier-core"]
async fn max_content_length_http() {
    init_env();

    let max_content_len: usize = std::env::var("CARE_NOTIFIER_CORE_MAX_HTTP_CONTENT_LEN")
        .unwrap()
        .parse()
        .unwrap();

    // content does not matter, it should be rejected because of its size
    let content = "0".repeat(max_content_len + 1);

    let response = Client::new()
        .post(format!("http://{}/api/v1/notifications", address()))
        .bearer_auth(create_producer_jwt())
        .header(CONTENT_TYPE, "application/json")
        .body(content)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
#[ignore = "requires running care-notifier-core"]
async fn notification_lifecycle() {
    init_env();

    let client = Client::new();
    let user_id = Uuid::new_v4();
    let consumer_jwt = create_consumer_jwt_with_id(user_id);
    let notifications_url = format!("http://{}/api/v1/notifications", address());

    // produce
    let response = client
        .post(&notifications_url)
        .bearer_auth(create_producer_jwt())
        .json(&json!({
            "userId": user_id,
            "title": "Appointment confirmed",
            "message": "See you on Monday",
            "type": "success",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response.json::<Value>().await.unwrap();
    let id = body["id"].as_str().unwrap().to_string();

    // list
    let body = client
        .get(&notifications_url)
        .bearer_auth(&consumer_jwt)
        .send()
        .await
        .unwrap()
        .json::<Value>()
        .await
        .unwrap();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["unreadCount"], json!(1));
    assert_eq!(body["notifications"][0]["id"], json!(id));

    // mark read
    let response = client
        .patch(format!("{notifications_url}/{id}/read"))
        .bearer_auth(&consumer_jwt)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // other user cannot delete it
    let response = client
        .delete(format!("{notifications_url}/{id}"))
        .bearer_auth(create_consumer_jwt_with_id(Uuid::new_v4()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // delete
    let response = client
        .delete(format!("{notifications_url}/{id}"))
        .bearer_auth(&consumer_jwt)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = client
        .get(&notifications_url)
        .bearer_auth(&consumer_jwt)
        .send()
        .await
        .unwrap()
        .json::<Value>()
        .await
        .unwrap();
    assert_eq!(body["unreadCount"], json!(0));
    assert_eq!(body["notifications"], json!([]));
}
