//! Integration tests for account and balance lookups

use super::*;
use serde_json::json;
use wiremock::matchers::header;

#[tokio::test]
async fn test_account_integration_success() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "user/account")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "user-1234",
            "email": "someone@example.com",
            "profile_picture": "https://example.com/me.png",
            "organizations": [
                {"id": "org-1", "name": "Personal", "role": "OWNER", "is_default": true},
                {"id": "org-2", "name": "Studio", "role": "MEMBER", "is_default": false}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let account = client.user().account().await.unwrap();

    assert_eq!(account.email, "someone@example.com");
    assert_eq!(account.organizations.len(), 2);
    assert_eq!(
        account.default_organization().map(|o| o.id.as_str()),
        Some("org-1")
    );
}

#[tokio::test]
async fn test_balance_integration_with_organization() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "user/balance")
        .and(header("Organization", "org-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"credits": 42.5})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let balance = client.user().balance(Some("org-2")).await.unwrap();

    assert!((balance.credits - 42.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_balance_integration_without_organization() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "user/balance")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"credits": 0})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let balance = client.user().balance(None).await.unwrap();
    assert!(balance.credits.abs() < f64::EPSILON);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("Organization").is_none());
}

#[tokio::test]
async fn test_balance_integration_server_error() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "user/balance")
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let error = client.user().balance(None).await.unwrap_err();

    assert_eq!(error.status(), Some(500));
    assert!(error.is_server_error());
}
