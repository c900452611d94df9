use serde_json::Value;

use crate::helpers::TestApp;

#[tokio::test]
async fn should_show_dashboard_to_first_user() {
    let app = TestApp::new().await;
    app.signed_in("ada", "ada@example.com").await;
    app.register("bob", "bob@example.com", "pass1").await;

    let response = app.get("/admin/manage").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["userCount"], 2);
    assert_eq!(body["unconfirmedCount"], 2);
}

#[tokio::test]
async fn should_list_users_with_roles() {
    let app = TestApp::new().await;
    app.signed_in("ada", "ada@example.com").await;
    app.register("bob", "bob@example.com", "pass1").await;

    let response = app.get("/admin/manage/users").await;

    assert_eq!(response.status().as_u16(), 200);
    let users: Vec<Value> = response.json().await.unwrap();
    assert_eq!(users.len(), 2);
    let bob = users.iter().find(|u| u["userName"] == "bob").unwrap();
    assert_eq!(bob["roles"], serde_json::json!(["Passive"]));
}

#[tokio::test]
async fn should_send_non_admins_to_access_denied() {
    let app = TestApp::new().await;
    app.register("ada", "ada@example.com", "pass1").await;
    app.signed_in("bob", "bob@example.com").await;

    let response = app.get("/admin/manage").await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(response.headers()["location"], "/account/access-denied");

    let denied = app.get("/account/access-denied").await;
    assert_eq!(denied.status().as_u16(), 403);
}

#[tokio::test]
async fn should_send_anonymous_users_to_login() {
    let app = TestApp::new().await;

    let response = app.get("/admin/manage/users").await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(response.headers()["location"], "/account/login");
}
