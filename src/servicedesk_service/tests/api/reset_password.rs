use serde_json::{Value, json};
use servicedesk_application::RESET_PASSWORD_SUCCESS;

use crate::helpers::{TestApp, callback_path, query_param};

#[tokio::test]
async fn should_reset_password_through_emailed_link() {
    let app = TestApp::new().await;
    app.register("ada", "ada@example.com", "pass1").await;

    let response = app
        .post_json("/account/reset-password", &json!({ "email": "ADA@example.com" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let link = callback_path(&app.last_email().await, &app.address);
    assert!(link.starts_with("/account/confirm-reset-password?"));

    let form = app.get(&link).await;
    assert_eq!(form.status().as_u16(), 200);
    let form: Value = form.json().await.unwrap();
    assert_eq!(form["userId"], query_param(&link, "userId"));
    assert_eq!(form["code"], query_param(&link, "code"));

    let reset = app
        .post_json(
            "/account/confirm-reset-password",
            &json!({
                "userId": form["userId"],
                "code": form["code"],
                "newPassword": "fresh1",
                "confirmNewPassword": "fresh1",
            }),
        )
        .await;
    assert_eq!(reset.status().as_u16(), 200);
    let body: Value = reset.json().await.unwrap();
    assert_eq!(body["message"], RESET_PASSWORD_SUCCESS);

    assert_eq!(app.login("ada", "pass1").await.status().as_u16(), 401);
    assert_eq!(app.login("ada", "fresh1").await.status().as_u16(), 303);
}

#[tokio::test]
async fn should_reject_reused_reset_code() {
    let app = TestApp::new().await;
    app.register("ada", "ada@example.com", "pass1").await;
    app.post_json("/account/reset-password", &json!({ "email": "ada@example.com" }))
        .await;
    let link = callback_path(&app.last_email().await, &app.address);
    let request = json!({
        "userId": query_param(&link, "userId"),
        "code": query_param(&link, "code"),
        "newPassword": "fresh1",
        "confirmNewPassword": "fresh1",
    });

    let first = app.post_json("/account/confirm-reset-password", &request).await;
    assert_eq!(first.status().as_u16(), 200);

    let second = app.post_json("/account/confirm-reset-password", &request).await;
    assert_eq!(second.status().as_u16(), 400);
}

#[tokio::test]
async fn should_not_send_email_for_unknown_address() {
    let app = TestApp::new().await;

    let response = app
        .post_json("/account/reset-password", &json!({ "email": "nobody@example.com" }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "No user is associated with this email address.");
    assert!(app.email_sender.sent().await.is_empty());
}

#[tokio::test]
async fn should_return_400_for_form_without_parameters() {
    let app = TestApp::new().await;

    let response = app.get("/account/confirm-reset-password?userId=abc").await;

    assert_eq!(response.status().as_u16(), 400);
}
