use fake::{Fake, faker::internet::en::SafeEmail};
use secrecy::ExposeSecret;
use serde_json::{Value, json};
use servicedesk_application::notifications::CONFIRM_EMAIL_SUBJECT;

use crate::helpers::{TestApp, callback_path};

#[tokio::test]
async fn should_redirect_to_login_after_registering() {
    let app = TestApp::new().await;

    let response = app.register("ada", "ada@example.com", "pass1").await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(response.headers()["location"], "/account/login");

    let email = app.last_email().await;
    assert_eq!(email.subject(), CONFIRM_EMAIL_SUBJECT);
    assert!(email.body().contains("/account/confirm-email?userId="));
}

#[tokio::test]
async fn should_return_409_for_duplicate_email() {
    let app = TestApp::new().await;
    let email: String = SafeEmail().fake();
    app.register("ada", &email, "pass1").await;

    let response = app
        .register("grace", &email.to_uppercase(), "pass1")
        .await;

    assert_eq!(response.status().as_u16(), 409);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["fields"][0]["field"], "email");
    assert_eq!(app.email_sender.sent().await.len(), 1);
}

#[tokio::test]
async fn should_return_409_for_duplicate_username() {
    let app = TestApp::new().await;
    app.register("ada", "ada@example.com", "pass1").await;

    let response = app.register("ADA", "other@example.com", "pass1").await;

    assert_eq!(response.status().as_u16(), 409);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["fields"][0]["field"], "userName");
}

#[tokio::test]
async fn should_return_400_for_invalid_registration() {
    let app = TestApp::new().await;

    let response = app
        .post_json(
            "/account/register",
            &json!({
                "userName": "ada",
                "email": "not-an-email",
                "name": "",
                "surname": "Lovelace",
                "password": "pass1",
                "confirmPassword": "pass2",
            }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"confirmPassword"));
    assert!(app.email_sender.sent().await.is_empty());
}

#[tokio::test]
async fn should_confirm_email_from_link() {
    let app = TestApp::new().await;
    app.register("ada", "ada@example.com", "pass1").await;
    let link = callback_path(&app.last_email().await, &app.address);

    let response = app.get(&link).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["succeeded"], true);

    let reused = app.get(&link).await;
    let body: Value = reused.json().await.unwrap();
    assert_eq!(body["succeeded"], false);
}

#[tokio::test]
async fn should_redirect_home_when_confirmation_parameters_are_missing() {
    let app = TestApp::new().await;

    let response = app.get("/account/confirm-email").await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(response.headers()["location"], "/");
}

#[tokio::test]
async fn should_return_404_when_confirming_unknown_user() {
    let app = TestApp::new().await;
    let user_id = uuid::Uuid::new_v4();

    let response = app
        .get(&format!("/account/confirm-email?userId={user_id}&code=abc"))
        .await;

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn should_set_session_cookie_on_login() {
    let app = TestApp::new().await;
    app.register("ada", "ada@example.com", "pass1").await;

    let response = app.login("ada", "pass1").await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(response.headers()["location"], "/");
    assert!(app.session_cookie().is_some());
}

#[tokio::test]
async fn should_return_401_for_wrong_password() {
    let app = TestApp::new().await;
    app.register("ada", "ada@example.com", "pass1").await;

    let response = app.login("ada", "wrong").await;

    assert_eq!(response.status().as_u16(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid username or password.");
    assert!(app.session_cookie().is_none());
}

#[tokio::test]
async fn should_redirect_anonymous_profile_requests_to_login() {
    let app = TestApp::new().await;

    let response = app.get("/account/profile").await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(response.headers()["location"], "/account/login");
}

#[tokio::test]
async fn should_return_profile_for_signed_in_user() {
    let app = TestApp::new().await;
    app.signed_in("ada", "ada@example.com").await;

    let response = app.get("/account/profile").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["userName"], "ada");
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["emailConfirmed"], false);
}

#[tokio::test]
async fn should_resend_confirmation_after_email_change() {
    let app = TestApp::new().await;
    app.signed_in("ada", "ada@example.com").await;

    let response = app
        .post_json(
            "/account/profile",
            &json!({ "name": "Ada", "surname": "Lovelace", "email": "ada@new.example.com" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["emailChanged"], true);
    assert_eq!(body["profile"]["surname"], "Lovelace");

    let email = app.last_email().await;
    assert_eq!(email.recipients()[0].as_ref().expose_secret(), "ada@new.example.com");
}

#[tokio::test]
async fn should_invalidate_session_on_logout() {
    let app = TestApp::new().await;
    app.signed_in("ada", "ada@example.com").await;
    let token = app.session_cookie().unwrap();

    let response = app.post_json("/account/logout", &json!({})).await;
    assert_eq!(response.status().as_u16(), 303);
    assert!(app.session_cookie().is_none());

    let replayed = app
        .http_client
        .get(format!("{}/account/profile", app.address))
        .header("cookie", format!("{}={token}", crate::helpers::COOKIE_NAME))
        .send()
        .await
        .unwrap();
    assert_eq!(replayed.status().as_u16(), 303);
    assert_eq!(replayed.headers()["location"], "/account/login");
}

#[tokio::test]
async fn should_sign_out_after_password_update() {
    let app = TestApp::new().await;
    app.signed_in("ada", "ada@example.com").await;

    let response = app
        .post_json(
            "/account/update-password",
            &json!({
                "oldPassword": "pass1",
                "newPassword": "pass2",
                "confirmPassword": "pass2",
            }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(response.headers()["location"], "/account/login");
    assert!(app.session_cookie().is_none());

    assert_eq!(app.login("ada", "pass1").await.status().as_u16(), 401);
    assert_eq!(app.login("ada", "pass2").await.status().as_u16(), 303);
}

#[tokio::test]
async fn should_reject_password_update_with_wrong_old_password() {
    let app = TestApp::new().await;
    app.signed_in("ada", "ada@example.com").await;

    let response = app
        .post_json(
            "/account/update-password",
            &json!({
                "oldPassword": "nope1",
                "newPassword": "pass2",
                "confirmPassword": "pass2",
            }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
    assert!(app.session_cookie().is_some());
}

#[tokio::test]
async fn should_refresh_session_after_half_its_lifetime() {
    let app = TestApp::with_session_expiry(4).await;
    app.signed_in("ada", "ada@example.com").await;
    let issued = app.session_cookie().unwrap();

    let early = app.get("/account/profile").await;
    assert_eq!(early.status().as_u16(), 200);
    assert!(early.headers().get("set-cookie").is_none());

    tokio::time::sleep(std::time::Duration::from_millis(2100)).await;

    let late = app.get("/account/profile").await;
    assert_eq!(late.status().as_u16(), 200);
    assert!(late.headers().get("set-cookie").is_some());
    assert_ne!(app.session_cookie().unwrap(), issued);
}
