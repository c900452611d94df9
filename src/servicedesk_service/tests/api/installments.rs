use serde_json::{Value, json};
use wiremock::{
    Mock, Request, Respond, ResponseTemplate,
    matchers::{header_exists, method, path},
};

use crate::helpers::TestApp;

/// Answers like the gateway does, echoing the caller's conversation id.
struct InstallmentResponder;

impl Respond for InstallmentResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap();
        ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "locale": body["locale"],
            "conversationId": body["conversationId"],
            "installmentDetails": [{
                "binNumber": body["binNumber"],
                "price": 1000.0,
                "cardType": "CREDIT_CARD",
                "cardAssociation": "MASTER_CARD",
                "cardFamilyName": "Bonus",
                "force3ds": 0,
                "bankCode": 62,
                "bankName": "Garanti Bankasi",
                "forceCvc": 0,
                "commercial": 0,
                "installmentPrices": [
                    {"installmentNumber": 1, "installmentPrice": 1000.0, "totalPrice": 1000.0},
                    {"installmentNumber": 3, "installmentPrice": 340.0, "totalPrice": 1020.0}
                ]
            }]
        }))
    }
}

#[tokio::test]
async fn should_return_installment_options() {
    let app = TestApp::new().await;
    Mock::given(path("/payment/iyzipos/installment"))
        .and(method("POST"))
        .and(header_exists("authorization"))
        .and(header_exists("x-iyzi-rnd"))
        .respond_with(InstallmentResponder)
        .expect(1)
        .mount(&app.payment_server)
        .await;

    let response = app
        .post_json(
            "/payment/installments",
            &json!({ "binNumber": "5528790000000008", "price": "1000" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    let details = &body["installmentDetails"];
    assert_eq!(details[0]["binNumber"], "552879");
    assert_eq!(details[0]["bankName"], "Garanti Bankasi");
    assert_eq!(details[0]["installmentPrices"][1]["totalPrice"], 1020.0);
}

#[tokio::test]
async fn should_return_400_for_short_bin() {
    let app = TestApp::new().await;
    Mock::given(method("POST"))
        .respond_with(InstallmentResponder)
        .expect(0)
        .mount(&app.payment_server)
        .await;

    let response = app
        .post_json("/payment/installments", &json!({ "binNumber": "5528", "price": 1000 }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["fields"][0]["field"], "binNumber");
}

#[tokio::test]
async fn should_return_502_for_gateway_failure() {
    let app = TestApp::new().await;
    Mock::given(method("POST"))
        .respond_with(|request: &Request| {
            let body: Value = serde_json::from_slice(&request.body).unwrap();
            ResponseTemplate::new(200).set_body_json(json!({
                "status": "failure",
                "conversationId": body["conversationId"],
                "errorCode": "5",
                "errorMessage": "Invalid request"
            }))
        })
        .mount(&app.payment_server)
        .await;

    let response = app
        .post_json("/payment/installments", &json!({ "binNumber": "552879", "price": 1000 }))
        .await;

    assert_eq!(response.status().as_u16(), 502);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["retryable"], false);
}

#[tokio::test]
async fn should_reject_mismatched_conversation_id() {
    let app = TestApp::new().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "conversationId": "someone-else",
            "installmentDetails": []
        })))
        .mount(&app.payment_server)
        .await;

    let response = app
        .post_json("/payment/installments", &json!({ "binNumber": "552879", "price": 1000 }))
        .await;

    assert_eq!(response.status().as_u16(), 502);
}

#[tokio::test]
async fn should_flag_unavailable_gateway_as_retryable() {
    let app = TestApp::new().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&app.payment_server)
        .await;

    let response = app
        .post_json("/payment/installments", &json!({ "binNumber": "552879", "price": 1000 }))
        .await;

    assert_eq!(response.status().as_u16(), 502);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["retryable"], true);
}
