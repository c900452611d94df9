use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};
use servicedesk_core::{Email, EmailMessage, EmailSender, EmailSenderError};

pub struct PostmarkEmailClient {
    http_client: Client,
    base_url: String,
    sender: Email,
    authorization_token: Secret<String>,
}

impl PostmarkEmailClient {
    pub fn new(
        base_url: String,
        sender: Email,
        authorization_token: Secret<String>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            authorization_token,
        }
    }
}

#[async_trait::async_trait]
impl EmailSender for PostmarkEmailClient {
    #[tracing::instrument(name = "Sending email", skip_all)]
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailSenderError> {
        let failed = |e: &dyn std::fmt::Display| EmailSenderError::DeliveryFailed(e.to_string());
        let base = Url::parse(&self.base_url).map_err(|e| failed(&e))?;
        let url = base.join("/email").map_err(|e| failed(&e))?;

        let to = message
            .recipients()
            .iter()
            .map(|recipient| recipient.as_ref().expose_secret().as_str())
            .collect::<Vec<_>>()
            .join(",");

        let request_body = SendEmailRequest {
            from: self.sender.as_ref().expose_secret(),
            to: &to,
            subject: message.subject(),
            html_body: message.body(),
            text_body: message.body(),
            message_stream: MESSAGE_STREAM,
        };

        let request = self
            .http_client
            .post(url)
            .header(
                POSTMARK_AUTH_HEADER,
                self.authorization_token.expose_secret(),
            )
            .json(&request_body);

        request
            .send()
            .await
            .map_err(|e| failed(&e))?
            .error_for_status()
            .map_err(|e| failed(&e))?;

        Ok(())
    }
}

const MESSAGE_STREAM: &str = "outbound";
const POSTMARK_AUTH_HEADER: &str = "X-Postmark-Server-Token";

#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
    message_stream: &'a str,
}
