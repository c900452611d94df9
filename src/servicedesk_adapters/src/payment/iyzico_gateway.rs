use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use rand::{Rng, distr::Alphanumeric};
use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, Secret};
use servicedesk_core::{GatewayError, InstallmentInfoRequest, InstallmentInfoResponse, PaymentGateway};
use sha2::Sha256;

const INSTALLMENT_PATH: &str = "/payment/iyzipos/installment";
const AUTHORIZATION_SCHEME: &str = "IYZWSv2";
const RANDOM_HEADER: &str = "x-iyzi-rnd";
const RANDOM_KEY_LENGTH: usize = 16;

type HmacSha256 = Hmac<Sha256>;

/// Client for the iyzico installment lookup, signing every request with the
/// IYZWSv2 scheme.
pub struct IyzicoPaymentGateway {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
    secret_key: Secret<String>,
}

impl IyzicoPaymentGateway {
    pub fn new(
        base_url: String,
        api_key: Secret<String>,
        secret_key: Secret<String>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            api_key,
            secret_key,
        }
    }

    fn signature(&self, random_key: &str, body: &str) -> Result<String, GatewayError> {
        let mut mac = HmacSha256::new_from_slice(self.secret_key.expose_secret().as_bytes())
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        mac.update(random_key.as_bytes());
        mac.update(INSTALLMENT_PATH.as_bytes());
        mac.update(body.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    fn authorization(&self, random_key: &str, body: &str) -> Result<String, GatewayError> {
        let signature = self.signature(random_key, body)?;
        let credentials = format!(
            "apiKey:{}&randomKey:{random_key}&signature:{signature}",
            self.api_key.expose_secret()
        );
        Ok(format!("{AUTHORIZATION_SCHEME} {}", STANDARD.encode(credentials)))
    }
}

fn random_key() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(RANDOM_KEY_LENGTH)
        .map(char::from)
        .collect()
}

fn transport(error: reqwest::Error) -> GatewayError {
    GatewayError::Transport {
        message: error.to_string(),
        retryable: true,
    }
}

#[async_trait::async_trait]
impl PaymentGateway for IyzicoPaymentGateway {
    #[tracing::instrument(
        name = "Retrieving installment info",
        skip_all,
        fields(conversation_id = %request.conversation_id)
    )]
    async fn retrieve_installment_info(
        &self,
        request: &InstallmentInfoRequest,
    ) -> Result<InstallmentInfoResponse, GatewayError> {
        let url = Url::parse(&self.base_url)
            .and_then(|base| base.join(INSTALLMENT_PATH))
            .map_err(|e| GatewayError::Transport {
                message: e.to_string(),
                retryable: false,
            })?;

        let body = serde_json::to_string(request)
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        let random_key = random_key();
        let authorization = self.authorization(&random_key, &body)?;

        let response = self
            .http_client
            .post(url)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .header(RANDOM_HEADER, &random_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if status.is_server_error() {
            tracing::warn!(%status, "Payment gateway server error");
            return Err(GatewayError::Transport {
                message: format!("gateway responded with {status}"),
                retryable: true,
            });
        }

        let bytes = response.bytes().await.map_err(transport)?;
        match serde_json::from_slice::<InstallmentInfoResponse>(&bytes) {
            Ok(parsed) => Ok(parsed),
            Err(_) if status != StatusCode::OK => Err(GatewayError::Upstream {
                code: None,
                message: format!("gateway responded with {status}"),
            }),
            Err(e) => Err(GatewayError::InvalidResponse(e.to_string())),
        }
    }
}
