//! Installment lookup types shared by the payment use case and gateway adapters.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const BIN_LENGTH: usize = 6;

#[derive(Debug, Error, PartialEq)]
pub enum InstallmentError {
    #[error("Card number must contain at least {BIN_LENGTH} digits")]
    BinTooShort,
    #[error("Card number must contain digits only")]
    BinNotNumeric,
    #[error("Invalid price: {0}")]
    InvalidPrice(String),
}

/// Bank identification number: the first six digits of a card number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BinNumber(String);

impl BinNumber {
    /// Accepts a BIN or a full card number and keeps the first six digits.
    pub fn parse(value: &str) -> Result<Self, InstallmentError> {
        let digits: String = value.chars().filter(|c| !c.is_whitespace()).collect();
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(InstallmentError::BinNotNumeric);
        }
        if digits.len() < BIN_LENGTH {
            return Err(InstallmentError::BinTooShort);
        }
        Ok(Self(digits[..BIN_LENGTH].to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A non-negative amount with at most two fractional digits, kept in minor units.
///
/// Formatting is culture-invariant: `.` as the decimal separator, no grouping,
/// no trailing zeros (`1000`, `1000.5`, `1000.25`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Price {
    minor_units: u64,
}

impl Price {
    pub fn from_minor_units(minor_units: u64) -> Self {
        Self { minor_units }
    }

    /// `None` when the amount does not fit in minor units.
    pub fn from_major_units(units: u64) -> Option<Self> {
        units.checked_mul(100).map(Self::from_minor_units)
    }

    pub fn minor_units(&self) -> u64 {
        self.minor_units
    }

    pub fn parse(value: &str) -> Result<Self, InstallmentError> {
        let invalid = || InstallmentError::InvalidPrice(value.to_owned());
        let value = value.trim();
        let (whole, fraction) = match value.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (value, ""),
        };
        if whole.is_empty()
            || fraction.len() > 2
            || !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }
        let whole: u64 = whole.parse().map_err(|_| invalid())?;
        let fraction: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };
        whole
            .checked_mul(100)
            .and_then(|v| v.checked_add(fraction))
            .map(Self::from_minor_units)
            .ok_or_else(invalid)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.minor_units / 100;
        let fraction = self.minor_units % 100;
        match fraction {
            0 => write!(f, "{whole}"),
            f10 if f10 % 10 == 0 => write!(f, "{whole}.{}", f10 / 10),
            _ => write!(f, "{whole}.{fraction:02}"),
        }
    }
}

impl Serialize for Price {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        let raw = Raw::deserialize(deserializer)?;
        let text = match raw {
            Raw::Text(text) => text,
            Raw::Number(number) => number.to_string(),
        };
        Price::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Request body for the gateway's installment lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentInfoRequest {
    pub locale: String,
    pub conversation_id: String,
    pub bin_number: BinNumber,
    pub price: Price,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentInfoResponse {
    pub status: String,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub installment_details: Vec<InstallmentDetail>,
}

impl InstallmentInfoResponse {
    pub fn is_failure(&self) -> bool {
        self.status.eq_ignore_ascii_case("failure")
    }
}

/// One card programme returned for a BIN, with its available installment tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentDetail {
    pub bin_number: String,
    pub price: f64,
    #[serde(default)]
    pub card_type: Option<String>,
    #[serde(default)]
    pub card_association: Option<String>,
    #[serde(default)]
    pub card_family_name: Option<String>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub bank_code: Option<i64>,
    #[serde(default, rename = "force3ds", with = "int_bool")]
    pub force_3ds: bool,
    #[serde(default, with = "int_bool")]
    pub force_cvc: bool,
    #[serde(default, with = "int_bool")]
    pub commercial: bool,
    #[serde(default)]
    pub installment_prices: Vec<InstallmentPrice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentPrice {
    pub installment_number: u32,
    pub installment_price: f64,
    pub total_price: f64,
}

/// Installment options for a BIN and price. All tiers returned by the gateway
/// are kept; [`InstallmentModel::primary`] gives the first one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentModel {
    pub conversation_id: String,
    pub installment_details: Vec<InstallmentDetail>,
}

impl InstallmentModel {
    pub fn primary(&self) -> Option<&InstallmentDetail> {
        self.installment_details.first()
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Payment gateway unreachable: {message}")]
    Transport { message: String, retryable: bool },
    #[error("Payment gateway error: {message}")]
    Upstream {
        code: Option<String>,
        message: String,
    },
    #[error("Payment gateway response does not match the request")]
    IntegrityMismatch,
    #[error("Payment gateway returned no installment options")]
    EmptyResponse,
    #[error("Payment gateway returned an invalid response: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GatewayError::Transport {
                retryable: true,
                ..
            }
        )
    }
}

/// The gateway encodes flags as 0/1 integers.
mod int_bool {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(i64::deserialize(deserializer)? != 0)
    }
}
