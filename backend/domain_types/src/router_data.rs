use common_enums::AttemptStatus;
use hyperswitch_masking::{ExposeInterface, Secret};

pub type Error = error_stack::Report<crate::errors::ConnectorError>;

/// Static credentials for one gateway.
///
/// Each adapter accepts exactly one shape and maps the generic slots onto its
/// own credential names.
#[derive(Default, Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(tag = "auth_type")]
pub enum ConnectorAuthType {
    HeaderKey {
        api_key: Secret<String>,
    },
    BodyKey {
        api_key: Secret<String>,
        key1: Secret<String>,
    },
    SignatureKey {
        api_key: Secret<String>,
        key1: Secret<String>,
        api_secret: Secret<String>,
    },
    #[default]
    NoKey,
}

impl ConnectorAuthType {
    // show only first and last two characters of the key, mask the rest
    // mask the entire key if it's length is less than or equal to 4
    fn mask_key(key: String) -> Secret<String> {
        let key_len = key.chars().count();
        let masked_key = if key_len <= 4 {
            "*".repeat(key_len)
        } else {
            key.chars()
                .enumerate()
                .map(|(index, character)| {
                    if index < 2 || index >= key_len - 2 {
                        character
                    } else {
                        '*'
                    }
                })
                .collect()
        };
        Secret::new(masked_key)
    }

    /// Copy of the credentials that is safe to print.
    pub fn get_masked_keys(&self) -> Self {
        match self {
            Self::NoKey => Self::NoKey,
            Self::HeaderKey { api_key } => Self::HeaderKey {
                api_key: Self::mask_key(api_key.clone().expose()),
            },
            Self::BodyKey { api_key, key1 } => Self::BodyKey {
                api_key: Self::mask_key(api_key.clone().expose()),
                key1: Self::mask_key(key1.clone().expose()),
            },
            Self::SignatureKey {
                api_key,
                key1,
                api_secret,
            } => Self::SignatureKey {
                api_key: Self::mask_key(api_key.clone().expose()),
                key1: Self::mask_key(key1.clone().expose()),
                api_secret: Self::mask_key(api_secret.clone().expose()),
            },
        }
    }
}

/// A failure reported by the vendor, or synthesized when the exchange itself failed.
///
/// `code` is `None` only for transport level failures and for vendors that
/// returned no usable code.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ErrorResponse {
    pub code: Option<String>,
    pub message: String,
    pub reason: Option<String>,
    pub status_code: u16,
    pub attempt_status: Option<AttemptStatus>,
    pub connector_transaction_id: Option<String>,
}

impl ErrorResponse {
    /// Failure with no vendor code, used when no vendor payload was obtained.
    pub fn transport_failure(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            code: None,
            message: message.into(),
            reason: None,
            status_code,
            attempt_status: None,
            connector_transaction_id: None,
        }
    }
}
