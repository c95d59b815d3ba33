use serde::Serialize;

/// Raw reply of a gateway call as handed back by the transport.
#[derive(Clone, Debug)]
pub struct Response {
    pub headers: Option<http::HeaderMap>,
    pub response: bytes::Bytes,
    pub status_code: u16,
}

/// The normalized result of one verb.
///
/// `success` mirrors the vendor's own success indicator. A failed response
/// never carries an `authorization`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GatewayResponse {
    pub success: bool,
    pub message: String,
    pub error_code: Option<String>,
    pub authorization: Option<String>,
    /// The vendor reply as parsed JSON, `{}` when no body was obtained.
    pub params: serde_json::Value,
    pub test: bool,
}

impl GatewayResponse {
    pub fn succeeded(
        message: String,
        authorization: Option<String>,
        params: serde_json::Value,
        test: bool,
    ) -> Self {
        Self {
            success: true,
            message,
            error_code: None,
            authorization,
            params,
            test,
        }
    }

    pub fn failed(
        message: String,
        error_code: Option<String>,
        params: serde_json::Value,
        test: bool,
    ) -> Self {
        Self {
            success: false,
            message,
            error_code,
            authorization: None,
            params,
            test,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}
