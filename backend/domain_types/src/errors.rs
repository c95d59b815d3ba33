//! Adapter and transport error types.

/// Failures raised while preparing a gateway call or interpreting its reply.
///
/// Vendor declines are never represented here; they travel as
/// [`crate::router_data::ErrorResponse`] inside the router data.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConnectorError {
    #[error("Failed to obtain authentication type")]
    FailedToObtainAuthType,
    #[error("Missing required field: {field_name}")]
    MissingRequiredField { field_name: &'static str },
    #[error("Failed to encode connector request")]
    RequestEncodingFailed,
    #[error("Failed to deserialize connector response")]
    ResponseDeserializationFailed,
    #[error("Failed to handle connector response")]
    ResponseHandlingFailed,
    #[error("{0} is not implemented")]
    NotImplemented(String),
    #[error("Invalid data format for field: {field_name}")]
    InvalidDataFormat { field_name: &'static str },
    #[error("Missing connector transaction id")]
    MissingConnectorTransactionID,
    #[error("Unknown connector: {name}")]
    InvalidConnectorName { name: String },
    #[error("Failed to convert amount to the connector's format")]
    AmountConversionFailed,
}

/// Failures of the HTTP exchange itself.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ApiClientError {
    #[error("Header map construction failed")]
    HeaderMapConstructionFailed,
    #[error("Invalid proxy configuration")]
    InvalidProxyConfiguration,
    #[error("Client construction failed")]
    ClientConstructionFailed,
    #[error("URL encoding of request payload failed")]
    UrlEncodingFailed,
    #[error("Failed to send request to connector {0}")]
    RequestNotSent(String),
    #[error("Failed to decode response")]
    ResponseDecodingFailed,
    #[error("Server responded with Request Timeout")]
    RequestTimeoutReceived,
    #[error("Server responded with unexpected response")]
    UnexpectedServerResponse,
}
