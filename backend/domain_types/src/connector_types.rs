use common_enums::{AttemptStatus, CaptureMethod, Currency, RefundStatus};
use common_utils::{errors, CustomResult, MinorUnit};
use error_stack::ResultExt;
use hyperswitch_masking::Secret;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{
    errors::ConnectorError, payment_method_data::Card, router_request_types::PaymentOptions,
    types::Connectors,
};

#[derive(Clone, Copy, Debug, Display, EnumString, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ConnectorEnum {
    #[strum(to_string = "globalcollect", serialize = "global_collect")]
    GlobalCollect,
    Moka,
}

pub trait RawConnectorRequestResponse {
    fn set_raw_connector_response(&mut self, response: Option<Secret<String>>);
    fn get_raw_connector_response(&self) -> Option<Secret<String>>;
    fn set_raw_connector_request(&mut self, request: Option<Secret<String>>);
    fn get_raw_connector_request(&self) -> Option<Secret<String>>;
}

/// Whether a reply belongs to a sandbox/test environment.
pub trait TestModeIndicator {
    fn is_test(&self) -> bool;
}

#[derive(Debug, Clone)]
pub struct PaymentFlowData {
    pub status: AttemptStatus,
    pub connectors: Connectors,
    /// Reference sent to the vendor when the caller supplied no order id.
    pub connector_request_reference_id: String,
    pub options: PaymentOptions,
    pub test_mode: Option<bool>,
    pub connector_http_status_code: Option<u16>,
    pub raw_connector_response: Option<Secret<String>>,
    pub raw_connector_request: Option<Secret<String>>,
}

impl PaymentFlowData {
    pub fn new(connectors: Connectors, options: PaymentOptions, test_mode: bool) -> Self {
        Self {
            status: AttemptStatus::Started,
            connectors,
            connector_request_reference_id: crate::utils::generate_reference_id(),
            options,
            test_mode: Some(test_mode),
            connector_http_status_code: None,
            raw_connector_response: None,
            raw_connector_request: None,
        }
    }

    /// Order id when given, otherwise the generated request reference.
    pub fn get_merchant_reference(&self) -> String {
        self.options
            .order_id
            .clone()
            .unwrap_or_else(|| self.connector_request_reference_id.clone())
    }
}

impl RawConnectorRequestResponse for PaymentFlowData {
    fn set_raw_connector_response(&mut self, response: Option<Secret<String>>) {
        self.raw_connector_response = response;
    }

    fn get_raw_connector_response(&self) -> Option<Secret<String>> {
        self.raw_connector_response.clone()
    }

    fn get_raw_connector_request(&self) -> Option<Secret<String>> {
        self.raw_connector_request.clone()
    }

    fn set_raw_connector_request(&mut self, request: Option<Secret<String>>) {
        self.raw_connector_request = request;
    }
}

impl TestModeIndicator for PaymentFlowData {
    fn is_test(&self) -> bool {
        self.test_mode.unwrap_or(false)
    }
}

#[derive(Debug, Clone)]
pub struct PaymentsAuthorizeData {
    pub card: Card,
    pub minor_amount: MinorUnit,
    pub currency: Currency,
    pub capture_method: Option<CaptureMethod>,
}

impl PaymentsAuthorizeData {
    pub fn is_auto_capture(&self) -> bool {
        match self.capture_method {
            Some(CaptureMethod::Automatic) | None => true,
            Some(CaptureMethod::Manual) => false,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct PaymentsCaptureData {
    pub minor_amount_to_capture: MinorUnit,
    pub currency: Currency,
    pub connector_transaction_id: ResponseId,
}

impl PaymentsCaptureData {
    pub fn get_connector_transaction_id(&self) -> CustomResult<String, ConnectorError> {
        self.connector_transaction_id
            .get_connector_transaction_id()
            .change_context(ConnectorError::MissingConnectorTransactionID)
    }
}

#[derive(Debug, Clone)]
pub struct PaymentVoidData {
    pub connector_transaction_id: String,
    pub cancellation_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum ResponseId {
    ConnectorTransactionId(String),
    #[default]
    NoResponseId,
}

impl ResponseId {
    pub fn get_connector_transaction_id(&self) -> CustomResult<String, errors::ValidationError> {
        match self {
            Self::ConnectorTransactionId(txn_id) => Ok(txn_id.to_string()),
            Self::NoResponseId => Err(errors::ValidationError::IncorrectValueProvided {
                field_name: "connector_transaction_id",
            })
            .attach_printable("Expected connector transaction ID not found"),
        }
    }

    pub fn get_optional_id(&self) -> Option<String> {
        match self {
            Self::ConnectorTransactionId(txn_id) => Some(txn_id.clone()),
            Self::NoResponseId => None,
        }
    }
}

/// Successful outcome of a payment flow.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentsResponseData {
    /// The authorization token later verbs refer to.
    pub resource_id: ResponseId,
    pub message: String,
    pub connector_response_reference_id: Option<String>,
    pub status_code: u16,
}

#[derive(Debug, Clone)]
pub struct RefundFlowData {
    pub status: RefundStatus,
    pub connectors: Connectors,
    pub connector_request_reference_id: String,
    pub options: PaymentOptions,
    pub test_mode: Option<bool>,
    pub connector_http_status_code: Option<u16>,
    pub raw_connector_response: Option<Secret<String>>,
    pub raw_connector_request: Option<Secret<String>>,
}

impl RefundFlowData {
    pub fn new(connectors: Connectors, options: PaymentOptions, test_mode: bool) -> Self {
        Self {
            status: RefundStatus::Pending,
            connectors,
            connector_request_reference_id: crate::utils::generate_reference_id(),
            options,
            test_mode: Some(test_mode),
            connector_http_status_code: None,
            raw_connector_response: None,
            raw_connector_request: None,
        }
    }
}

impl RawConnectorRequestResponse for RefundFlowData {
    fn set_raw_connector_response(&mut self, response: Option<Secret<String>>) {
        self.raw_connector_response = response;
    }

    fn get_raw_connector_response(&self) -> Option<Secret<String>> {
        self.raw_connector_response.clone()
    }

    fn get_raw_connector_request(&self) -> Option<Secret<String>> {
        self.raw_connector_request.clone()
    }

    fn set_raw_connector_request(&mut self, request: Option<Secret<String>>) {
        self.raw_connector_request = request;
    }
}

impl TestModeIndicator for RefundFlowData {
    fn is_test(&self) -> bool {
        self.test_mode.unwrap_or(false)
    }
}

#[derive(Debug, Clone)]
pub struct RefundsData {
    pub refund_id: String,
    /// Authorization of the payment being refunded.
    pub connector_transaction_id: String,
    pub minor_refund_amount: MinorUnit,
    pub currency: Currency,
    pub reason: Option<String>,
}

/// Successful outcome of a refund.
#[derive(Debug, Clone, PartialEq)]
pub struct RefundsResponseData {
    pub connector_refund_id: Option<String>,
    pub refund_status: RefundStatus,
    pub message: String,
    pub status_code: u16,
}
