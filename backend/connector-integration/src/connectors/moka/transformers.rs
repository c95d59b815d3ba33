use common_enums::{AttemptStatus, Currency, RefundStatus};
use common_utils::{
    ext_traits::OptionStringExt,
    pii::{Email, IpAddress, PhoneNumberStrategy},
    types::StringMajorUnit,
};
use domain_types::{
    connector_flow::{Authorize, Capture, FlowName, Refund, Void},
    connector_types::{
        PaymentFlowData, PaymentVoidData, PaymentsAuthorizeData, PaymentsCaptureData,
        PaymentsResponseData, RefundFlowData, RefundsData, RefundsResponseData, ResponseId,
    },
    errors,
    router_data::{ConnectorAuthType, ErrorResponse},
    router_data_v2::RouterDataV2,
    router_request_types::{BasketProduct, PaymentOptions},
};
use error_stack::ResultExt;
use hyperswitch_masking::{PeekInterface, Secret};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::types::ResponseRouterData;

type Error = error_stack::Report<errors::ConnectorError>;

pub const TEST_BASE_URL: &str = "https://service.refmokaunited.com/";
pub const LIVE_BASE_URL: &str = "https://service.mokaunited.com/";

/// Prefix of authorizations issued by the test environment.
pub const TEST_AUTHORIZATION_PREFIX: &str = "Test-";

const SUCCESS_RESULT_CODE: &str = "Success";
/// `VoidRefundReason` sent with every cancellation.
const VOID_REFUND_REASON: u8 = 2;

const ERROR_CODES: [(&str, &str); 30] = [
    ("000", "General error"),
    ("001", "Could not get card owner name"),
    ("002", "Limit is insufficient"),
    ("003", "Credit card number is not valid format"),
    ("004", "General decline"),
    ("005", "This process is invalid for the card owner"),
    ("006", "Expiration date is invalid"),
    ("007", "Invalid transaction"),
    ("008", "Connection with the bank not established"),
    ("009", "Undefined error code"),
    ("010", "Bank SSL error"),
    ("011", "Call your bank for the manual authentication"),
    ("012", "Card info is wrong - Kart Number or CVV2"),
    ("013", "3D secure is not supported other than Visa MC cards"),
    ("014", "Invalid account number"),
    ("015", "CVV is wrong"),
    ("016", "Authentication process is not present"),
    ("017", "System error"),
    ("018", "Stolen card"),
    ("019", "Lost card"),
    ("020", "Card with limited properties"),
    ("021", "Timeout"),
    ("022", "Invalid merchant"),
    ("023", "False authentication"),
    ("024", "3D authorization is successful but the process cannot be completed"),
    ("025", "3D authorization failure"),
    (
        "026",
        "Either the issuer bank or the card is not enrolled to the 3D process",
    ),
    ("027", "The bank did not allow the process"),
    ("028", "Fraud suspect"),
    ("029", "The card is closed to the e-commerce operations"),
];

/// Human readable text for a vendor result code; unknown codes pass through.
pub fn map_error_code(code: &str) -> String {
    ERROR_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, text)| (*text).to_string())
        .unwrap_or_else(|| code.to_string())
}

pub struct MokaRouterData<T> {
    pub amount: StringMajorUnit,
    pub router_data: T,
}

impl<T> TryFrom<(StringMajorUnit, T)> for MokaRouterData<T> {
    type Error = Error;

    fn try_from((amount, router_data): (StringMajorUnit, T)) -> Result<Self, Self::Error> {
        Ok(Self {
            amount,
            router_data,
        })
    }
}

// ============================================================================
// AUTHENTICATION
// ============================================================================

#[derive(Debug, Clone)]
pub struct MokaAuthType {
    pub dealer_code: Secret<String>,
    pub username: Secret<String>,
    pub password: Secret<String>,
}

impl MokaAuthType {
    /// Lowercase hex SHA-256 of `{dealer_code}MK{username}PD{password}`.
    pub fn check_key(&self) -> Secret<String> {
        let input = format!(
            "{}MK{}PD{}",
            self.dealer_code.peek(),
            self.username.peek(),
            self.password.peek()
        );
        let digest = ring::digest::digest(&ring::digest::SHA256, input.as_bytes());
        Secret::new(hex::encode(digest.as_ref()))
    }
}

impl TryFrom<&ConnectorAuthType> for MokaAuthType {
    type Error = Error;

    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        match auth_type {
            ConnectorAuthType::SignatureKey {
                api_key,
                key1,
                api_secret,
            } => Ok(Self {
                dealer_code: key1.to_owned(),
                username: api_key.to_owned(),
                password: api_secret.to_owned(),
            }),
            _ => Err(error_stack::report!(
                errors::ConnectorError::FailedToObtainAuthType
            ))
            .attach_printable(
                "Moka requires SignatureKey auth with api_key (username), key1 (dealer code) and api_secret (password)",
            ),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MokaAuthentication {
    pub dealer_code: Secret<String>,
    pub username: Secret<String>,
    pub password: Secret<String>,
    pub check_key: Secret<String>,
}

impl From<MokaAuthType> for MokaAuthentication {
    fn from(auth: MokaAuthType) -> Self {
        let check_key = auth.check_key();
        Self {
            dealer_code: auth.dealer_code,
            username: auth.username,
            password: auth.password,
            check_key,
        }
    }
}

/// Envelope shared by every Moka call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MokaRequest<T> {
    pub payment_dealer_authentication: MokaAuthentication,
    pub payment_dealer_request: T,
}

impl<T> MokaRequest<T> {
    fn new(auth_type: &ConnectorAuthType, payment_dealer_request: T) -> Result<Self, Error> {
        Ok(Self {
            payment_dealer_authentication: MokaAuthType::try_from(auth_type)?.into(),
            payment_dealer_request,
        })
    }
}

// ============================================================================
// PAYMENT REQUEST
// ============================================================================

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MokaPaymentRequest {
    pub card_holder_full_name: Option<Secret<String>>,
    pub card_number: cards::CardNumber,
    pub exp_month: Secret<String>,
    pub exp_year: Secret<String>,
    pub cvc_number: Secret<String>,
    pub amount: StringMajorUnit,
    pub currency: String,
    pub installment_number: Option<u32>,
    #[serde(rename = "ClientIP")]
    pub client_ip: Option<Secret<String, IpAddress>>,
    pub other_trx_code: Option<String>,
    pub is_pre_auth: u8,
    pub is_pool_payment: u8,
    pub description: Option<String>,
    pub buyer_information: Option<MokaBuyerInformation>,
    pub basket_product: Option<Vec<MokaBasketProduct>>,
    pub sub_merchant_name: Option<String>,
    pub return_hash: Option<u8>,
    pub redirect_url: Option<String>,
    pub redirect_type: Option<i32>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MokaBuyerInformation {
    pub buyer_full_name: Option<Secret<String>>,
    pub buyer_email: Option<Email>,
    pub buyer_address: Option<Secret<String>>,
    pub buyer_gsm_number: Option<Secret<String, PhoneNumberStrategy>>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MokaBasketProduct {
    pub product_id: Option<i64>,
    pub product_code: Option<String>,
    pub unit_price: StringMajorUnit,
    pub quantity: u32,
}

/// Moka names the Turkish lira `TL`.
fn moka_currency(currency: Currency) -> String {
    match currency {
        Currency::TRY => "TL".to_string(),
        other => other.to_string(),
    }
}

fn build_buyer_information(
    options: &PaymentOptions,
    full_name: Option<Secret<String>>,
) -> Option<MokaBuyerInformation> {
    let billing = options.billing_address.as_ref();
    let buyer = MokaBuyerInformation {
        buyer_full_name: full_name,
        buyer_email: options.email.clone(),
        buyer_address: billing.and_then(|address| address.line1.clone()),
        buyer_gsm_number: billing.and_then(|address| address.phone.clone()),
    };
    (buyer.buyer_full_name.is_some()
        || buyer.buyer_email.is_some()
        || buyer.buyer_address.is_some()
        || buyer.buyer_gsm_number.is_some())
    .then_some(buyer)
}

/// Unit prices always carry two decimals, e.g. 19900 -> `199.00`.
fn build_basket_product(product: &BasketProduct) -> MokaBasketProduct {
    MokaBasketProduct {
        product_id: product.product_id,
        product_code: product.product_code.clone(),
        unit_price: product.unit_price.to_major_unit_with_scale(2),
        quantity: product.quantity,
    }
}

impl
    TryFrom<
        MokaRouterData<
            &RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    > for MokaRequest<MokaPaymentRequest>
{
    type Error = Error;

    fn try_from(
        item: MokaRouterData<
            &RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let router_data = item.router_data;
        let options = &router_data.resource_common_data.options;
        let card = &router_data.request.card;
        let expiry = card.get_expiry()?;
        let full_name = card.get_cardholder_name();
        let three_d = options.execute_threed.as_ref();

        let request = MokaPaymentRequest {
            card_holder_full_name: full_name.clone(),
            card_number: card.card_number.clone(),
            exp_month: Secret::new(expiry.get_month().two_digits()),
            exp_year: Secret::new(expiry.get_year().four_digits()),
            cvc_number: card.card_cvc.clone(),
            amount: item.amount,
            currency: moka_currency(router_data.request.currency),
            installment_number: options.number_of_installments,
            client_ip: options.ip.clone(),
            other_trx_code: options.order_id.clone().non_blank(),
            is_pre_auth: u8::from(!router_data.request.is_auto_capture()),
            is_pool_payment: u8::from(options.is_pool_payment.unwrap_or(false)),
            description: options.description.clone().non_blank(),
            buyer_information: build_buyer_information(options, full_name),
            basket_product: (!options.basket_products.is_empty()).then(|| {
                options
                    .basket_products
                    .iter()
                    .map(build_basket_product)
                    .collect()
            }),
            sub_merchant_name: options.sub_merchant_name.clone().non_blank(),
            return_hash: three_d.map(|_| 1),
            redirect_url: three_d.map(|redirect| redirect.redirect_url.clone()),
            redirect_type: three_d.map(|redirect| redirect.redirect_type.unwrap_or(0)),
        };

        Self::new(&router_data.connector_auth_type, request)
    }
}

// ============================================================================
// CAPTURE / REFUND / VOID REQUESTS
// ============================================================================

/// Body of both `DoCapture` and `DoCreateRefundRequest`.
#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MokaCaptureRequest {
    pub virtual_pos_order_id: String,
    pub other_trx_code: Option<String>,
    pub amount: StringMajorUnit,
}

pub type MokaRefundRequest = MokaCaptureRequest;

impl
    TryFrom<
        MokaRouterData<
            &RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    > for MokaRequest<MokaCaptureRequest>
{
    type Error = Error;

    fn try_from(
        item: MokaRouterData<
            &RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let router_data = item.router_data;
        let request = MokaCaptureRequest {
            virtual_pos_order_id: router_data.request.get_connector_transaction_id()?,
            other_trx_code: router_data
                .resource_common_data
                .options
                .order_id
                .clone()
                .non_blank(),
            amount: item.amount,
        };
        Self::new(&router_data.connector_auth_type, request)
    }
}

impl
    TryFrom<MokaRouterData<&RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>>>
    for MokaRequest<MokaRefundRequest>
{
    type Error = Error;

    fn try_from(
        item: MokaRouterData<
            &RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let router_data = item.router_data;
        let request = MokaRefundRequest {
            virtual_pos_order_id: router_data.request.connector_transaction_id.clone(),
            other_trx_code: router_data
                .resource_common_data
                .options
                .order_id
                .clone()
                .non_blank(),
            amount: item.amount,
        };
        Self::new(&router_data.connector_auth_type, request)
    }
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MokaVoidRequest {
    pub virtual_pos_order_id: String,
    #[serde(rename = "ClientIP")]
    pub client_ip: Option<Secret<String, IpAddress>>,
    pub void_refund_reason: u8,
}

impl TryFrom<&RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>>
    for MokaRequest<MokaVoidRequest>
{
    type Error = Error;

    fn try_from(
        item: &RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
    ) -> Result<Self, Self::Error> {
        let request = MokaVoidRequest {
            virtual_pos_order_id: item.request.connector_transaction_id.clone(),
            client_ip: item.resource_common_data.options.ip.clone(),
            void_refund_reason: VOID_REFUND_REASON,
        };
        Self::new(&item.connector_auth_type, request)
    }
}

// ============================================================================
// RESPONSE
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MokaResponse {
    pub data: Option<MokaResponseData>,
    pub result_code: Option<String>,
    pub result_message: Option<String>,
    pub exception: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MokaResponseData {
    pub is_successful: Option<bool>,
    pub result_code: Option<String>,
    pub result_message: Option<String>,
    pub virtual_pos_order_id: Option<String>,
    pub refund_request_id: Option<i64>,
}

impl MokaResponse {
    /// The nested result decides when present, the envelope code otherwise.
    pub fn is_successful(&self) -> bool {
        match &self.data {
            Some(data) => data.is_successful.unwrap_or(false),
            None => self
                .result_code
                .as_deref()
                .is_some_and(|code| code.eq_ignore_ascii_case(SUCCESS_RESULT_CODE)),
        }
    }

    pub fn get_message(&self) -> String {
        self.data
            .as_ref()
            .and_then(|data| data.result_message.clone())
            .non_blank()
            .or_else(|| self.result_code.clone())
            .unwrap_or_default()
    }

    /// Envelope and nested codes, minus blanks and `Success`, mapped to text.
    pub fn get_error_code(&self) -> Option<String> {
        let codes = [
            self.result_code.as_deref(),
            self.data
                .as_ref()
                .and_then(|data| data.result_code.as_deref()),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|code| !code.is_empty() && !code.eq_ignore_ascii_case(SUCCESS_RESULT_CODE))
        .map(map_error_code)
        .collect::<Vec<_>>();
        (!codes.is_empty()).then(|| codes.join(", "))
    }

    pub fn get_authorization(&self) -> Option<String> {
        self.data
            .as_ref()
            .and_then(|data| data.virtual_pos_order_id.clone())
            .non_blank()
    }

    pub fn is_test_authorization(&self) -> bool {
        self.get_authorization()
            .is_some_and(|id| id.starts_with(TEST_AUTHORIZATION_PREFIX))
    }

    pub fn to_error_response(
        &self,
        status_code: u16,
        attempt_status: Option<AttemptStatus>,
    ) -> ErrorResponse {
        ErrorResponse {
            code: self.get_error_code(),
            message: self.get_message(),
            reason: self
                .exception
                .as_ref()
                .filter(|exception| !exception.is_null())
                .map(|exception| exception.to_string()),
            status_code,
            attempt_status,
            connector_transaction_id: self.get_authorization(),
        }
    }
}

// ============================================================================
// RESPONSE TRANSFORMERS
// ============================================================================

fn success_status(flow: FlowName, auto_capture: bool) -> AttemptStatus {
    match flow {
        FlowName::Authorize if auto_capture => AttemptStatus::Charged,
        FlowName::Authorize => AttemptStatus::Authorized,
        FlowName::Capture => AttemptStatus::Charged,
        FlowName::Void => AttemptStatus::Voided,
        FlowName::Refund => AttemptStatus::Charged,
    }
}

fn failure_status(flow: FlowName) -> AttemptStatus {
    match flow {
        FlowName::Authorize => AttemptStatus::AuthorizationFailed,
        FlowName::Capture => AttemptStatus::CaptureFailed,
        FlowName::Void => AttemptStatus::VoidFailed,
        FlowName::Refund => AttemptStatus::Failure,
    }
}

pub(crate) fn handle_payments_response<F, Req>(
    item: ResponseRouterData<MokaResponse, RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>>,
    flow: FlowName,
    auto_capture: bool,
) -> Result<RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>, Error> {
    let ResponseRouterData {
        response,
        router_data,
        http_code,
    } = item;
    let test_mode = if response.is_test_authorization() {
        Some(true)
    } else {
        router_data.resource_common_data.test_mode
    };

    if response.is_successful() {
        let status = success_status(flow, auto_capture);
        let resource_id = response
            .get_authorization()
            .map(ResponseId::ConnectorTransactionId)
            .unwrap_or(ResponseId::NoResponseId);
        Ok(RouterDataV2 {
            response: Ok(PaymentsResponseData {
                resource_id,
                message: response.get_message(),
                connector_response_reference_id: None,
                status_code: http_code,
            }),
            resource_common_data: PaymentFlowData {
                status,
                test_mode,
                connector_http_status_code: Some(http_code),
                ..router_data.resource_common_data
            },
            ..router_data
        })
    } else {
        let status = failure_status(flow);
        Ok(RouterDataV2 {
            response: Err(response.to_error_response(http_code, Some(status))),
            resource_common_data: PaymentFlowData {
                status,
                test_mode,
                connector_http_status_code: Some(http_code),
                ..router_data.resource_common_data
            },
            ..router_data
        })
    }
}

impl
    TryFrom<
        ResponseRouterData<
            MokaResponse,
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
{
    type Error = Error;

    fn try_from(
        item: ResponseRouterData<
            MokaResponse,
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let auto_capture = item.router_data.request.is_auto_capture();
        handle_payments_response(item, FlowName::Authorize, auto_capture)
    }
}

impl
    TryFrom<
        ResponseRouterData<
            MokaResponse,
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>
{
    type Error = Error;

    fn try_from(
        item: ResponseRouterData<
            MokaResponse,
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        handle_payments_response(item, FlowName::Capture, true)
    }
}

impl
    TryFrom<
        ResponseRouterData<
            MokaResponse,
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>
{
    type Error = Error;

    fn try_from(
        item: ResponseRouterData<
            MokaResponse,
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        handle_payments_response(item, FlowName::Void, false)
    }
}

impl
    TryFrom<
        ResponseRouterData<
            MokaResponse,
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    > for RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>
{
    type Error = Error;

    fn try_from(
        item: ResponseRouterData<
            MokaResponse,
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let ResponseRouterData {
            response,
            router_data,
            http_code,
        } = item;
        let test_mode = if response.is_test_authorization() {
            Some(true)
        } else {
            router_data.resource_common_data.test_mode
        };

        if response.is_successful() {
            Ok(Self {
                response: Ok(RefundsResponseData {
                    connector_refund_id: response.get_authorization(),
                    refund_status: RefundStatus::Success,
                    message: response.get_message(),
                    status_code: http_code,
                }),
                resource_common_data: RefundFlowData {
                    status: RefundStatus::Success,
                    test_mode,
                    connector_http_status_code: Some(http_code),
                    ..router_data.resource_common_data
                },
                ..router_data
            })
        } else {
            Ok(Self {
                response: Err(response.to_error_response(http_code, None)),
                resource_common_data: RefundFlowData {
                    status: RefundStatus::Failure,
                    test_mode,
                    connector_http_status_code: Some(http_code),
                    ..router_data.resource_common_data
                },
                ..router_data
            })
        }
    }
}
