use std::collections::BTreeMap;

use cards::CardNumber;
use common_enums::{AttemptStatus, CardNetwork, CountryAlpha2, Currency, RefundStatus};
use common_utils::{
    consts::BASE64_ENGINE,
    date_time,
    ext_traits::OptionStringExt,
    pii::{Email, IpAddress, PhoneNumberStrategy},
};
use domain_types::{
    connector_flow::{Authorize, Capture, FlowName, Refund, Void},
    connector_types::{
        PaymentFlowData, PaymentVoidData, PaymentsAuthorizeData, PaymentsCaptureData,
        PaymentsResponseData, RefundFlowData, RefundsData, RefundsResponseData, ResponseId,
    },
    errors,
    payment_method_data::Card,
    router_data::{ConnectorAuthType, ErrorResponse},
    router_data_v2::RouterDataV2,
    router_request_types::{Address, AirlineData, FlightLeg, PaymentOptions, ThreeDSecureData},
};
use error_stack::ResultExt;
use hyperswitch_masking::{PeekInterface, Secret};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{types::ResponseRouterData, utils};

type Error = error_stack::Report<errors::ConnectorError>;

pub const SANDBOX_BASE_URL: &str = "https://eu.sandbox.api-ingenico.com/";
pub const IDEMPOTENCE_KEY_HEADER: &str = "X-GCS-Idempotence-Key";

const NO_MESSAGE_AVAILABLE: &str = "No message available";
const NO_ERROR_CODE_AVAILABLE: &str = "No error code available";
const SUCCEEDED: &str = "Succeeded";

const CAPTURED_STATUSES: [&str; 2] = ["CAPTURED", "CAPTURE_REQUESTED"];
const REFUNDED_STATUSES: [&str; 3] = ["REFUNDED", "REFUND_REQUESTED", "PENDING_APPROVAL"];
const VOID_RESPONSE_IDS: [&str; 4] = ["00", "0", "8", "11"];

// ============================================================================
// AUTHENTICATION
// ============================================================================

#[derive(Debug, Clone)]
pub struct GlobalCollectAuthType {
    pub api_key_id: Secret<String>,
    pub secret_api_key: Secret<String>,
    pub merchant_id: Secret<String>,
}

impl GlobalCollectAuthType {
    /// `GCS v1HMAC:{api_key_id}:{signature}`, the signature being
    /// base64(HMAC-SHA256(secret_api_key, string_to_sign)).
    pub fn generate_authorization_header(
        &self,
        http_method: &str,
        content_type: &str,
        date: &str,
        idempotency_key: Option<&str>,
        resource: &str,
    ) -> String {
        use base64::Engine;
        use ring::hmac;

        let string_to_sign =
            build_string_to_sign(http_method, content_type, date, idempotency_key, resource);
        tracing::debug!(string_to_sign = ?string_to_sign, "globalcollect request signature input");

        let key = hmac::Key::new(hmac::HMAC_SHA256, self.secret_api_key.peek().as_bytes());
        let signature = BASE64_ENGINE.encode(hmac::sign(&key, string_to_sign.as_bytes()).as_ref());

        format!("GCS v1HMAC:{}:{}", self.api_key_id.peek(), signature)
    }

    /// `Date` header value, e.g. `Tue, 05 Mar 2024 09:04:07 GMT`.
    pub fn generate_date_header() -> Result<String, Error> {
        date_time::http_date_now()
            .change_context(errors::ConnectorError::RequestEncodingFailed)
            .attach_printable("failed to format the Date header")
    }
}

/// `METHOD\ncontent-type\ndate\n[x-gcs-idempotence-key:{key}\n]/resource\n`
pub fn build_string_to_sign(
    http_method: &str,
    content_type: &str,
    date: &str,
    idempotency_key: Option<&str>,
    resource: &str,
) -> String {
    let gcs_headers = idempotency_key
        .map(|key| format!("x-gcs-idempotence-key:{}\n", key.trim()))
        .unwrap_or_default();
    format!(
        "{}\n{}\n{}\n{}{}\n",
        http_method,
        content_type.trim(),
        date.trim(),
        gcs_headers,
        resource.trim()
    )
}

impl TryFrom<&ConnectorAuthType> for GlobalCollectAuthType {
    type Error = Error;

    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        match auth_type {
            ConnectorAuthType::SignatureKey {
                api_key,
                key1,
                api_secret,
            } => Ok(Self {
                api_key_id: api_key.to_owned(),
                secret_api_key: api_secret.to_owned(),
                merchant_id: key1.to_owned(),
            }),
            _ => Err(error_stack::report!(
                errors::ConnectorError::FailedToObtainAuthType
            ))
            .attach_printable(
                "GlobalCollect requires SignatureKey auth with api_key (api key id), key1 (merchant id) and api_secret",
            ),
        }
    }
}

// ============================================================================
// PAYMENT REQUEST
// ============================================================================

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectPaymentsRequest {
    pub order: GlobalCollectOrder,
    pub card_payment_method_specific_input: GlobalCollectCardPaymentMethodInput,
    pub fraud_fields: Option<GlobalCollectFraudFields>,
    pub sdk_identifier: Option<String>,
    pub sdk_creator: Option<String>,
    pub integrator: Option<String>,
    pub shopping_cart_extension: Option<GlobalCollectShoppingCartExtension>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectOrder {
    pub amount_of_money: GlobalCollectAmount,
    pub customer: GlobalCollectCustomer,
    pub references: GlobalCollectReferences,
    pub additional_input: Option<GlobalCollectAdditionalInput>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectAmount {
    pub amount: i64,
    pub currency_code: Currency,
}

#[skip_serializing_none]
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectCustomer {
    pub personal_information: Option<GlobalCollectPersonalInformation>,
    pub merchant_customer_id: Option<String>,
    pub company_information: Option<GlobalCollectCompanyInformation>,
    pub contact_details: Option<GlobalCollectContactDetails>,
    pub billing_address: Option<GlobalCollectAddress>,
    pub shipping_address: Option<GlobalCollectShippingAddress>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectPersonalInformation {
    pub name: GlobalCollectName,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectName {
    pub first_name: Option<Secret<String>>,
    pub surname: Option<Secret<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectCompanyInformation {
    pub name: String,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectContactDetails {
    pub email_address: Option<Email>,
    pub phone_number: Option<Secret<String, PhoneNumberStrategy>>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectAddress {
    pub street: Option<Secret<String>>,
    pub additional_info: Option<Secret<String>>,
    pub zip: Option<Secret<String>>,
    pub city: Option<String>,
    pub state: Option<Secret<String>>,
    pub country_code: Option<CountryAlpha2>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectShippingAddress {
    #[serde(flatten)]
    pub address: GlobalCollectAddress,
    pub name: Option<GlobalCollectName>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectReferences {
    pub merchant_reference: String,
    pub descriptor: Option<String>,
    pub invoice_data: Option<GlobalCollectInvoiceData>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectInvoiceData {
    pub invoice_number: String,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectAdditionalInput {
    pub number_of_installments: Option<u32>,
    pub airline_data: Option<GlobalCollectAirlineData>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectAirlineData {
    pub code: Option<String>,
    pub name: Option<String>,
    pub flight_date: Option<String>,
    pub passenger_name: Option<String>,
    pub flight_legs: Option<Vec<GlobalCollectFlightLeg>>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectFlightLeg {
    pub arrival_airport: Option<String>,
    pub origin_airport: Option<String>,
    pub date: Option<String>,
    pub number: Option<u32>,
    pub carrier_code: Option<String>,
    pub airline_class: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectCardPaymentMethodInput {
    pub payment_product_id: Option<u16>,
    pub skip_authentication: String,
    pub skip_fraud_service: String,
    pub authorization_mode: GlobalCollectAuthorizationMode,
    pub requires_approval: Option<bool>,
    pub card: GlobalCollectCard,
    pub three_d_secure: Option<GlobalCollectThreeDSecure>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GlobalCollectAuthorizationMode {
    PreAuthorization,
    FinalAuthorization,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectCard {
    pub cvv: Secret<String>,
    pub card_number: CardNumber,
    /// MMYY
    pub expiry_date: Secret<String>,
    pub cardholder_name: Option<Secret<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectThreeDSecure {
    pub external_cardholder_authentication_data: GlobalCollectExternalAuthenticationData,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectExternalAuthenticationData {
    pub cavv: Option<Secret<String>>,
    pub cavv_algorithm: Option<String>,
    pub eci: Option<String>,
    pub three_d_secure_version: Option<String>,
    pub validation_result: Option<String>,
    pub xid: Option<String>,
    pub directory_server_transaction_id: Option<String>,
    pub acs_transaction_id: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectFraudFields {
    pub customer_ip_address: Option<Secret<String, IpAddress>>,
    #[serde(flatten)]
    pub custom_fields: BTreeMap<String, String>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct GlobalCollectShoppingCartExtension {
    pub creator: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
    #[serde(rename = "extensionID")]
    pub extension_id: Option<String>,
}

/// Map card network to GlobalCollect payment product ID
fn get_payment_product_id(card_network: CardNetwork) -> Option<u16> {
    match card_network {
        CardNetwork::Visa => Some(1),
        CardNetwork::AmericanExpress => Some(2),
        CardNetwork::Mastercard => Some(3),
        CardNetwork::Maestro => Some(117),
        CardNetwork::JCB => Some(125),
        CardNetwork::Discover => Some(128),
        CardNetwork::DinersClub => Some(132),
        CardNetwork::UnionPay => None,
    }
}

fn non_blank_secret(value: Option<&Secret<String>>, max_chars: usize) -> Option<Secret<String>> {
    value
        .map(|value| utils::truncate(value.peek(), max_chars))
        .non_blank()
        .map(Secret::new)
}

fn build_address(address: &Address) -> GlobalCollectAddress {
    GlobalCollectAddress {
        street: non_blank_secret(address.line1.as_ref(), 50),
        additional_info: non_blank_secret(address.line2.as_ref(), 50),
        zip: non_blank_secret(address.zip.as_ref(), usize::MAX),
        city: address.city.clone().non_blank(),
        state: non_blank_secret(address.state.as_ref(), 35),
        country_code: address.country,
    }
}

fn build_name(first_name: Option<String>, last_name: Option<String>) -> Option<GlobalCollectName> {
    let first_name = first_name
        .map(|name| utils::truncate(&name, 15))
        .non_blank()
        .map(Secret::new);
    let surname = last_name
        .map(|name| utils::truncate(&name, 70))
        .non_blank()
        .map(Secret::new);
    (first_name.is_some() || surname.is_some()).then_some(GlobalCollectName {
        first_name,
        surname,
    })
}

/// Splits an address `name` of the form "first last" at the first whitespace.
fn split_address_name(address: &Address) -> Option<GlobalCollectName> {
    let name = address.name.as_ref()?.peek().trim().to_string();
    let (first_name, last_name) = match name.split_once(char::is_whitespace) {
        Some((first, last)) => (Some(first.to_string()), Some(last.trim().to_string())),
        None => (Some(name), None),
    };
    build_name(first_name, last_name)
}

fn build_customer(options: &PaymentOptions, card: &Card) -> GlobalCollectCustomer {
    let billing = options.billing_address.as_ref();

    let company_name = options
        .company
        .clone()
        .or_else(|| billing.and_then(|address| address.company.clone()))
        .non_blank();
    let phone_number = billing.and_then(|address| address.phone.clone());
    let contact_details = (options.email.is_some() || phone_number.is_some()).then(|| {
        GlobalCollectContactDetails {
            email_address: options.email.clone(),
            phone_number,
        }
    });

    GlobalCollectCustomer {
        personal_information: build_name(card.get_first_name(), card.get_last_name())
            .map(|name| GlobalCollectPersonalInformation { name }),
        merchant_customer_id: options.customer_id.clone().non_blank(),
        company_information: company_name.map(|name| GlobalCollectCompanyInformation { name }),
        contact_details,
        billing_address: billing.map(build_address),
        shipping_address: options.shipping_address.as_ref().map(|address| {
            GlobalCollectShippingAddress {
                address: build_address(address),
                name: split_address_name(address),
            }
        }),
    }
}

fn build_flight_leg(leg: &FlightLeg) -> GlobalCollectFlightLeg {
    GlobalCollectFlightLeg {
        arrival_airport: leg.arrival_airport.clone(),
        origin_airport: leg.origin_airport.clone(),
        date: leg.date.clone(),
        number: leg.number,
        carrier_code: leg.carrier_code.clone(),
        airline_class: leg.airline_class.clone(),
    }
}

fn build_airline_data(airline_data: &AirlineData) -> GlobalCollectAirlineData {
    GlobalCollectAirlineData {
        code: airline_data.code.clone(),
        name: airline_data.name.clone(),
        flight_date: airline_data.flight_date.clone(),
        passenger_name: airline_data.passenger_name.clone(),
        flight_legs: (!airline_data.flight_legs.is_empty())
            .then(|| airline_data.flight_legs.iter().map(build_flight_leg).collect()),
    }
}

fn build_additional_input(options: &PaymentOptions) -> Option<GlobalCollectAdditionalInput> {
    let airline_data = options.airline_data.as_ref().map(build_airline_data);
    (options.number_of_installments.is_some() || airline_data.is_some()).then_some(
        GlobalCollectAdditionalInput {
            number_of_installments: options.number_of_installments,
            airline_data,
        },
    )
}

fn build_three_d_secure(three_d_secure: &ThreeDSecureData) -> GlobalCollectThreeDSecure {
    GlobalCollectThreeDSecure {
        external_cardholder_authentication_data: GlobalCollectExternalAuthenticationData {
            cavv: three_d_secure.cavv.clone(),
            cavv_algorithm: three_d_secure.cavv_algorithm.clone(),
            eci: three_d_secure.eci.clone(),
            three_d_secure_version: three_d_secure.version.clone(),
            validation_result: three_d_secure.authentication_response_status.clone(),
            xid: three_d_secure
                .is_version_one()
                .then(|| three_d_secure.xid.clone())
                .flatten(),
            directory_server_transaction_id: three_d_secure.ds_transaction_id.clone(),
            acs_transaction_id: three_d_secure.acs_transaction_id.clone(),
        },
    }
}

fn build_card(card: &Card) -> Result<GlobalCollectCard, Error> {
    let expiry = card.get_expiry()?;
    Ok(GlobalCollectCard {
        cvv: card.card_cvc.clone(),
        card_number: card.card_number.clone(),
        expiry_date: Secret::new(expiry.mmyy()),
        cardholder_name: card.get_cardholder_name(),
    })
}

fn build_fraud_fields(options: &PaymentOptions) -> Option<GlobalCollectFraudFields> {
    (options.ip.is_some() || !options.fraud_fields.is_empty()).then(|| GlobalCollectFraudFields {
        customer_ip_address: options.ip.clone(),
        custom_fields: options.fraud_fields.clone(),
    })
}

fn build_shopping_cart_extension(
    options: &PaymentOptions,
) -> Option<GlobalCollectShoppingCartExtension> {
    let creator = options.creator.as_ref()?;
    let extension = GlobalCollectShoppingCartExtension {
        creator: creator.creator.clone(),
        name: creator.name.clone(),
        version: creator.version.clone(),
        extension_id: creator.extension_id.clone(),
    };
    (extension.creator.is_some()
        || extension.name.is_some()
        || extension.version.is_some()
        || extension.extension_id.is_some())
    .then_some(extension)
}

// ============================================================================
// REQUEST TRANSFORMERS
// ============================================================================

impl TryFrom<&RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>>
    for GlobalCollectPaymentsRequest
{
    type Error = Error;

    fn try_from(
        item: &RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
    ) -> Result<Self, Self::Error> {
        let options = &item.resource_common_data.options;
        let card = &item.request.card;

        let order = GlobalCollectOrder {
            amount_of_money: GlobalCollectAmount {
                amount: item.request.minor_amount.get_amount_as_i64(),
                currency_code: item.request.currency,
            },
            customer: build_customer(options, card),
            references: GlobalCollectReferences {
                merchant_reference: item.resource_common_data.get_merchant_reference(),
                descriptor: options.description.clone().non_blank(),
                invoice_data: options
                    .invoice
                    .clone()
                    .non_blank()
                    .map(|invoice_number| GlobalCollectInvoiceData { invoice_number }),
            },
            additional_input: build_additional_input(options),
        };

        let authorization_mode = if options.pre_authorization {
            GlobalCollectAuthorizationMode::PreAuthorization
        } else {
            GlobalCollectAuthorizationMode::FinalAuthorization
        };

        let creator = options.creator.as_ref();
        Ok(Self {
            order,
            card_payment_method_specific_input: GlobalCollectCardPaymentMethodInput {
                payment_product_id: card.get_card_network().and_then(get_payment_product_id),
                skip_authentication: "true".to_string(),
                skip_fraud_service: "true".to_string(),
                authorization_mode,
                requires_approval: options.requires_approval,
                card: build_card(card)?,
                three_d_secure: options.three_d_secure.as_ref().map(build_three_d_secure),
            },
            fraud_fields: build_fraud_fields(options),
            sdk_identifier: creator.and_then(|creator| creator.sdk_identifier.clone()),
            sdk_creator: creator.and_then(|creator| creator.sdk_creator.clone()),
            integrator: creator.and_then(|creator| creator.integrator.clone()),
            shopping_cart_extension: build_shopping_cart_extension(options),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct GlobalCollectCaptureRequest {
    pub amount: i64,
}

impl TryFrom<&RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>>
    for GlobalCollectCaptureRequest
{
    type Error = Error;

    fn try_from(
        item: &RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
    ) -> Result<Self, Self::Error> {
        Ok(Self {
            amount: item.request.minor_amount_to_capture.get_amount_as_i64(),
        })
    }
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectRefundRequest {
    pub amount_of_money: GlobalCollectAmount,
    pub customer: Option<GlobalCollectRefundCustomer>,
    pub refund_references: Option<GlobalCollectRefundReferences>,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectRefundCustomer {
    pub address: Option<GlobalCollectRefundAddress>,
    pub contact_details: Option<GlobalCollectContactDetails>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectRefundAddress {
    pub country_code: CountryAlpha2,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectRefundReferences {
    pub merchant_reference: String,
}

impl TryFrom<&RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>>
    for GlobalCollectRefundRequest
{
    type Error = Error;

    fn try_from(
        item: &RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
    ) -> Result<Self, Self::Error> {
        let options = &item.resource_common_data.options;
        let address = options
            .get_billing_country()
            .map(|country_code| GlobalCollectRefundAddress { country_code });
        let contact_details = options.email.clone().map(|email| GlobalCollectContactDetails {
            email_address: Some(email),
            phone_number: None,
        });
        let customer = (address.is_some() || contact_details.is_some()).then_some(
            GlobalCollectRefundCustomer {
                address,
                contact_details,
            },
        );

        Ok(Self {
            amount_of_money: GlobalCollectAmount {
                amount: item.request.minor_refund_amount.get_amount_as_i64(),
                currency_code: item.request.currency,
            },
            customer,
            refund_references: options
                .order_id
                .clone()
                .non_blank()
                .map(|merchant_reference| GlobalCollectRefundReferences { merchant_reference }),
        })
    }
}

/// Cancelling a payment takes an empty JSON object.
#[derive(Debug, Serialize)]
pub struct GlobalCollectVoidRequest {}

impl TryFrom<&RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>>
    for GlobalCollectVoidRequest
{
    type Error = Error;

    fn try_from(
        _item: &RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
    ) -> Result<Self, Self::Error> {
        Ok(Self {})
    }
}

// ============================================================================
// RESPONSE
// ============================================================================

/// Every GlobalCollect reply (payment, approval, refund, cancellation and
/// error bodies) is read into this one shape; absent parts stay `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectResponse {
    pub error_id: Option<String>,
    pub errors: Option<Vec<GlobalCollectErrorDetail>>,
    pub payment: Option<GlobalCollectPayment>,
    pub payment_result: Option<GlobalCollectPaymentResult>,
    pub id: Option<String>,
    pub status: Option<String>,
    pub status_output: Option<GlobalCollectStatusOutput>,
    pub card_payment_method_specific_output: Option<GlobalCollectCardOutput>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectErrorDetail {
    pub category: Option<String>,
    pub code: Option<String>,
    pub http_status_code: Option<u16>,
    pub id: Option<String>,
    pub message: Option<String>,
    pub property_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectPayment {
    pub id: Option<String>,
    pub status: Option<String>,
    pub status_output: Option<GlobalCollectStatusOutput>,
    pub payment_output: Option<GlobalCollectPaymentOutput>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectStatusOutput {
    pub is_authorized: Option<bool>,
    pub is_cancellable: Option<bool>,
    pub status_category: Option<String>,
    pub status_code: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectPaymentOutput {
    pub amount_of_money: Option<GlobalCollectAmountOfMoney>,
    pub references: Option<GlobalCollectPaymentReferences>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectAmountOfMoney {
    pub amount: Option<i64>,
    pub currency_code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectPaymentReferences {
    pub merchant_reference: Option<String>,
    pub payment_reference: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectPaymentResult {
    pub payment: Option<GlobalCollectPayment>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalCollectCardOutput {
    pub void_response_id: Option<String>,
}

impl GlobalCollectResponse {
    fn errors(&self) -> &[GlobalCollectErrorDetail] {
        self.errors.as_deref().unwrap_or_default()
    }

    pub fn has_errors(&self) -> bool {
        self.error_id.is_some() || !self.errors().is_empty()
    }

    fn payment_status(&self) -> Option<&str> {
        self.payment
            .as_ref()
            .and_then(|payment| payment.status.as_deref())
    }

    fn is_authorized(&self) -> bool {
        self.payment
            .as_ref()
            .and_then(|payment| payment.status_output.as_ref())
            .and_then(|output| output.is_authorized)
            .unwrap_or(false)
    }

    /// Whether the vendor reports `flow` as accepted.
    pub fn is_successful(&self, flow: FlowName, requires_approval: Option<bool>) -> bool {
        if self.has_errors() {
            return false;
        }
        match flow {
            FlowName::Authorize => {
                self.is_authorized()
                    || (requires_approval == Some(false)
                        && self
                            .payment_status()
                            .is_some_and(|status| CAPTURED_STATUSES.contains(&status)))
            }
            FlowName::Capture => self
                .status
                .as_deref()
                .or_else(|| self.payment_status())
                .is_some_and(|status| CAPTURED_STATUSES.contains(&status)),
            FlowName::Refund => self
                .status
                .as_deref()
                .is_some_and(|status| REFUNDED_STATUSES.contains(&status)),
            FlowName::Void => {
                self.payment_status() == Some("CANCELLED")
                    || self
                        .card_payment_method_specific_output
                        .as_ref()
                        .and_then(|output| output.void_response_id.as_deref())
                        .is_some_and(|id| VOID_RESPONSE_IDS.contains(&id))
            }
        }
    }

    pub fn get_message(&self, succeeded: bool) -> String {
        if succeeded {
            return SUCCEEDED.to_string();
        }
        if let Some(error) = self.errors().first() {
            if let Some(message) = error.message.clone().or_else(|| error.id.clone()) {
                return message;
            }
        }
        self.status
            .as_deref()
            .or_else(|| self.payment_status())
            .map(|status| format!("Status: {status}"))
            .unwrap_or_else(|| NO_MESSAGE_AVAILABLE.to_string())
    }

    pub fn get_error_code(&self) -> String {
        if let Some(code) = self.errors().first().and_then(|error| error.code.clone()) {
            return code;
        }
        self.payment
            .as_ref()
            .and_then(|payment| payment.status_output.as_ref())
            .or(self.status_output.as_ref())
            .and_then(|output| output.status_code)
            .map(|status_code| status_code.to_string())
            .unwrap_or_else(|| NO_ERROR_CODE_AVAILABLE.to_string())
    }

    /// Every reported error as `propertyName: message`, for the error reason.
    fn get_error_reason(&self) -> Option<String> {
        let reasons = self
            .errors()
            .iter()
            .filter_map(|error| {
                let message = error.message.as_deref().or(error.id.as_deref())?;
                Some(match error.property_name.as_deref() {
                    Some(property_name) => format!("{property_name}: {message}"),
                    None => message.to_string(),
                })
            })
            .collect::<Vec<_>>();
        (!reasons.is_empty()).then(|| reasons.join(", "))
    }

    pub fn get_authorization(&self) -> Option<String> {
        self.payment
            .as_ref()
            .and_then(|payment| payment.id.clone())
            .or_else(|| self.id.clone())
            .or_else(|| {
                self.payment_result
                    .as_ref()
                    .and_then(|result| result.payment.as_ref())
                    .and_then(|payment| payment.id.clone())
            })
    }

    fn get_merchant_reference(&self) -> Option<String> {
        self.payment
            .as_ref()
            .and_then(|payment| payment.payment_output.as_ref())
            .and_then(|output| output.references.as_ref())
            .and_then(|references| references.merchant_reference.clone())
    }

    pub fn get_attempt_status(&self) -> AttemptStatus {
        map_globalcollect_status(self.payment_status().or(self.status.as_deref()), self.is_authorized())
    }

    pub fn get_refund_status(&self) -> RefundStatus {
        match self.status.as_deref() {
            Some("REFUNDED") => RefundStatus::Success,
            Some("REFUND_REQUESTED" | "PENDING_APPROVAL") => RefundStatus::Pending,
            _ => RefundStatus::Failure,
        }
    }

    pub fn to_error_response(
        &self,
        status_code: u16,
        attempt_status: Option<AttemptStatus>,
    ) -> ErrorResponse {
        ErrorResponse {
            code: Some(self.get_error_code()),
            message: self.get_message(false),
            reason: self.get_error_reason(),
            status_code,
            attempt_status,
            connector_transaction_id: self.get_authorization(),
        }
    }
}

// ============================================================================
// STATUS MAPPING
// ============================================================================

fn map_globalcollect_status(status: Option<&str>, is_authorized: bool) -> AttemptStatus {
    match status.map(str::to_uppercase).as_deref() {
        Some("CAPTURED" | "PAID") => AttemptStatus::Charged,
        Some("CAPTURE_REQUESTED") => AttemptStatus::CaptureInitiated,
        Some("PENDING_APPROVAL" | "PENDING_CAPTURE") if is_authorized => AttemptStatus::Authorized,
        Some("CANCELLED" | "REVERSED") => AttemptStatus::Voided,
        Some("REJECTED" | "REJECTED_CAPTURE") => AttemptStatus::Failure,
        _ => AttemptStatus::Pending,
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

// ============================================================================
// RESPONSE TRANSFORMERS
// ============================================================================

fn handle_payments_response<F, Req>(
    item: ResponseRouterData<
        GlobalCollectResponse,
        RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>,
    >,
    flow: FlowName,
) -> Result<RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>, Error> {
    let ResponseRouterData {
        response,
        router_data,
        http_code,
    } = item;
    let requires_approval = router_data.resource_common_data.options.requires_approval;

    if response.is_successful(flow, requires_approval) {
        let status = response.get_attempt_status();
        let resource_id = response
            .get_authorization()
            .map(ResponseId::ConnectorTransactionId)
            .unwrap_or(ResponseId::NoResponseId);
        Ok(RouterDataV2 {
            response: Ok(PaymentsResponseData {
                resource_id,
                message: response.get_message(true),
                connector_response_reference_id: response.get_merchant_reference(),
                status_code: http_code,
            }),
            resource_common_data: PaymentFlowData {
                status,
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
            GlobalCollectResponse,
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
{
    type Error = Error;

    fn try_from(
        item: ResponseRouterData<
            GlobalCollectResponse,
            RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        handle_payments_response(item, FlowName::Authorize)
    }
}

impl
    TryFrom<
        ResponseRouterData<
            GlobalCollectResponse,
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>
{
    type Error = Error;

    fn try_from(
        item: ResponseRouterData<
            GlobalCollectResponse,
            RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        handle_payments_response(item, FlowName::Capture)
    }
}

impl
    TryFrom<
        ResponseRouterData<
            GlobalCollectResponse,
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    > for RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>
{
    type Error = Error;

    fn try_from(
        item: ResponseRouterData<
            GlobalCollectResponse,
            RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        handle_payments_response(item, FlowName::Void)
    }
}

impl
    TryFrom<
        ResponseRouterData<
            GlobalCollectResponse,
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    > for RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>
{
    type Error = Error;

    fn try_from(
        item: ResponseRouterData<
            GlobalCollectResponse,
            RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let ResponseRouterData {
            response,
            router_data,
            http_code,
        } = item;

        if response.is_successful(FlowName::Refund, None) {
            let refund_status = response.get_refund_status();
            Ok(Self {
                response: Ok(RefundsResponseData {
                    connector_refund_id: response.get_authorization(),
                    refund_status,
                    message: response.get_message(true),
                    status_code: http_code,
                }),
                resource_common_data: RefundFlowData {
                    status: refund_status,
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
                    connector_http_status_code: Some(http_code),
                    ..router_data.resource_common_data
                },
                ..router_data
            })
        }
    }
}
