#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::{
    collections::VecDeque,
    str::FromStr,
    sync::{Arc, Mutex},
};

use cards::CardNumber;
use common_enums::Currency;
use common_utils::{
    consts::Env,
    request::{Method, Request},
    MinorUnit,
};
use composite_service::{
    configs::{Common, Config},
    Gateway,
};
use domain_types::{
    connector_types::ConnectorEnum,
    errors::{ApiClientError, ConnectorError},
    payment_method_data::Card,
    router_data::ConnectorAuthType,
    router_request_types::{AirlineData, PaymentOptions},
    router_response_types::Response,
    types::{ConnectorParams, Connectors},
};
use error_stack::report;
use external_services::service::{ConnectorTransport, CustomResult};
use hyperswitch_masking::{PeekInterface, Secret};
use serde_json::{json, Value};

const GLOBALCOLLECT_SANDBOX: &str = "https://eu.sandbox.api-ingenico.com/";
const MOKA_LIVE: &str = "https://service.mokaunited.com/";
const PAYMENT_ID: &str = "000000122600000054130000100001";
const MOKA_AUTHORIZATION: &str = "Test-9732c2ce-08d9-4ff6-a89f-bd3fa345811c";

enum Canned {
    Reply(u16, Value),
    Raw(u16, &'static str),
    Timeout,
}

#[derive(Debug)]
struct Recorded {
    url: String,
    method: Method,
    body: Option<Value>,
}

/// Answers each call with the next canned reply and remembers what was sent.
#[derive(Default)]
struct RecordingTransport {
    replies: Mutex<VecDeque<Canned>>,
    requests: Mutex<Vec<Recorded>>,
}

impl RecordingTransport {
    fn new(replies: impl IntoIterator<Item = Canned>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::default(),
        })
    }

    fn requests(&self) -> Vec<Recorded> {
        std::mem::take(&mut *self.requests.lock().unwrap())
    }
}

#[async_trait::async_trait]
impl ConnectorTransport for RecordingTransport {
    async fn send(
        &self,
        request: Request,
    ) -> CustomResult<Result<Response, Response>, ApiClientError> {
        self.requests.lock().unwrap().push(Recorded {
            url: request.url.clone(),
            method: request.method,
            body: request
                .body
                .as_ref()
                .map(|body| serde_json::from_str(body.get_inner_value().peek()).unwrap()),
        });

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected extra call");
        let (status_code, body) = match reply {
            Canned::Reply(status_code, body) => (status_code, body.to_string()),
            Canned::Raw(status_code, body) => (status_code, body.to_string()),
            Canned::Timeout => return Err(report!(ApiClientError::RequestTimeoutReceived)),
        };
        let response = Response {
            headers: None,
            response: bytes::Bytes::from(body),
            status_code,
        };
        Ok(if status_code < 400 {
            Ok(response)
        } else {
            Err(response)
        })
    }
}

fn connectors() -> Connectors {
    Connectors {
        globalcollect: ConnectorParams::new(GLOBALCOLLECT_SANDBOX.to_string(), false),
        moka: ConnectorParams::new(MOKA_LIVE.to_string(), false),
    }
}

fn globalcollect(transport: Arc<RecordingTransport>) -> Gateway {
    Gateway::new(
        ConnectorEnum::GlobalCollect,
        ConnectorAuthType::SignatureKey {
            api_key: Secret::new("api-key-id".to_string()),
            key1: Secret::new("1226".to_string()),
            api_secret: Secret::new("secret-api-key".to_string()),
        },
        connectors(),
        transport,
    )
}

fn moka(transport: Arc<RecordingTransport>) -> Gateway {
    Gateway::new(
        ConnectorEnum::Moka,
        ConnectorAuthType::SignatureKey {
            api_key: Secret::new("username".to_string()),
            key1: Secret::new("123".to_string()),
            api_secret: Secret::new("password".to_string()),
        },
        connectors(),
        transport,
    )
}

fn card(number: &str) -> Card {
    Card {
        card_number: CardNumber::from_str(number).unwrap(),
        card_exp_month: Secret::new("9".to_string()),
        card_exp_year: Secret::new("2030".to_string()),
        card_cvc: Secret::new("123".to_string()),
        first_name: Some(Secret::new("Longbob".to_string())),
        last_name: Some(Secret::new("Longsen".to_string())),
        card_network: None,
    }
}

fn options() -> PaymentOptions {
    PaymentOptions {
        order_id: Some("order-1".to_string()),
        description: Some("Store Purchase".to_string()),
        ..Default::default()
    }
}

fn gc_payment(status: &str, is_authorized: bool, amount: i64) -> Value {
    json!({
        "payment": {
            "id": PAYMENT_ID,
            "paymentOutput": {
                "amountOfMoney": {"amount": amount, "currencyCode": "USD"},
                "references": {"merchantReference": "order-1"}
            },
            "status": status,
            "statusOutput": {"isAuthorized": is_authorized, "statusCode": 600}
        }
    })
}

fn gc_error(code: &str, id: &str, http_status: u16) -> Value {
    json!({
        "errorId": "b3e6a6e4",
        "errors": [{
            "code": code,
            "id": id,
            "message": id,
            "httpStatusCode": http_status
        }]
    })
}

fn moka_success() -> Value {
    json!({
        "Data": {
            "IsSuccessful": true,
            "ResultCode": "",
            "ResultMessage": "",
            "VirtualPosOrderId": MOKA_AUTHORIZATION
        },
        "ResultCode": "Success",
        "ResultMessage": "",
        "Exception": null
    })
}

fn moka_failure(code: &str) -> Value {
    json!({"Data": null, "ResultCode": code, "ResultMessage": "", "Exception": null})
}

#[tokio::test]
async fn globalcollect_authorize_then_partial_capture() {
    let transport = RecordingTransport::new([
        Canned::Reply(201, gc_payment("PENDING_APPROVAL", true, 100)),
        Canned::Reply(200, gc_payment("CAPTURE_REQUESTED", true, 99)),
    ]);
    let gateway = globalcollect(transport.clone());

    let auth = gateway
        .authorize(MinorUnit::new(100), Currency::USD, card("4567350000427977"), options())
        .await
        .unwrap();
    assert!(auth.is_success());
    assert_eq!(auth.message, "Succeeded");
    assert_eq!(auth.authorization.as_deref(), Some(PAYMENT_ID));
    assert!(auth.test);

    let capture = gateway
        .capture(
            MinorUnit::new(99),
            Currency::USD,
            auth.authorization.as_deref().unwrap(),
            options(),
        )
        .await
        .unwrap();
    assert!(capture.is_success());
    assert_eq!(
        capture.params["payment"]["paymentOutput"]["amountOfMoney"]["amount"],
        99
    );

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[0].url,
        "https://eu.sandbox.api-ingenico.com/v1/1226/payments"
    );
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(
        requests[1].url,
        format!("https://eu.sandbox.api-ingenico.com/v1/1226/payments/{PAYMENT_ID}/approve")
    );
    assert_eq!(requests[1].body.as_ref().unwrap()["amount"], 99);
}

#[tokio::test]
async fn globalcollect_purchase_captures_after_authorize() {
    let transport = RecordingTransport::new([
        Canned::Reply(201, gc_payment("PENDING_APPROVAL", true, 100)),
        Canned::Reply(200, gc_payment("CAPTURE_REQUESTED", true, 100)),
    ]);
    let gateway = globalcollect(transport.clone());

    let response = gateway
        .purchase(MinorUnit::new(100), Currency::USD, card("4567350000427977"), options())
        .await
        .unwrap();

    assert!(response.is_success());
    assert_eq!(response.message, "Succeeded");
    assert_eq!(response.params["payment"]["status"], "CAPTURE_REQUESTED");
    assert_eq!(transport.requests().len(), 2);
}

#[tokio::test]
async fn globalcollect_purchase_without_approval_is_a_single_call() {
    let transport = RecordingTransport::new([Canned::Reply(
        201,
        gc_payment("CAPTURE_REQUESTED", true, 100),
    )]);
    let gateway = globalcollect(transport.clone());

    let response = gateway
        .purchase(
            MinorUnit::new(100),
            Currency::USD,
            card("4567350000427977"),
            PaymentOptions {
                requires_approval: Some(false),
                ..options()
            },
        )
        .await
        .unwrap();

    assert!(response.is_success());
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].body.as_ref().unwrap()["cardPaymentMethodSpecificInput"]["requiresApproval"],
        false
    );
}

#[tokio::test]
async fn globalcollect_declined_purchase_skips_capture() {
    let declined = json!({
        "errorId": "cf86dd1b",
        "errors": [{"code": "430330", "message": "Not authorised", "httpStatusCode": 402}],
        "paymentResult": {
            "payment": {
                "id": "000000122600000054150000100001",
                "status": "REJECTED",
                "statusOutput": {"isAuthorized": false, "statusCode": 100}
            }
        }
    });
    let transport = RecordingTransport::new([Canned::Reply(402, declined)]);
    let gateway = globalcollect(transport.clone());

    let response = gateway
        .purchase(MinorUnit::new(100), Currency::USD, card("4263982640269299"), options())
        .await
        .unwrap();

    assert!(!response.is_success());
    assert_eq!(response.message, "Not authorised");
    assert_eq!(response.error_code.as_deref(), Some("430330"));
    assert!(response.authorization.is_none());
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn globalcollect_unknown_authorization() {
    let transport = RecordingTransport::new([
        Canned::Reply(404, gc_error("1002", "UNKNOWN_PAYMENT_ID", 404)),
        Canned::Reply(404, gc_error("1002", "UNKNOWN_PAYMENT_ID", 404)),
        Canned::Reply(404, gc_error("1002", "UNKNOWN_PAYMENT_ID", 404)),
    ]);
    let gateway = globalcollect(transport);

    let capture = gateway
        .capture(MinorUnit::new(100), Currency::USD, "123", options())
        .await
        .unwrap();
    let refund = gateway
        .refund(MinorUnit::new(100), Currency::USD, "123", options())
        .await
        .unwrap();
    let void = gateway.void("123", options()).await.unwrap();

    for response in [capture, refund, void] {
        assert!(!response.is_success());
        assert_eq!(response.message, "UNKNOWN_PAYMENT_ID");
        assert_eq!(response.error_code.as_deref(), Some("1002"));
    }
}

#[tokio::test]
async fn globalcollect_partial_airline_data_names_missing_properties() {
    let body = json!({
        "errorId": "5f6a4b2e",
        "errors": [
            {
                "code": "1009",
                "id": "PARAMETER_NOT_FOUND_IN_REQUEST",
                "propertyName": "order.additionalInput.airlineData.code",
                "message": "PARAMETER_NOT_FOUND_IN_REQUEST",
                "httpStatusCode": 400
            },
            {
                "code": "1009",
                "id": "PARAMETER_NOT_FOUND_IN_REQUEST",
                "propertyName": "order.additionalInput.airlineData.name",
                "message": "PARAMETER_NOT_FOUND_IN_REQUEST",
                "httpStatusCode": 400
            }
        ]
    });
    let transport = RecordingTransport::new([Canned::Reply(400, body)]);
    let gateway = globalcollect(transport);

    let response = gateway
        .purchase(
            MinorUnit::new(100),
            Currency::USD,
            card("4567350000427977"),
            PaymentOptions {
                airline_data: Some(AirlineData {
                    flight_date: Some("20190810".to_string()),
                    passenger_name: Some("Randi Smith".to_string()),
                    ..Default::default()
                }),
                ..options()
            },
        )
        .await
        .unwrap();

    assert!(!response.is_success());
    let properties: Vec<&str> = response.params["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|error| error["propertyName"].as_str().unwrap())
        .collect();
    assert_eq!(
        properties,
        [
            "order.additionalInput.airlineData.code",
            "order.additionalInput.airlineData.name"
        ]
    );
}

#[tokio::test]
async fn globalcollect_verify_requires_the_void() {
    let transport = RecordingTransport::new([
        Canned::Reply(201, gc_payment("PENDING_APPROVAL", true, 100)),
        Canned::Reply(
            200,
            json!({
                "payment": {"id": PAYMENT_ID, "status": "CANCELLED"},
                "cardPaymentMethodSpecificOutput": {"voidResponseId": "00"}
            }),
        ),
    ]);
    let gateway = globalcollect(transport.clone());

    let response = gateway
        .verify(Currency::USD, card("4567350000427977"), options())
        .await
        .unwrap();
    assert!(response.is_success());
    assert_eq!(response.authorization.as_deref(), Some(PAYMENT_ID));

    let requests = transport.requests();
    assert_eq!(
        requests[0].body.as_ref().unwrap()["order"]["amountOfMoney"]["amount"],
        100
    );
    assert!(requests[1].url.ends_with("/cancel"));

    let transport = RecordingTransport::new([
        Canned::Reply(201, gc_payment("PENDING_APPROVAL", true, 100)),
        Canned::Reply(404, gc_error("1002", "UNKNOWN_PAYMENT_ID", 404)),
    ]);
    let response = globalcollect(transport)
        .verify(Currency::USD, card("4567350000427977"), options())
        .await
        .unwrap();
    assert!(!response.is_success());
    assert!(response.authorization.is_none());
}

#[tokio::test]
async fn transport_failures_become_code_less_failures() {
    let transport = RecordingTransport::new([Canned::Timeout]);
    let response = globalcollect(transport)
        .authorize(MinorUnit::new(100), Currency::USD, card("4567350000427977"), options())
        .await
        .unwrap();

    assert!(!response.is_success());
    assert!(response.error_code.is_none());
    assert_eq!(response.message, "Server responded with Request Timeout");
    assert_eq!(response.params, json!({}));
}

#[tokio::test]
async fn unreadable_success_body_is_a_failure() {
    let transport = RecordingTransport::new([Canned::Raw(200, "<html>maintenance</html>")]);
    let response = moka(transport)
        .authorize(MinorUnit::new(100), Currency::TRY, card("5269111122223332"), options())
        .await
        .unwrap();

    assert!(!response.is_success());
    assert!(response.error_code.is_none());
    assert_eq!(response.params, json!({}));
}

#[tokio::test]
async fn unreadable_error_body_matches_unreadable_success_body() {
    let transport = RecordingTransport::new([
        Canned::Raw(502, "<html>Bad Gateway</html>"),
        Canned::Raw(200, "<html>Bad Gateway</html>"),
        Canned::Raw(503, "<html>Service Unavailable</html>"),
    ]);
    let moka = moka(transport.clone());
    let bad_gateway = moka
        .authorize(MinorUnit::new(100), Currency::TRY, card("5269111122223332"), options())
        .await
        .unwrap();
    let ok_status = moka
        .authorize(MinorUnit::new(100), Currency::TRY, card("5269111122223332"), options())
        .await
        .unwrap();

    for response in [&bad_gateway, &ok_status] {
        assert!(!response.is_success());
        assert!(response.error_code.is_none());
        assert_eq!(response.message, "Failed to deserialize connector response");
        assert_eq!(response.params, json!({}));
    }

    let response = globalcollect(transport)
        .capture(MinorUnit::new(100), Currency::USD, PAYMENT_ID, options())
        .await
        .unwrap();
    assert!(!response.is_success());
    assert!(response.error_code.is_none());
    assert_eq!(response.message, "Failed to deserialize connector response");
}

#[tokio::test]
async fn wrong_credential_shape_fails_before_sending() {
    let transport = RecordingTransport::new([]);
    let gateway = Gateway::new(
        ConnectorEnum::Moka,
        ConnectorAuthType::HeaderKey {
            api_key: Secret::new("key".to_string()),
        },
        connectors(),
        transport.clone(),
    );

    let error = gateway
        .authorize(MinorUnit::new(100), Currency::TRY, card("5269111122223332"), options())
        .await
        .unwrap_err();
    assert_eq!(error.current_context(), &ConnectorError::FailedToObtainAuthType);
    assert!(transport.requests().is_empty());
}

#[test]
fn gateways_are_selected_by_name() {
    let config = Config {
        common: Common {
            environment: Env::Development,
        },
        log: Default::default(),
        proxy: Default::default(),
        connectors: connectors(),
    };

    let gateway =
        Gateway::from_connector_name(&config, "global_collect", ConnectorAuthType::NoKey).unwrap();
    assert_eq!(gateway.connector_name(), ConnectorEnum::GlobalCollect);

    let error = Gateway::from_connector_name(&config, "paypal", ConnectorAuthType::NoKey)
        .unwrap_err();
    assert_eq!(
        error.current_context(),
        &ConnectorError::InvalidConnectorName {
            name: "paypal".to_string()
        }
    );
}

#[tokio::test]
async fn moka_purchase_is_one_direct_payment() {
    let transport = RecordingTransport::new([Canned::Reply(200, moka_success())]);
    let gateway = moka(transport.clone());

    let response = gateway
        .purchase(MinorUnit::new(100), Currency::TRY, card("5269111122223332"), options())
        .await
        .unwrap();

    assert!(response.is_success());
    assert_eq!(response.message, "Success");
    assert_eq!(response.authorization.as_deref(), Some(MOKA_AUTHORIZATION));
    assert!(response.test);

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].url,
        "https://service.mokaunited.com/PaymentDealer/DoDirectPayment"
    );
    let request = &requests[0].body.as_ref().unwrap()["PaymentDealerRequest"];
    assert_eq!(request["IsPreAuth"], 0);
    assert_eq!(request["Amount"], "1.00");
}

#[tokio::test]
async fn moka_authorize_capture_refund() {
    let transport = RecordingTransport::new([
        Canned::Reply(200, moka_success()),
        Canned::Reply(200, moka_success()),
        Canned::Reply(200, moka_success()),
    ]);
    let gateway = moka(transport.clone());

    let auth = gateway
        .authorize(MinorUnit::new(100), Currency::TRY, card("5269111122223332"), options())
        .await
        .unwrap();
    assert!(auth.is_success());
    let authorization = auth.authorization.unwrap();

    let capture = gateway
        .capture(MinorUnit::new(100), Currency::TRY, &authorization, options())
        .await
        .unwrap();
    assert!(capture.is_success());

    let refund = gateway
        .refund(MinorUnit::new(100), Currency::TRY, &authorization, options())
        .await
        .unwrap();
    assert!(refund.is_success());

    let requests = transport.requests();
    assert_eq!(
        requests[0].body.as_ref().unwrap()["PaymentDealerRequest"]["IsPreAuth"],
        1
    );
    assert!(requests[1].url.ends_with("PaymentDealer/DoCapture"));
    assert!(requests[2].url.ends_with("PaymentDealer/DoCreateRefundRequest"));
    assert_eq!(
        requests[2].body.as_ref().unwrap()["PaymentDealerRequest"]["VirtualPosOrderId"],
        MOKA_AUTHORIZATION
    );
}

#[tokio::test]
async fn moka_verify_ignores_the_void() {
    let transport = RecordingTransport::new([
        Canned::Reply(200, moka_success()),
        Canned::Reply(200, moka_failure("PaymentDealer.DoVoid.InvalidRequest")),
    ]);
    let response = moka(transport.clone())
        .verify(Currency::TRY, card("5269111122223332"), options())
        .await
        .unwrap();

    assert!(response.is_success());
    assert_eq!(response.authorization.as_deref(), Some(MOKA_AUTHORIZATION));
    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[1].url.ends_with("PaymentDealer/DoVoid"));
}

#[tokio::test]
async fn moka_declined_purchase() {
    let transport = RecordingTransport::new([Canned::Reply(
        200,
        moka_failure("PaymentDealer.DoDirectPayment.InvalidRequest"),
    )]);
    let response = moka(transport)
        .purchase(MinorUnit::new(100), Currency::TRY, card("5269111122223332"), options())
        .await
        .unwrap();

    assert!(!response.is_success());
    assert!(!response.test);
    assert_eq!(
        response.error_code.as_deref(),
        Some("PaymentDealer.DoDirectPayment.InvalidRequest")
    );
    assert!(response.authorization.is_none());
}
