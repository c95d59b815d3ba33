#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use std::str::FromStr;

    use cards::CardNumber;
    use common_enums::{AttemptStatus, CaptureMethod, CountryAlpha2, Currency, RefundStatus};
    use common_utils::{pii::Email, types::MinorUnit};
    use domain_types::{
        connector_flow::{Authorize, Capture, Refund, Void},
        connector_types::{
            PaymentFlowData, PaymentVoidData, PaymentsAuthorizeData, PaymentsCaptureData,
            PaymentsResponseData, RefundFlowData, RefundsData, RefundsResponseData, ResponseId,
        },
        payment_method_data::Card,
        router_data::ConnectorAuthType,
        router_data_v2::RouterDataV2,
        router_request_types::{Address, BasketProduct, PaymentOptions, ThreeDRedirect},
        router_response_types::Response,
        types::{ConnectorParams, Connectors},
    };
    use hyperswitch_masking::{PeekInterface, Secret};
    use interfaces::{
        api::ConnectorCommon, connector_integration_v2::ConnectorIntegrationV2,
        scrubbing::ConnectorScrubbing,
    };
    use serde_json::{json, Value};

    use crate::connectors::moka::{
        transformers::{map_error_code, MokaAuthType, LIVE_BASE_URL, TEST_BASE_URL},
        Moka,
    };

    const AUTHORIZATION: &str = "Test-9732c2ce-08d9-4ff6-a89f-bd3fa345811c";

    fn connectors(base_url: &str) -> Connectors {
        Connectors {
            globalcollect: ConnectorParams::default(),
            moka: ConnectorParams::new(base_url.to_string(), false),
        }
    }

    fn auth() -> ConnectorAuthType {
        ConnectorAuthType::SignatureKey {
            api_key: Secret::new("username".to_string()),
            key1: Secret::new("123".to_string()),
            api_secret: Secret::new("password".to_string()),
        }
    }

    fn card() -> Card {
        Card {
            card_number: CardNumber::from_str("5269111122223332").unwrap(),
            card_exp_month: Secret::new("9".to_string()),
            card_exp_year: Secret::new("30".to_string()),
            card_cvc: Secret::new("123".to_string()),
            first_name: Some(Secret::new("Safiye".to_string())),
            last_name: Some(Secret::new("Ali".to_string())),
            card_network: None,
        }
    }

    fn options() -> PaymentOptions {
        PaymentOptions {
            description: Some("Store Purchase".to_string()),
            ..Default::default()
        }
    }

    fn authorize_data(
        options: PaymentOptions,
        capture_method: CaptureMethod,
        minor_amount: i64,
    ) -> RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
    {
        RouterDataV2::new(
            PaymentFlowData::new(connectors(LIVE_BASE_URL), options, false),
            auth(),
            PaymentsAuthorizeData {
                card: card(),
                minor_amount: MinorUnit::new(minor_amount),
                currency: Currency::TRY,
                capture_method: Some(capture_method),
            },
        )
    }

    fn capture_data(
        transaction_id: &str,
    ) -> RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData> {
        RouterDataV2::new(
            PaymentFlowData::new(connectors(TEST_BASE_URL), options(), true),
            auth(),
            PaymentsCaptureData {
                minor_amount_to_capture: MinorUnit::new(100),
                currency: Currency::TRY,
                connector_transaction_id: ResponseId::ConnectorTransactionId(
                    transaction_id.to_string(),
                ),
            },
        )
    }

    fn void_data(
        transaction_id: &str,
    ) -> RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData> {
        RouterDataV2::new(
            PaymentFlowData::new(connectors(TEST_BASE_URL), options(), true),
            auth(),
            PaymentVoidData {
                connector_transaction_id: transaction_id.to_string(),
                cancellation_reason: None,
            },
        )
    }

    fn refund_data(
        transaction_id: &str,
        amount: i64,
    ) -> RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData> {
        RouterDataV2::new(
            RefundFlowData::new(connectors(TEST_BASE_URL), options(), true),
            auth(),
            RefundsData {
                refund_id: "refund-1".to_string(),
                connector_transaction_id: transaction_id.to_string(),
                minor_refund_amount: MinorUnit::new(amount),
                currency: Currency::TRY,
                reason: None,
            },
        )
    }

    fn response(body: Value) -> Response {
        Response {
            headers: None,
            response: bytes::Bytes::from(body.to_string()),
            status_code: 200,
        }
    }

    fn successful_response() -> Value {
        json!({
            "Data": {
                "IsSuccessful": true,
                "ResultCode": "",
                "ResultMessage": "",
                "VirtualPosOrderId": AUTHORIZATION
            },
            "ResultCode": "Success",
            "ResultMessage": "",
            "Exception": null
        })
    }

    fn top_level_error(code: &str) -> Value {
        json!({
            "Data": null,
            "ResultCode": code,
            "ResultMessage": "",
            "Exception": null
        })
    }

    fn request_json(body: Option<common_utils::request::RequestContent>) -> Value {
        serde_json::from_str(body.unwrap().get_inner_value().peek()).unwrap()
    }

    #[test]
    fn check_key_is_sha256_of_credentials() {
        let auth_type = MokaAuthType::try_from(&auth()).unwrap();
        assert_eq!(
            auth_type.check_key().peek(),
            "41e73f1a942487050836d50489cb2ec5aaa3f9685148cec193556eda29b99bf5"
        );
    }

    #[test]
    fn only_signature_key_auth_is_accepted() {
        let body_key = ConnectorAuthType::BodyKey {
            api_key: Secret::new("username".to_string()),
            key1: Secret::new("123".to_string()),
        };
        assert!(MokaAuthType::try_from(&body_key).is_err());
    }

    #[test]
    fn authorize_is_a_pre_auth() {
        let data = authorize_data(options(), CaptureMethod::Manual, 100);
        let body = request_json(Moka::new().get_request_body(&data).unwrap());

        assert_eq!(
            body["PaymentDealerAuthentication"],
            json!({
                "DealerCode": "123",
                "Username": "username",
                "Password": "password",
                "CheckKey": "41e73f1a942487050836d50489cb2ec5aaa3f9685148cec193556eda29b99bf5"
            })
        );

        let request = &body["PaymentDealerRequest"];
        assert_eq!(request["IsPreAuth"], 1);
        assert_eq!(request["IsPoolPayment"], 0);
        assert_eq!(request["CardHolderFullName"], "Safiye Ali");
        assert_eq!(request["CardNumber"], "5269111122223332");
        assert_eq!(request["ExpMonth"], "09");
        assert_eq!(request["ExpYear"], "2030");
        assert_eq!(request["CvcNumber"], "123");
        assert_eq!(request["Amount"], "1.00");
        assert_eq!(request["Currency"], "TL");
        assert_eq!(request["Description"], "Store Purchase");
        assert!(request.get("ReturnHash").is_none());
        assert_eq!(request["BuyerInformation"], json!({"BuyerFullName": "Safiye Ali"}));
        assert!(request.get("BasketProduct").is_none());
    }

    #[test]
    fn purchase_is_not_a_pre_auth() {
        let data = authorize_data(options(), CaptureMethod::Automatic, 100);
        let body = request_json(Moka::new().get_request_body(&data).unwrap());
        assert_eq!(body["PaymentDealerRequest"]["IsPreAuth"], 0);
    }

    #[test]
    fn other_currencies_keep_their_iso_code() {
        let mut data = authorize_data(options(), CaptureMethod::Manual, 100);
        data.request.currency = Currency::USD;
        let body = request_json(Moka::new().get_request_body(&data).unwrap());
        assert_eq!(body["PaymentDealerRequest"]["Currency"], "USD");
    }

    #[test]
    fn buyer_information_is_passed() {
        let options = PaymentOptions {
            email: Some(Email::from_str("safiye.ali@example.com").unwrap()),
            billing_address: Some(Address {
                line1: Some(Secret::new("456 My Street".to_string())),
                city: Some("Istanbul".to_string()),
                country: Some(CountryAlpha2::TR),
                phone: Some(Secret::new("(555)555-5555".to_string())),
                ..Default::default()
            }),
            ..options()
        };
        let data = authorize_data(options, CaptureMethod::Manual, 100);
        let body = request_json(Moka::new().get_request_body(&data).unwrap());

        assert_eq!(
            body["PaymentDealerRequest"]["BuyerInformation"],
            json!({
                "BuyerFullName": "Safiye Ali",
                "BuyerEmail": "safiye.ali@example.com",
                "BuyerAddress": "456 My Street",
                "BuyerGsmNumber": "(555)555-5555"
            })
        );
    }

    #[test]
    fn buyer_name_alone_is_passed() {
        let mut data = authorize_data(options(), CaptureMethod::Manual, 100);
        assert!(data.resource_common_data.options.email.is_none());
        assert!(data.resource_common_data.options.billing_address.is_none());
        let body = request_json(Moka::new().get_request_body(&data).unwrap());
        assert_eq!(
            body["PaymentDealerRequest"]["BuyerInformation"],
            json!({"BuyerFullName": "Safiye Ali"})
        );

        data.request.card.first_name = None;
        data.request.card.last_name = None;
        let body = request_json(Moka::new().get_request_body(&data).unwrap());
        assert!(body["PaymentDealerRequest"].get("BuyerInformation").is_none());
    }

    #[test]
    fn basket_product_is_passed() {
        let options = PaymentOptions {
            basket_products: vec![
                BasketProduct {
                    product_id: Some(333),
                    product_code: Some("0173".to_string()),
                    unit_price: MinorUnit::new(19900),
                    quantity: 1,
                },
                BasketProduct {
                    product_id: Some(281),
                    product_code: Some("38".to_string()),
                    unit_price: MinorUnit::new(5000),
                    quantity: 1,
                },
            ],
            ..options()
        };
        let data = authorize_data(options, CaptureMethod::Manual, 24900);
        let body = request_json(Moka::new().get_request_body(&data).unwrap());

        assert_eq!(body["PaymentDealerRequest"]["Amount"], "249.00");
        assert_eq!(
            body["PaymentDealerRequest"]["BasketProduct"],
            json!([
                {"ProductId": 333, "ProductCode": "0173", "UnitPrice": "199.00", "Quantity": 1},
                {"ProductId": 281, "ProductCode": "38", "UnitPrice": "50.00", "Quantity": 1}
            ])
        );
    }

    #[test]
    fn three_d_payments_use_their_own_endpoint() {
        let options = PaymentOptions {
            execute_threed: Some(ThreeDRedirect {
                redirect_url: "https://example.com/return".to_string(),
                redirect_type: None,
            }),
            ..options()
        };
        let data = authorize_data(options, CaptureMethod::Automatic, 100);
        let connector = Moka::new();

        assert_eq!(
            connector.get_url(&data).unwrap(),
            "https://service.mokaunited.com/PaymentDealer/DoDirectPaymentThreeD"
        );
        let body = request_json(connector.get_request_body(&data).unwrap());
        let request = &body["PaymentDealerRequest"];
        assert_eq!(request["ReturnHash"], 1);
        assert_eq!(request["RedirectUrl"], "https://example.com/return");
        assert_eq!(request["RedirectType"], 0);
    }

    #[test]
    fn urls_per_operation() {
        let connector = Moka::new();
        assert_eq!(
            connector
                .get_url(&authorize_data(options(), CaptureMethod::Manual, 100))
                .unwrap(),
            "https://service.mokaunited.com/PaymentDealer/DoDirectPayment"
        );
        assert_eq!(
            connector.get_url(&capture_data(AUTHORIZATION)).unwrap(),
            "https://service.refmokaunited.com/PaymentDealer/DoCapture"
        );
        assert_eq!(
            connector.get_url(&void_data(AUTHORIZATION)).unwrap(),
            "https://service.refmokaunited.com/PaymentDealer/DoVoid"
        );
        assert_eq!(
            connector.get_url(&refund_data(AUTHORIZATION, 100)).unwrap(),
            "https://service.refmokaunited.com/PaymentDealer/DoCreateRefundRequest"
        );
    }

    #[test]
    fn capture_refund_and_void_bodies() {
        let connector = Moka::new();

        let capture = request_json(
            connector
                .get_request_body(&capture_data(AUTHORIZATION))
                .unwrap(),
        );
        assert_eq!(
            capture["PaymentDealerRequest"],
            json!({"VirtualPosOrderId": AUTHORIZATION, "Amount": "1.00"})
        );

        let refund = request_json(
            connector
                .get_request_body(&refund_data(AUTHORIZATION, 0))
                .unwrap(),
        );
        assert_eq!(
            refund["PaymentDealerRequest"],
            json!({"VirtualPosOrderId": AUTHORIZATION, "Amount": "0.00"})
        );

        let void = request_json(
            connector
                .get_request_body(&void_data(AUTHORIZATION))
                .unwrap(),
        );
        assert_eq!(
            void["PaymentDealerRequest"],
            json!({"VirtualPosOrderId": AUTHORIZATION, "VoidRefundReason": 2})
        );
    }

    #[test]
    fn successful_purchase_flags_test_authorization() {
        let data = authorize_data(options(), CaptureMethod::Automatic, 100);
        let result = Moka::new()
            .handle_response_v2(&data, response(successful_response()))
            .unwrap();

        assert_eq!(result.resource_common_data.status, AttemptStatus::Charged);
        assert_eq!(result.resource_common_data.test_mode, Some(true));
        let payment = result.response.unwrap();
        assert_eq!(
            payment.resource_id,
            ResponseId::ConnectorTransactionId(AUTHORIZATION.to_string())
        );
        assert_eq!(payment.message, "Success");
    }

    #[test]
    fn successful_authorize_is_authorized() {
        let data = authorize_data(options(), CaptureMethod::Manual, 100);
        let result = Moka::new()
            .handle_response_v2(&data, response(successful_response()))
            .unwrap();
        assert_eq!(result.resource_common_data.status, AttemptStatus::Authorized);
    }

    #[test]
    fn failed_purchase_with_top_level_error() {
        let data = authorize_data(options(), CaptureMethod::Automatic, 100);
        let result = Moka::new()
            .handle_response_v2(
                &data,
                response(top_level_error("PaymentDealer.DoDirectPayment.InvalidRequest")),
            )
            .unwrap();

        assert_eq!(
            result.resource_common_data.status,
            AttemptStatus::AuthorizationFailed
        );
        assert_eq!(result.resource_common_data.test_mode, Some(false));
        let error = result.response.unwrap_err();
        assert_eq!(
            error.code.as_deref(),
            Some("PaymentDealer.DoDirectPayment.InvalidRequest")
        );
        assert_eq!(error.message, "PaymentDealer.DoDirectPayment.InvalidRequest");
    }

    #[test]
    fn failed_purchase_with_nested_error() {
        let body = json!({
            "Data": {
                "IsSuccessful": false,
                "ResultCode": "000",
                "ResultMessage": "Genel Hata(Geçersiz kart numarası)",
                "VirtualPosOrderId": ""
            },
            "ResultCode": "Success",
            "ResultMessage": "",
            "Exception": null
        });
        let data = authorize_data(options(), CaptureMethod::Automatic, 100);
        let error = Moka::new()
            .handle_response_v2(&data, response(body))
            .unwrap()
            .response
            .unwrap_err();

        assert_eq!(error.code.as_deref(), Some("General error"));
        assert_eq!(error.message, "Genel Hata(Geçersiz kart numarası)");
        assert_eq!(error.connector_transaction_id, None);
    }

    #[test]
    fn byte_order_mark_is_ignored() {
        let mut body = b"\xEF\xBB\xBF".to_vec();
        body.extend_from_slice(successful_response().to_string().as_bytes());
        let data = authorize_data(options(), CaptureMethod::Automatic, 100);
        let result = Moka::new()
            .handle_response_v2(
                &data,
                Response {
                    headers: None,
                    response: bytes::Bytes::from(body),
                    status_code: 200,
                },
            )
            .unwrap();
        assert!(result.response.is_ok());
    }

    #[test]
    fn capture_outcomes() {
        let connector = Moka::new();

        let result = connector
            .handle_response_v2(&capture_data(AUTHORIZATION), response(successful_response()))
            .unwrap();
        assert_eq!(result.resource_common_data.status, AttemptStatus::Charged);

        let result = connector
            .handle_response_v2(
                &capture_data("wrong-authorization"),
                response(top_level_error("PaymentDealer.DoCapture.PaymentNotFound")),
            )
            .unwrap();
        assert_eq!(result.resource_common_data.status, AttemptStatus::CaptureFailed);
        assert_eq!(
            result.response.unwrap_err().code.as_deref(),
            Some("PaymentDealer.DoCapture.PaymentNotFound")
        );
    }

    #[test]
    fn refund_outcomes() {
        let connector = Moka::new();
        let successful_refund = json!({
            "Data": {
                "IsSuccessful": true,
                "ResultCode": "",
                "ResultMessage": "",
                "RefundRequestId": 2320
            },
            "ResultCode": "Success",
            "ResultMessage": "",
            "Exception": null
        });

        let result = connector
            .handle_response_v2(&refund_data(AUTHORIZATION, 0), response(successful_refund))
            .unwrap();
        assert_eq!(result.resource_common_data.status, RefundStatus::Success);
        assert_eq!(result.response.unwrap().connector_refund_id, None);

        let result = connector
            .handle_response_v2(
                &refund_data("", 0),
                response(top_level_error(
                    "PaymentDealer.DoCreateRefundRequest.OtherTrxCodeOrVirtualPosOrderIdMustGiven",
                )),
            )
            .unwrap();
        assert_eq!(result.resource_common_data.status, RefundStatus::Failure);
        assert_eq!(
            result.response.unwrap_err().code.as_deref(),
            Some("PaymentDealer.DoCreateRefundRequest.OtherTrxCodeOrVirtualPosOrderIdMustGiven")
        );
    }

    #[test]
    fn void_outcomes() {
        let connector = Moka::new();

        let result = connector
            .handle_response_v2(&void_data(AUTHORIZATION), response(successful_response()))
            .unwrap();
        assert_eq!(result.resource_common_data.status, AttemptStatus::Voided);

        let result = connector
            .handle_response_v2(
                &void_data(""),
                response(top_level_error("PaymentDealer.DoVoid.InvalidRequest")),
            )
            .unwrap();
        assert_eq!(result.resource_common_data.status, AttemptStatus::VoidFailed);
        assert_eq!(
            result.response.unwrap_err().code.as_deref(),
            Some("PaymentDealer.DoVoid.InvalidRequest")
        );
    }

    #[test]
    fn error_codes_are_mapped_and_joined() {
        assert_eq!(map_error_code("015"), "CVV is wrong");
        assert_eq!(
            map_error_code("PaymentDealer.DoVoid.InvalidRequest"),
            "PaymentDealer.DoVoid.InvalidRequest"
        );

        let body = json!({
            "Data": {"IsSuccessful": false, "ResultCode": "002", "ResultMessage": ""},
            "ResultCode": "PaymentDealer.DoDirectPayment.PaymentFailed",
            "ResultMessage": ""
        });
        let error = Moka::new()
            .build_error_response(response(body))
            .unwrap();
        assert_eq!(
            error.code.as_deref(),
            Some("PaymentDealer.DoDirectPayment.PaymentFailed, Limit is insufficient")
        );
        assert_eq!(error.message, "PaymentDealer.DoDirectPayment.PaymentFailed");
    }

    #[test]
    fn transcripts_are_scrubbed() {
        let transcript = concat!(
            r#"{"PaymentDealerAuthentication":{"DealerCode":"123","Username":"username","#,
            r#""Password":"password","CheckKey":"41e73f1a"},"#,
            r#""PaymentDealerRequest":{"CardNumber":"5269111122223332","CvcNumber":"123"}}"#
        );
        let card = card();
        let scrubbed = Moka::new().scrub(transcript, &auth(), Some(&card));

        for field in [
            "DealerCode",
            "Username",
            "Password",
            "CheckKey",
            "CardNumber",
            "CvcNumber",
        ] {
            assert!(
                scrubbed.contains(&format!(r#""{field}":"[FILTERED]""#)),
                "{field} not scrubbed in {scrubbed}"
            );
        }
        assert!(!scrubbed.contains("5269111122223332"));
        assert!(!scrubbed.contains("41e73f1a"));
    }

    #[test]
    fn test_environment_detection() {
        let connector = Moka::new();
        assert!(connector.is_test_mode(&connectors(TEST_BASE_URL)));
        assert!(!connector.is_test_mode(&connectors(LIVE_BASE_URL)));
    }
}
