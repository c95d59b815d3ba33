use domain_types::{
    connector_types::{
        PaymentsResponseData, RawConnectorRequestResponse, RefundsResponseData, TestModeIndicator,
    },
    router_data_v2::RouterDataV2,
    router_response_types::GatewayResponse,
};
use hyperswitch_masking::PeekInterface;
use serde_json::Value;

pub trait ForeignFrom<F> {
    fn foreign_from(item: F) -> Self;
}

/// What a successful flow outcome contributes to a [`GatewayResponse`].
pub trait OutcomeSummary {
    fn message(&self) -> String;
    fn authorization(&self) -> Option<String>;
}

impl OutcomeSummary for PaymentsResponseData {
    fn message(&self) -> String {
        self.message.clone()
    }

    fn authorization(&self) -> Option<String> {
        self.resource_id.get_optional_id()
    }
}

impl OutcomeSummary for RefundsResponseData {
    fn message(&self) -> String {
        self.message.clone()
    }

    fn authorization(&self) -> Option<String> {
        self.connector_refund_id.clone()
    }
}

impl<F, ResourceCommonData, Req, Resp> ForeignFrom<&RouterDataV2<F, ResourceCommonData, Req, Resp>>
    for GatewayResponse
where
    ResourceCommonData: RawConnectorRequestResponse + TestModeIndicator,
    Resp: OutcomeSummary,
{
    fn foreign_from(router_data: &RouterDataV2<F, ResourceCommonData, Req, Resp>) -> Self {
        let params = vendor_params(&router_data.resource_common_data);
        let test = router_data.resource_common_data.is_test();
        match &router_data.response {
            Ok(outcome) => Self::succeeded(outcome.message(), outcome.authorization(), params, test),
            Err(error) => Self::failed(error.message.clone(), error.code.clone(), params, test),
        }
    }
}

/// The vendor reply as JSON, `{}` when no body was obtained or it was not JSON.
fn vendor_params(data: &impl RawConnectorRequestResponse) -> Value {
    data.get_raw_connector_response()
        .and_then(|raw| serde_json::from_str::<Value>(raw.peek()).ok())
        .unwrap_or_else(|| Value::Object(serde_json::Map::new()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use common_enums::RefundStatus;
    use domain_types::{
        connector_flow::{Authorize, Refund},
        connector_types::{PaymentFlowData, RefundFlowData, RefundsData, ResponseId},
        router_data::{ConnectorAuthType, ErrorResponse},
        router_request_types::PaymentOptions,
        types::Connectors,
    };
    use hyperswitch_masking::Secret;
    use serde_json::json;

    use super::*;

    fn flow_data(raw: Option<&str>, test_mode: bool) -> PaymentFlowData {
        let mut data =
            PaymentFlowData::new(Connectors::default(), PaymentOptions::default(), test_mode);
        data.set_raw_connector_response(raw.map(|raw| Secret::new(raw.to_string())));
        data
    }

    fn with_response(
        data: PaymentFlowData,
        response: Result<PaymentsResponseData, ErrorResponse>,
    ) -> GatewayResponse {
        let router_data = RouterDataV2 {
            flow: std::marker::PhantomData::<Authorize>,
            resource_common_data: data,
            connector_auth_type: ConnectorAuthType::NoKey,
            request: (),
            response,
        };
        GatewayResponse::foreign_from(&router_data)
    }

    #[test]
    fn success_carries_authorization_and_params() {
        let response = with_response(
            flow_data(Some(r#"{"payment":{"id":"42","status":"PENDING_APPROVAL"}}"#), true),
            Ok(PaymentsResponseData {
                resource_id: ResponseId::ConnectorTransactionId("42".to_string()),
                message: "Succeeded".to_string(),
                connector_response_reference_id: None,
                status_code: 201,
            }),
        );

        assert!(response.is_success());
        assert_eq!(response.message, "Succeeded");
        assert_eq!(response.authorization.as_deref(), Some("42"));
        assert_eq!(response.params["payment"]["status"], "PENDING_APPROVAL");
        assert!(response.test);
        assert!(response.error_code.is_none());
    }

    #[test]
    fn failure_never_carries_authorization() {
        let error = ErrorResponse {
            code: Some("430330".to_string()),
            connector_transaction_id: Some("42".to_string()),
            ..ErrorResponse::transport_failure("Not authorised", 402)
        };
        let response = with_response(flow_data(Some(r#"{"errors":[]}"#), false), Err(error));

        assert!(!response.is_success());
        assert_eq!(response.message, "Not authorised");
        assert_eq!(response.error_code.as_deref(), Some("430330"));
        assert!(response.authorization.is_none());
        assert!(!response.test);
    }

    #[test]
    fn missing_or_non_json_body_gives_empty_params() {
        let error = ErrorResponse::transport_failure("connection refused", 0);
        let response = with_response(flow_data(None, false), Err(error.clone()));
        assert_eq!(response.params, json!({}));
        assert!(response.error_code.is_none());

        let response = with_response(flow_data(Some("<html></html>"), false), Err(error));
        assert_eq!(response.params, json!({}));
    }

    #[test]
    fn refund_authorization_is_the_refund_id() {
        let router_data: RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData> =
            RouterDataV2 {
                flow: std::marker::PhantomData,
                resource_common_data: RefundFlowData::new(
                    Connectors::default(),
                    PaymentOptions::default(),
                    false,
                ),
                connector_auth_type: ConnectorAuthType::NoKey,
                request: RefundsData {
                    refund_id: "refund-1".to_string(),
                    connector_transaction_id: "42".to_string(),
                    minor_refund_amount: common_utils::MinorUnit::new(100),
                    currency: common_enums::Currency::USD,
                    reason: None,
                },
                response: Ok(RefundsResponseData {
                    connector_refund_id: Some("42-300001".to_string()),
                    refund_status: RefundStatus::Pending,
                    message: "Succeeded".to_string(),
                    status_code: 201,
                }),
            };

        let response = GatewayResponse::foreign_from(&router_data);
        assert!(response.is_success());
        assert_eq!(response.authorization.as_deref(), Some("42-300001"));
    }
}
