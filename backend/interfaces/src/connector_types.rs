use domain_types::{
    connector_flow,
    connector_types::{
        PaymentFlowData, PaymentVoidData, PaymentsAuthorizeData, PaymentsCaptureData,
        PaymentsResponseData, RefundFlowData, RefundsData, RefundsResponseData,
    },
    router_request_types::PaymentOptions,
};

use crate::{
    api::ConnectorCommon, connector_integration_v2::ConnectorIntegrationV2,
    scrubbing::ConnectorScrubbing,
};

pub trait ConnectorServiceTrait:
    ConnectorCommon
    + ValidationTrait
    + ConnectorScrubbing
    + PaymentAuthorizeV2
    + PaymentCapture
    + PaymentVoidV2
    + RefundV2
{
}

pub type BoxedConnector = Box<&'static (dyn ConnectorServiceTrait + Sync)>;

/// How the composite verbs are assembled for a connector.
pub trait ValidationTrait {
    /// `purchase` issues a separate capture after a successful authorize.
    fn should_capture_after_authorize(&self, _options: &PaymentOptions) -> bool {
        false
    }

    /// `verify` reports the authorize outcome even when the follow-up void fails.
    fn ignore_void_result_on_verify(&self) -> bool {
        false
    }
}

pub trait PaymentAuthorizeV2:
    ConnectorIntegrationV2<
    connector_flow::Authorize,
    PaymentFlowData,
    PaymentsAuthorizeData,
    PaymentsResponseData,
>
{
}

pub trait PaymentCapture:
    ConnectorIntegrationV2<
    connector_flow::Capture,
    PaymentFlowData,
    PaymentsCaptureData,
    PaymentsResponseData,
>
{
}

pub trait PaymentVoidV2:
    ConnectorIntegrationV2<connector_flow::Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>
{
}

pub trait RefundV2:
    ConnectorIntegrationV2<connector_flow::Refund, RefundFlowData, RefundsData, RefundsResponseData>
{
}
