pub mod transformers;

mod test;

use common_utils::{
    errors::CustomResult,
    ext_traits::BytesExt,
    request::RequestContent,
    scrub::ScrubRule,
    types::{AmountConvertor, StringMajorUnit, StringMajorUnitForConnector},
};
use domain_types::{
    connector_flow::{Authorize, Capture, Refund, Void},
    connector_types::{
        PaymentFlowData, PaymentVoidData, PaymentsAuthorizeData, PaymentsCaptureData,
        PaymentsResponseData, RefundFlowData, RefundsData, RefundsResponseData,
    },
    errors,
    payment_method_data::Card,
    router_data::{ConnectorAuthType, ErrorResponse},
    router_data_v2::RouterDataV2,
    router_request_types::PaymentOptions,
    router_response_types::Response,
    types::Connectors,
};
use error_stack::ResultExt;
use hyperswitch_masking::{Maskable, Secret};
use interfaces::{
    api::ConnectorCommon, connector_integration_v2::ConnectorIntegrationV2, connector_types,
    scrubbing::ConnectorScrubbing,
};
use once_cell::sync::Lazy;
use regex::Regex;
use transformers::{
    self as moka, MokaAuthType, MokaCaptureRequest, MokaPaymentRequest, MokaRefundRequest,
    MokaRequest, MokaResponse, MokaRouterData, MokaVoidRequest,
};

use crate::{types::ResponseRouterData, utils};

pub(crate) mod headers {
    pub(crate) const CONTENT_TYPE: &str = "Content-Type";
}

const DIRECT_PAYMENT_PATH: &str = "PaymentDealer/DoDirectPayment";
const THREED_PAYMENT_PATH: &str = "PaymentDealer/DoDirectPaymentThreeD";
const CAPTURE_PATH: &str = "PaymentDealer/DoCapture";
const VOID_PATH: &str = "PaymentDealer/DoVoid";
const REFUND_PATH: &str = "PaymentDealer/DoCreateRefundRequest";

#[derive(Clone)]
pub struct Moka {
    amount_converter: &'static (dyn AmountConvertor<Output = StringMajorUnit> + Sync),
}

impl Moka {
    pub fn new() -> &'static Self {
        &Self {
            amount_converter: &StringMajorUnitForConnector,
        }
    }

    fn build_headers(&self) -> Vec<(String, Maskable<String>)> {
        vec![(
            headers::CONTENT_TYPE.to_string(),
            self.common_get_content_type().into(),
        )]
    }

    fn endpoint(&self, connectors: &Connectors, path: &str) -> String {
        utils::build_url(self.base_url(connectors), path)
    }
}

impl connector_types::ConnectorServiceTrait for Moka {}

impl connector_types::PaymentAuthorizeV2 for Moka {}

impl connector_types::PaymentCapture for Moka {}

impl connector_types::PaymentVoidV2 for Moka {}

impl connector_types::RefundV2 for Moka {}

impl connector_types::ValidationTrait for Moka {
    /// A purchase is a single non pre-auth payment.
    fn should_capture_after_authorize(&self, _options: &PaymentOptions) -> bool {
        false
    }

    fn ignore_void_result_on_verify(&self) -> bool {
        true
    }
}

impl ConnectorCommon for Moka {
    fn id(&self) -> &'static str {
        "moka"
    }

    fn common_get_content_type(&self) -> &'static str {
        "application/json"
    }

    fn base_url<'a>(&self, connectors: &'a Connectors) -> &'a str {
        connectors.moka.base_url.as_ref()
    }

    fn is_test_mode(&self, connectors: &Connectors) -> bool {
        connectors.moka.test_mode
            || connectors.moka.base_url.trim_end_matches('/')
                == moka::TEST_BASE_URL.trim_end_matches('/')
    }

    fn build_error_response(
        &self,
        res: Response,
    ) -> CustomResult<ErrorResponse, errors::ConnectorError> {
        let response: MokaResponse = match res.response.parse_struct("MokaResponse") {
            Ok(response) => response,
            Err(_) => return Ok(utils::unreadable_error_response(&res)),
        };

        tracing::info!(connector_response = ?response);

        Ok(response.to_error_response(res.status_code, None))
    }
}

impl ConnectorIntegrationV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
    for Moka
{
    fn get_headers(
        &self,
        _req: &RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        Ok(self.build_headers())
    }

    fn get_url(
        &self,
        req: &RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
    ) -> CustomResult<String, errors::ConnectorError> {
        let path = if req.resource_common_data.options.execute_threed.is_some() {
            THREED_PAYMENT_PATH
        } else {
            DIRECT_PAYMENT_PATH
        };
        Ok(self.endpoint(&req.resource_common_data.connectors, path))
    }

    fn get_request_body(
        &self,
        req: &RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        let amount = utils::convert_amount(
            self.amount_converter,
            req.request.minor_amount,
            req.request.currency,
        )?;
        let connector_router_data = MokaRouterData::try_from((amount, req))?;
        let connector_req = MokaRequest::<MokaPaymentRequest>::try_from(connector_router_data)?;
        Ok(Some(RequestContent::Json(Box::new(connector_req))))
    }

    fn handle_response_v2(
        &self,
        data: &RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        res: Response,
    ) -> CustomResult<
        RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        errors::ConnectorError,
    > {
        let response: MokaResponse = res
            .response
            .parse_struct("MokaResponse")
            .change_context(errors::ConnectorError::ResponseDeserializationFailed)?;
        RouterDataV2::try_from(ResponseRouterData {
            response,
            router_data: data.clone(),
            http_code: res.status_code,
        })
        .change_context(errors::ConnectorError::ResponseHandlingFailed)
    }

    fn get_error_response_v2(
        &self,
        res: Response,
    ) -> CustomResult<ErrorResponse, errors::ConnectorError> {
        self.build_error_response(res)
    }

    fn get_5xx_error_response(
        &self,
        res: Response,
    ) -> CustomResult<ErrorResponse, errors::ConnectorError> {
        self.build_error_response(res)
    }
}

impl ConnectorIntegrationV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>
    for Moka
{
    fn get_headers(
        &self,
        _req: &RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        Ok(self.build_headers())
    }

    fn get_url(
        &self,
        req: &RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
    ) -> CustomResult<String, errors::ConnectorError> {
        Ok(self.endpoint(&req.resource_common_data.connectors, CAPTURE_PATH))
    }

    fn get_request_body(
        &self,
        req: &RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        let amount = utils::convert_amount(
            self.amount_converter,
            req.request.minor_amount_to_capture,
            req.request.currency,
        )?;
        let connector_router_data = MokaRouterData::try_from((amount, req))?;
        let connector_req = MokaRequest::<MokaCaptureRequest>::try_from(connector_router_data)?;
        Ok(Some(RequestContent::Json(Box::new(connector_req))))
    }

    fn handle_response_v2(
        &self,
        data: &RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        res: Response,
    ) -> CustomResult<
        RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        errors::ConnectorError,
    > {
        let response: MokaResponse = res
            .response
            .parse_struct("MokaResponse")
            .change_context(errors::ConnectorError::ResponseDeserializationFailed)?;
        RouterDataV2::try_from(ResponseRouterData {
            response,
            router_data: data.clone(),
            http_code: res.status_code,
        })
        .change_context(errors::ConnectorError::ResponseHandlingFailed)
    }

    fn get_error_response_v2(
        &self,
        res: Response,
    ) -> CustomResult<ErrorResponse, errors::ConnectorError> {
        self.build_error_response(res)
    }

    fn get_5xx_error_response(
        &self,
        res: Response,
    ) -> CustomResult<ErrorResponse, errors::ConnectorError> {
        self.build_error_response(res)
    }
}

impl ConnectorIntegrationV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData> for Moka {
    fn get_headers(
        &self,
        _req: &RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        Ok(self.build_headers())
    }

    fn get_url(
        &self,
        req: &RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
    ) -> CustomResult<String, errors::ConnectorError> {
        Ok(self.endpoint(&req.resource_common_data.connectors, VOID_PATH))
    }

    fn get_request_body(
        &self,
        req: &RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        let connector_req = MokaRequest::<MokaVoidRequest>::try_from(req)?;
        Ok(Some(RequestContent::Json(Box::new(connector_req))))
    }

    fn handle_response_v2(
        &self,
        data: &RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        res: Response,
    ) -> CustomResult<
        RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
        errors::ConnectorError,
    > {
        let response: MokaResponse = res
            .response
            .parse_struct("MokaResponse")
            .change_context(errors::ConnectorError::ResponseDeserializationFailed)?;
        RouterDataV2::try_from(ResponseRouterData {
            response,
            router_data: data.clone(),
            http_code: res.status_code,
        })
        .change_context(errors::ConnectorError::ResponseHandlingFailed)
    }

    fn get_error_response_v2(
        &self,
        res: Response,
    ) -> CustomResult<ErrorResponse, errors::ConnectorError> {
        self.build_error_response(res)
    }

    fn get_5xx_error_response(
        &self,
        res: Response,
    ) -> CustomResult<ErrorResponse, errors::ConnectorError> {
        self.build_error_response(res)
    }
}

impl ConnectorIntegrationV2<Refund, RefundFlowData, RefundsData, RefundsResponseData> for Moka {
    fn get_headers(
        &self,
        _req: &RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        Ok(self.build_headers())
    }

    fn get_url(
        &self,
        req: &RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
    ) -> CustomResult<String, errors::ConnectorError> {
        Ok(self.endpoint(&req.resource_common_data.connectors, REFUND_PATH))
    }

    fn get_request_body(
        &self,
        req: &RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        let amount = utils::convert_amount(
            self.amount_converter,
            req.request.minor_refund_amount,
            req.request.currency,
        )?;
        let connector_router_data = MokaRouterData::try_from((amount, req))?;
        let connector_req = MokaRequest::<MokaRefundRequest>::try_from(connector_router_data)?;
        Ok(Some(RequestContent::Json(Box::new(connector_req))))
    }

    fn handle_response_v2(
        &self,
        data: &RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        res: Response,
    ) -> CustomResult<
        RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        errors::ConnectorError,
    > {
        let response: MokaResponse = res
            .response
            .parse_struct("MokaResponse")
            .change_context(errors::ConnectorError::ResponseDeserializationFailed)?;
        RouterDataV2::try_from(ResponseRouterData {
            response,
            router_data: data.clone(),
            http_code: res.status_code,
        })
        .change_context(errors::ConnectorError::ResponseHandlingFailed)
    }

    fn get_error_response_v2(
        &self,
        res: Response,
    ) -> CustomResult<ErrorResponse, errors::ConnectorError> {
        self.build_error_response(res)
    }

    fn get_5xx_error_response(
        &self,
        res: Response,
    ) -> CustomResult<ErrorResponse, errors::ConnectorError> {
        self.build_error_response(res)
    }
}

static SCRUB_RULES: Lazy<Vec<ScrubRule>> = Lazy::new(|| {
    [
        "CardNumber",
        "CvcNumber",
        "DealerCode",
        "Username",
        "Password",
        "CheckKey",
    ]
    .into_iter()
    .filter_map(|field| {
        Regex::new(&format!(r#"(?i)("{field}\\?"\s*:\s*\\?")[^"\\]*"#))
            .ok()
            .map(|regex| ScrubRule::new(regex, "${1}[FILTERED]"))
    })
    .collect()
});

impl ConnectorScrubbing for Moka {
    fn scrub_rules(&self) -> &'static [ScrubRule] {
        SCRUB_RULES.as_slice()
    }

    fn sensitive_values(
        &self,
        auth_type: &ConnectorAuthType,
        card: Option<&Card>,
    ) -> Vec<Secret<String>> {
        // the CVC is covered by the field rules
        let mut values: Vec<_> = card
            .map(|card| Secret::new(card.card_number.get_card_no()))
            .into_iter()
            .collect();
        if let Ok(auth) = MokaAuthType::try_from(auth_type) {
            values.push(auth.password);
        }
        values
    }
}
