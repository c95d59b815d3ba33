pub mod transformers;


use common_utils::{
    errors::CustomResult,
    ext_traits::BytesExt,
    request::{Method, RequestContent},
    scrub::ScrubRule,
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
use hyperswitch_masking::{Mask, Maskable, PeekInterface, Secret};
use interfaces::{
    api::ConnectorCommon, connector_integration_v2::ConnectorIntegrationV2, connector_types,
    scrubbing::ConnectorScrubbing,
};
use once_cell::sync::Lazy;
use regex::Regex;
use transformers::{
    self as globalcollect, GlobalCollectAuthType, GlobalCollectCaptureRequest,
    GlobalCollectPaymentsRequest, GlobalCollectRefundRequest, GlobalCollectResponse,
    GlobalCollectVoidRequest,
};

use crate::{types::ResponseRouterData, utils};

pub(crate) mod headers {
    pub(crate) const CONTENT_TYPE: &str = "Content-Type";
    pub(crate) const AUTHORIZATION: &str = "Authorization";
    pub(crate) const DATE: &str = "Date";
}

#[derive(Clone)]
pub struct GlobalCollect;

impl GlobalCollect {
    pub const fn new() -> &'static Self {
        &Self
    }

    /// Signed headers for a request to `resource`, the path part of the url
    /// starting with `/`.
    pub fn build_headers_with_auth<F, FCD, Req, Res>(
        &self,
        req: &RouterDataV2<F, FCD, Req, Res>,
        http_method: &str,
        resource: &str,
        idempotency_key: Option<&str>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        let content_type = self.common_get_content_type();
        let date = GlobalCollectAuthType::generate_date_header()?;
        let auth = GlobalCollectAuthType::try_from(&req.connector_auth_type)?;

        let authorization = auth.generate_authorization_header(
            http_method,
            content_type,
            &date,
            idempotency_key,
            resource,
        );

        let mut headers = vec![
            (headers::CONTENT_TYPE.to_string(), content_type.into()),
            (headers::DATE.to_string(), date.into()),
            (headers::AUTHORIZATION.to_string(), authorization.into_masked()),
        ];
        if let Some(key) = idempotency_key {
            headers.push((
                globalcollect::IDEMPOTENCE_KEY_HEADER.to_string(),
                key.to_string().into(),
            ));
        }
        Ok(headers)
    }

    /// `v1/{merchant_id}/payments{suffix}`
    fn payments_path(
        &self,
        auth_type: &ConnectorAuthType,
        suffix: &str,
    ) -> CustomResult<String, errors::ConnectorError> {
        let auth = GlobalCollectAuthType::try_from(auth_type)?;
        Ok(format!("v1/{}/payments{}", auth.merchant_id.peek(), suffix))
    }

    /// The part of `url` that takes part in the signature.
    fn signed_resource(&self, url: &str, connectors: &Connectors) -> String {
        let base_url = self.base_url(connectors).trim_end_matches('/');
        url.strip_prefix(base_url).unwrap_or(url).to_string()
    }
}

// ===== CONNECTOR SERVICE TRAIT IMPLEMENTATIONS =====
impl connector_types::ConnectorServiceTrait for GlobalCollect {}

impl connector_types::PaymentAuthorizeV2 for GlobalCollect {}

impl connector_types::PaymentCapture for GlobalCollect {}

impl connector_types::PaymentVoidV2 for GlobalCollect {}

impl connector_types::RefundV2 for GlobalCollect {}

impl connector_types::ValidationTrait for GlobalCollect {
    /// With `requires_approval: false` the authorize itself requests capture.
    fn should_capture_after_authorize(&self, options: &PaymentOptions) -> bool {
        options.requires_approval != Some(false)
    }
}

// ============================================================================
// CONNECTOR COMMON IMPLEMENTATION
// ============================================================================

impl ConnectorCommon for GlobalCollect {
    fn id(&self) -> &'static str {
        "globalcollect"
    }

    fn common_get_content_type(&self) -> &'static str {
        "application/json"
    }

    fn base_url<'a>(&self, connectors: &'a Connectors) -> &'a str {
        connectors.globalcollect.base_url.as_ref()
    }

    fn is_test_mode(&self, connectors: &Connectors) -> bool {
        connectors.globalcollect.test_mode
            || connectors.globalcollect.base_url.trim_end_matches('/')
                == globalcollect::SANDBOX_BASE_URL.trim_end_matches('/')
    }

    fn build_error_response(
        &self,
        res: Response,
    ) -> CustomResult<ErrorResponse, errors::ConnectorError> {
        let response: GlobalCollectResponse =
            match res.response.parse_struct("GlobalCollectResponse") {
                Ok(response) => response,
                Err(_) => return Ok(utils::unreadable_error_response(&res)),
            };

        tracing::info!(connector_response = ?response);

        Ok(response.to_error_response(res.status_code, None))
    }
}

// ============================================================================
// FLOW IMPLEMENTATIONS
// ============================================================================

impl ConnectorIntegrationV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
    for GlobalCollect
{
    fn get_headers(
        &self,
        req: &RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        let url = self.get_url(req)?;
        let resource = self.signed_resource(&url, &req.resource_common_data.connectors);
        self.build_headers_with_auth(
            req,
            &Method::Post.to_string(),
            &resource,
            req.resource_common_data.options.idempotency_key.as_deref(),
        )
    }

    fn get_url(
        &self,
        req: &RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
    ) -> CustomResult<String, errors::ConnectorError> {
        let path = self.payments_path(&req.connector_auth_type, "")?;
        Ok(utils::build_url(
            self.base_url(&req.resource_common_data.connectors),
            &path,
        ))
    }

    fn get_request_body(
        &self,
        req: &RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        let connector_req = GlobalCollectPaymentsRequest::try_from(req)?;
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
        let response: GlobalCollectResponse = res
            .response
            .parse_struct("GlobalCollectResponse")
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
    for GlobalCollect
{
    fn get_headers(
        &self,
        req: &RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        let url = self.get_url(req)?;
        let resource = self.signed_resource(&url, &req.resource_common_data.connectors);
        self.build_headers_with_auth(
            req,
            &Method::Post.to_string(),
            &resource,
            req.resource_common_data.options.idempotency_key.as_deref(),
        )
    }

    fn get_url(
        &self,
        req: &RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
    ) -> CustomResult<String, errors::ConnectorError> {
        let payment_id = req
            .request
            .get_connector_transaction_id()
            .attach_printable("Missing connector transaction ID for Capture")?;
        let path =
            self.payments_path(&req.connector_auth_type, &format!("/{payment_id}/approve"))?;
        Ok(utils::build_url(
            self.base_url(&req.resource_common_data.connectors),
            &path,
        ))
    }

    fn get_request_body(
        &self,
        req: &RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        let connector_req = GlobalCollectCaptureRequest::try_from(req)?;
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
        let response: GlobalCollectResponse = res
            .response
            .parse_struct("GlobalCollectResponse")
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

impl ConnectorIntegrationV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>
    for GlobalCollect
{
    fn get_headers(
        &self,
        req: &RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        let url = self.get_url(req)?;
        let resource = self.signed_resource(&url, &req.resource_common_data.connectors);
        self.build_headers_with_auth(
            req,
            &Method::Post.to_string(),
            &resource,
            req.resource_common_data.options.idempotency_key.as_deref(),
        )
    }

    fn get_url(
        &self,
        req: &RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
    ) -> CustomResult<String, errors::ConnectorError> {
        let payment_id = &req.request.connector_transaction_id;
        let path =
            self.payments_path(&req.connector_auth_type, &format!("/{payment_id}/cancel"))?;
        Ok(utils::build_url(
            self.base_url(&req.resource_common_data.connectors),
            &path,
        ))
    }

    fn get_request_body(
        &self,
        req: &RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        let connector_req = GlobalCollectVoidRequest::try_from(req)?;
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
        let response: GlobalCollectResponse = res
            .response
            .parse_struct("GlobalCollectResponse")
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

impl ConnectorIntegrationV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>
    for GlobalCollect
{
    fn get_headers(
        &self,
        req: &RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        let url = self.get_url(req)?;
        let resource = self.signed_resource(&url, &req.resource_common_data.connectors);
        self.build_headers_with_auth(
            req,
            &Method::Post.to_string(),
            &resource,
            req.resource_common_data.options.idempotency_key.as_deref(),
        )
    }

    fn get_url(
        &self,
        req: &RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
    ) -> CustomResult<String, errors::ConnectorError> {
        let payment_id = &req.request.connector_transaction_id;
        let path =
            self.payments_path(&req.connector_auth_type, &format!("/{payment_id}/refund"))?;
        Ok(utils::build_url(
            self.base_url(&req.resource_common_data.connectors),
            &path,
        ))
    }

    fn get_request_body(
        &self,
        req: &RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
    ) -> CustomResult<Option<RequestContent>, errors::ConnectorError> {
        let connector_req = GlobalCollectRefundRequest::try_from(req)?;
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
        let response: GlobalCollectResponse = res
            .response
            .parse_struct("GlobalCollectResponse")
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

// ============================================================================
// TRANSCRIPT SCRUBBING
// ============================================================================

static SCRUB_RULES: Lazy<Vec<ScrubRule>> = Lazy::new(|| {
    [
        (r"(?i)(Authorization: )[^\r\n]*", "${1}[FILTERED]"),
        (r#"("cardNumber\\?"\s*:\s*\\?")[^"\\]*"#, "${1}[FILTERED]"),
        (r#"("cvv\\?"\s*:\s*\\?")[^"\\]*"#, "${1}[FILTERED]"),
        (r#"("expiryDate\\?"\s*:\s*\\?")[^"\\]*"#, "${1}[FILTERED]"),
    ]
    .into_iter()
    .filter_map(|(pattern, replacement)| {
        Regex::new(pattern)
            .ok()
            .map(|regex| ScrubRule::new(regex, replacement))
    })
    .collect()
});

impl ConnectorScrubbing for GlobalCollect {
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
        if let Ok(auth) = GlobalCollectAuthType::try_from(auth_type) {
            values.push(auth.secret_api_key);
            values.push(auth.api_key_id);
        }
        values
    }
}
