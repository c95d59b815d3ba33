//! The six payment verbs over a single configured connector.
//!
//! Every verb builds the flow's router data, runs it through
//! [`execute_connector_processing_step`] and turns the outcome into a
//! [`GatewayResponse`]. Vendor declines and transport failures come back as
//! unsuccessful responses; only local problems (credentials of the wrong
//! shape, unparsable card data) are returned as errors.

use std::{str::FromStr, sync::Arc};

use common_enums::{CaptureMethod, Currency};
use common_utils::{CustomResult, MinorUnit};
use connector_integration::types::ConnectorData;
use domain_types::{
    connector_flow::{Authorize, Capture, Refund, Void},
    connector_types::{
        ConnectorEnum, PaymentFlowData, PaymentVoidData, PaymentsAuthorizeData,
        PaymentsCaptureData, PaymentsResponseData, RawConnectorRequestResponse, RefundFlowData,
        RefundsData, RefundsResponseData, ResponseId,
    },
    errors::ConnectorError,
    payment_method_data::Card,
    router_data::ConnectorAuthType,
    router_data_v2::RouterDataV2,
    router_request_types::PaymentOptions,
    router_response_types::GatewayResponse,
    types::Connectors,
    utils::generate_reference_id,
};
use error_stack::report;
use external_services::service::{
    execute_connector_processing_step, ConnectorTransport, ReqwestTransport,
};
use interfaces::{
    api::ConnectorCommon,
    connector_integration_v2::{BoxedConnectorIntegrationV2, ConnectorIntegrationAnyV2},
    connector_types::{ConnectorServiceTrait, ValidationTrait},
};

use crate::{configs::Config, transformers::ForeignFrom};

/// Amount authorized and then voided by [`Gateway::verify`].
pub const VERIFY_AMOUNT: i64 = 100;

type AuthorizeRouterData =
    RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>;
type CaptureRouterData =
    RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>;
type VoidRouterData = RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>;
type RefundRouterData = RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>;

#[derive(Clone)]
pub struct Gateway {
    connector_data: ConnectorData,
    auth_type: ConnectorAuthType,
    connectors: Connectors,
    transport: Arc<dyn ConnectorTransport>,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("connector", &self.connector_data.connector_name)
            .field("auth_type", &self.auth_type.get_masked_keys())
            .finish_non_exhaustive()
    }
}

impl Gateway {
    pub fn new(
        connector: ConnectorEnum,
        auth_type: ConnectorAuthType,
        connectors: Connectors,
        transport: Arc<dyn ConnectorTransport>,
    ) -> Self {
        Self {
            connector_data: ConnectorData::get_connector_by_name(&connector),
            auth_type,
            connectors,
            transport,
        }
    }

    /// Gateway talking HTTP through the proxy settings of `config`.
    pub fn from_config(
        config: &Config,
        connector: ConnectorEnum,
        auth_type: ConnectorAuthType,
    ) -> Self {
        Self::new(
            connector,
            auth_type,
            config.connectors.clone(),
            Arc::new(ReqwestTransport::new(config.proxy.clone())),
        )
    }

    /// Like [`Gateway::from_config`], resolving the connector by name.
    pub fn from_connector_name(
        config: &Config,
        connector_name: &str,
        auth_type: ConnectorAuthType,
    ) -> CustomResult<Self, ConnectorError> {
        let connector = ConnectorEnum::from_str(connector_name).map_err(|_| {
            report!(ConnectorError::InvalidConnectorName {
                name: connector_name.to_string(),
            })
        })?;
        Ok(Self::from_config(config, connector, auth_type))
    }

    pub fn connector_name(&self) -> ConnectorEnum {
        self.connector_data.connector_name
    }

    fn connector(&self) -> &'static (dyn ConnectorServiceTrait + Sync) {
        *self.connector_data.connector
    }

    fn is_test_mode(&self) -> bool {
        self.connector().is_test_mode(&self.connectors)
    }

    fn payment_flow_data(&self, options: PaymentOptions) -> PaymentFlowData {
        PaymentFlowData::new(self.connectors.clone(), options, self.is_test_mode())
    }

    /// Authorizes `amount` without capturing it.
    #[tracing::instrument(skip_all, fields(connector = %self.connector_name(), amount = %amount.get_amount_as_i64()))]
    pub async fn authorize(
        &self,
        amount: MinorUnit,
        currency: Currency,
        card: Card,
        options: PaymentOptions,
    ) -> CustomResult<GatewayResponse, ConnectorError> {
        let authorize = self
            .execute_authorize(amount, currency, card, options, CaptureMethod::Manual)
            .await?;
        Ok(GatewayResponse::foreign_from(&authorize))
    }

    /// Authorizes and captures `amount`.
    ///
    /// Connectors that cannot capture within the authorize request get a
    /// separate capture on the returned authorization, unless the authorize
    /// already reports the funds as captured. The last executed step decides
    /// the result.
    #[tracing::instrument(skip_all, fields(connector = %self.connector_name(), amount = %amount.get_amount_as_i64()))]
    pub async fn purchase(
        &self,
        amount: MinorUnit,
        currency: Currency,
        card: Card,
        options: PaymentOptions,
    ) -> CustomResult<GatewayResponse, ConnectorError> {
        let capture_after_authorize = self.connector().should_capture_after_authorize(&options);
        let authorize = self
            .execute_authorize(amount, currency, card, options.clone(), CaptureMethod::Automatic)
            .await?;

        let authorization = match &authorize.response {
            Ok(response)
                if capture_after_authorize
                    && !authorize.resource_common_data.status.is_captured() =>
            {
                response.resource_id.get_optional_id()
            }
            _ => None,
        };
        let Some(authorization) = authorization else {
            return Ok(GatewayResponse::foreign_from(&authorize));
        };

        tracing::info!(status = ?authorize.resource_common_data.status, "capturing authorized purchase");
        let capture = self
            .execute_capture(amount, currency, authorization, options)
            .await?;
        Ok(GatewayResponse::foreign_from(&capture))
    }

    /// Captures up to the authorized amount of a prior authorization.
    #[tracing::instrument(skip_all, fields(connector = %self.connector_name(), amount = %amount.get_amount_as_i64()))]
    pub async fn capture(
        &self,
        amount: MinorUnit,
        currency: Currency,
        authorization: &str,
        options: PaymentOptions,
    ) -> CustomResult<GatewayResponse, ConnectorError> {
        let capture = self
            .execute_capture(amount, currency, authorization.to_string(), options)
            .await?;
        Ok(GatewayResponse::foreign_from(&capture))
    }

    #[tracing::instrument(skip_all, fields(connector = %self.connector_name(), amount = %amount.get_amount_as_i64()))]
    pub async fn refund(
        &self,
        amount: MinorUnit,
        currency: Currency,
        authorization: &str,
        options: PaymentOptions,
    ) -> CustomResult<GatewayResponse, ConnectorError> {
        let router_data: RefundRouterData = RouterDataV2::new(
            RefundFlowData::new(self.connectors.clone(), options, self.is_test_mode()),
            self.auth_type.clone(),
            RefundsData {
                refund_id: generate_reference_id(),
                connector_transaction_id: authorization.to_string(),
                minor_refund_amount: amount,
                currency,
                reason: None,
            },
        );
        let connector_integration: BoxedConnectorIntegrationV2<
            'static,
            Refund,
            RefundFlowData,
            RefundsData,
            RefundsResponseData,
        > = self.connector().get_connector_integration_v2();

        let refund = self.execute(connector_integration, router_data).await?;
        Ok(GatewayResponse::foreign_from(&refund))
    }

    #[tracing::instrument(skip_all, fields(connector = %self.connector_name()))]
    pub async fn void(
        &self,
        authorization: &str,
        options: PaymentOptions,
    ) -> CustomResult<GatewayResponse, ConnectorError> {
        let void = self.execute_void(authorization.to_string(), options).await?;
        Ok(GatewayResponse::foreign_from(&void))
    }

    /// Checks a card by authorizing [`VERIFY_AMOUNT`] and voiding it again.
    ///
    /// The result reports the authorize step. A failed void turns it into the
    /// void's failure unless the connector ignores void outcomes here.
    #[tracing::instrument(skip_all, fields(connector = %self.connector_name()))]
    pub async fn verify(
        &self,
        currency: Currency,
        card: Card,
        options: PaymentOptions,
    ) -> CustomResult<GatewayResponse, ConnectorError> {
        let authorize = self
            .execute_authorize(
                MinorUnit::new(VERIFY_AMOUNT),
                currency,
                card,
                options.clone(),
                CaptureMethod::Manual,
            )
            .await?;

        let authorization = match &authorize.response {
            Ok(response) => response.resource_id.get_optional_id(),
            Err(_) => None,
        };
        let Some(authorization) = authorization else {
            return Ok(GatewayResponse::foreign_from(&authorize));
        };

        let void = self.execute_void(authorization, options).await?;
        if void.response.is_err() {
            if self.connector().ignore_void_result_on_verify() {
                tracing::warn!("void after verification failed, keeping the authorize result");
            } else {
                return Ok(GatewayResponse::foreign_from(&void));
            }
        }
        Ok(GatewayResponse::foreign_from(&authorize))
    }

    async fn execute_authorize(
        &self,
        amount: MinorUnit,
        currency: Currency,
        card: Card,
        options: PaymentOptions,
        capture_method: CaptureMethod,
    ) -> CustomResult<AuthorizeRouterData, ConnectorError> {
        let router_data: AuthorizeRouterData = RouterDataV2::new(
            self.payment_flow_data(options),
            self.auth_type.clone(),
            PaymentsAuthorizeData {
                card,
                minor_amount: amount,
                currency,
                capture_method: Some(capture_method),
            },
        );
        let connector_integration: BoxedConnectorIntegrationV2<
            'static,
            Authorize,
            PaymentFlowData,
            PaymentsAuthorizeData,
            PaymentsResponseData,
        > = self.connector().get_connector_integration_v2();

        self.execute(connector_integration, router_data).await
    }

    async fn execute_capture(
        &self,
        amount: MinorUnit,
        currency: Currency,
        authorization: String,
        options: PaymentOptions,
    ) -> CustomResult<CaptureRouterData, ConnectorError> {
        let router_data: CaptureRouterData = RouterDataV2::new(
            self.payment_flow_data(options),
            self.auth_type.clone(),
            PaymentsCaptureData {
                minor_amount_to_capture: amount,
                currency,
                connector_transaction_id: ResponseId::ConnectorTransactionId(authorization),
            },
        );
        let connector_integration: BoxedConnectorIntegrationV2<
            'static,
            Capture,
            PaymentFlowData,
            PaymentsCaptureData,
            PaymentsResponseData,
        > = self.connector().get_connector_integration_v2();

        self.execute(connector_integration, router_data).await
    }

    async fn execute_void(
        &self,
        authorization: String,
        options: PaymentOptions,
    ) -> CustomResult<VoidRouterData, ConnectorError> {
        let router_data: VoidRouterData = RouterDataV2::new(
            self.payment_flow_data(options),
            self.auth_type.clone(),
            PaymentVoidData {
                connector_transaction_id: authorization,
                cancellation_reason: None,
            },
        );
        let connector_integration: BoxedConnectorIntegrationV2<
            'static,
            Void,
            PaymentFlowData,
            PaymentVoidData,
            PaymentsResponseData,
        > = self.connector().get_connector_integration_v2();

        self.execute(connector_integration, router_data).await
    }

    async fn execute<F, ResourceCommonData, Req, Resp>(
        &self,
        connector_integration: BoxedConnectorIntegrationV2<
            'static,
            F,
            ResourceCommonData,
            Req,
            Resp,
        >,
        router_data: RouterDataV2<F, ResourceCommonData, Req, Resp>,
    ) -> CustomResult<RouterDataV2<F, ResourceCommonData, Req, Resp>, ConnectorError>
    where
        F: Clone + 'static,
        Req: Clone + 'static + std::fmt::Debug,
        Resp: Clone + 'static + std::fmt::Debug,
        ResourceCommonData: Clone + 'static + RawConnectorRequestResponse,
    {
        execute_connector_processing_step(
            self.transport.as_ref(),
            connector_integration,
            router_data,
            self.connector().id(),
        )
        .await
    }
}
