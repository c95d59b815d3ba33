use std::marker::PhantomData;

use crate::router_data::{ConnectorAuthType, ErrorResponse};

/// Placeholder outcome until the connector reply has been interpreted.
pub const NO_RESPONSE_YET: &str = "No response received from the gateway";

#[derive(Debug, Clone)]
pub struct RouterDataV2<Flow, ResourceCommonData, FlowSpecificRequest, FlowSpecificResponse> {
    pub flow: PhantomData<Flow>,
    pub resource_common_data: ResourceCommonData,
    pub connector_auth_type: ConnectorAuthType,
    /// Contains flow-specific data required to construct a request and send it to the connector.
    pub request: FlowSpecificRequest,
    /// Contains flow-specific data that the connector responds with.
    pub response: Result<FlowSpecificResponse, ErrorResponse>,
}

impl<Flow, ResourceCommonData, FlowSpecificRequest, FlowSpecificResponse>
    RouterDataV2<Flow, ResourceCommonData, FlowSpecificRequest, FlowSpecificResponse>
{
    pub fn new(
        resource_common_data: ResourceCommonData,
        connector_auth_type: ConnectorAuthType,
        request: FlowSpecificRequest,
    ) -> Self {
        Self {
            flow: PhantomData,
            resource_common_data,
            connector_auth_type,
            request,
            response: Err(ErrorResponse::transport_failure(NO_RESPONSE_YET, 0)),
        }
    }
}
