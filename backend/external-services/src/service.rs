use std::{str::FromStr, time::Duration};

use common_utils::{
    ext_traits::AsyncExt,
    request::{Headers, Method, Request, RequestContent},
};
use domain_types::{
    connector_types::RawConnectorRequestResponse,
    errors::{ApiClientError, ConnectorError},
    router_data::ErrorResponse,
    router_data_v2::RouterDataV2,
    router_response_types::Response,
    types::Proxy,
};
use error_stack::{report, ResultExt};
use hyperswitch_masking::{ExposeInterface, Maskable, Secret};
use interfaces::connector_integration_v2::BoxedConnectorIntegrationV2;
use once_cell::sync::OnceCell;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::field::Empty;

pub type CustomResult<T, E> = error_stack::Result<T, E>;

/// Performs the HTTP exchange for a built connector request.
///
/// `Ok(Ok(_))` is a 2xx/3xx reply, `Ok(Err(_))` a 4xx/5xx reply, and the outer
/// `Err` a failure to obtain any reply at all.
#[async_trait::async_trait]
pub trait ConnectorTransport: Send + Sync {
    async fn send(
        &self,
        request: Request,
    ) -> CustomResult<Result<Response, Response>, ApiClientError>;
}

/// [`ConnectorTransport`] backed by a pooled `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    proxy: Proxy,
}

impl ReqwestTransport {
    pub fn new(proxy: Proxy) -> Self {
        Self { proxy }
    }
}

#[async_trait::async_trait]
impl ConnectorTransport for ReqwestTransport {
    async fn send(
        &self,
        request: Request,
    ) -> CustomResult<Result<Response, Response>, ApiClientError> {
        call_connector_api(&self.proxy, request).await
    }
}

#[tracing::instrument(
    name = "execute_connector_processing_step",
    skip_all,
    fields(
        connector = %connector_name,
        request.headers = Empty,
        request.body = Empty,
        request.url = Empty,
        request.method = Empty,
        response.body = Empty,
        response.headers = Empty,
        response.error_message = Empty,
        status_code = Empty,
        message_ = "Golden Log Line (outgoing)",
        latency = Empty,
    )
)]
pub async fn execute_connector_processing_step<F, ResourceCommonData, Req, Resp>(
    transport: &dyn ConnectorTransport,
    connector: BoxedConnectorIntegrationV2<'static, F, ResourceCommonData, Req, Resp>,
    router_data: RouterDataV2<F, ResourceCommonData, Req, Resp>,
    connector_name: &str,
) -> CustomResult<RouterDataV2<F, ResourceCommonData, Req, Resp>, ConnectorError>
where
    F: Clone + 'static,
    Req: Clone + 'static + std::fmt::Debug,
    Resp: Clone + 'static + std::fmt::Debug,
    ResourceCommonData: Clone + 'static + RawConnectorRequestResponse,
{
    let start = tokio::time::Instant::now();
    let Some(request) = connector.build_request_v2(&router_data)? else {
        return Ok(router_data);
    };

    let masked_headers = request
        .headers
        .iter()
        .fold(serde_json::Map::new(), |mut acc, (k, v)| {
            let value = match v {
                Maskable::Masked(_) => Value::String("*** alloc::string::String ***".to_string()),
                Maskable::Normal(iv) => Value::String(iv.to_owned()),
            };
            acc.insert(k.clone(), value);
            acc
        });
    tracing::Span::current().record(
        "request.headers",
        tracing::field::display(Value::Object(masked_headers)),
    );

    let masked_request = request
        .body
        .as_ref()
        .map(RequestContent::get_masked_value)
        .unwrap_or(Value::Null);
    tracing::info!(request = %masked_request, "request of connector");
    tracing::Span::current().record("request.body", tracing::field::display(&masked_request));
    tracing::Span::current().record("request.url", tracing::field::display(&request.url));
    tracing::Span::current().record("request.method", tracing::field::display(request.method));

    let mut router_data = router_data;
    router_data
        .resource_common_data
        .set_raw_connector_request(request.body.as_ref().map(RequestContent::get_inner_value));

    let response = transport.send(request).await;
    tracing::info!(?response, "response from connector");

    let result = match response {
        Ok(Ok(body)) => {
            tracing::Span::current().record("status_code", tracing::field::display(body.status_code));
            record_response(&body);
            router_data
                .resource_common_data
                .set_raw_connector_response(strip_bom_and_convert_to_string(&body.response).map(Secret::new));

            match connector.handle_response_v2(&router_data, body.clone()) {
                Ok(data) => {
                    tracing::info!("Transformer completed successfully");
                    Ok(data)
                }
                Err(err) if is_unreadable_body(&err) => {
                    tracing::warn!(error = ?err, "connector response could not be read");
                    router_data.response = Err(unreadable_body_error(&body));
                    Ok(router_data)
                }
                Err(err) => Err(err),
            }
        }
        Ok(Err(body)) => {
            tracing::Span::current().record("status_code", tracing::field::display(body.status_code));
            record_response(&body);
            router_data
                .resource_common_data
                .set_raw_connector_response(strip_bom_and_convert_to_string(&body.response).map(Secret::new));

            let error = match body.status_code {
                500..=511 => connector.get_5xx_error_response(body.clone()),
                _ => connector.get_error_response_v2(body.clone()),
            };
            let error = match error {
                Ok(error) => error,
                Err(err) if is_unreadable_body(&err) => unreadable_body_error(&body),
                Err(err) => return Err(err),
            };
            tracing::Span::current().record(
                "response.error_message",
                tracing::field::display(&error.message),
            );
            router_data.response = Err(error);
            Ok(router_data)
        }
        Err(err) => {
            info_log(
                "NETWORK_ERROR",
                &json!(format!(
                    "Failed getting response from connector. Error: {:?}",
                    err
                )),
            );
            let error = ErrorResponse::transport_failure(err.current_context().to_string(), 0);
            tracing::Span::current().record(
                "response.error_message",
                tracing::field::display(&error.message),
            );
            router_data.response = Err(error);
            Ok(router_data)
        }
    };

    tracing::Span::current().record("latency", start.elapsed().as_millis());
    tracing::info!(tag = ?Tag::OutgoingApi, log_type = "api", "Outgoing Request completed");
    result
}

fn record_response(body: &Response) {
    if let Ok(response) = parse_json_with_bom_handling(&body.response) {
        tracing::Span::current().record("response.body", tracing::field::display(response));
    }
    let headers = body.headers.clone().unwrap_or_default();
    let map = headers
        .iter()
        .fold(serde_json::Map::new(), |mut acc, (left, right)| {
            let header_value = if right.is_sensitive() {
                Value::String("*** alloc::string::String ***".to_string())
            } else if let Ok(x) = right.to_str() {
                Value::String(x.to_string())
            } else {
                return acc;
            };
            acc.insert(left.as_str().to_string(), header_value);
            acc
        });
    tracing::Span::current().record("response.headers", tracing::field::display(Value::Object(map)));
}

fn is_unreadable_body(err: &error_stack::Report<ConnectorError>) -> bool {
    matches!(
        err.current_context(),
        ConnectorError::ResponseDeserializationFailed
    )
}

/// Failure for a reply whose body is not the vendor's documented shape.
fn unreadable_body_error(body: &Response) -> ErrorResponse {
    ErrorResponse {
        reason: strip_bom_and_convert_to_string(&body.response),
        ..ErrorResponse::transport_failure(
            ConnectorError::ResponseDeserializationFailed.to_string(),
            body.status_code,
        )
    }
}

pub async fn call_connector_api(
    proxy: &Proxy,
    request: Request,
) -> CustomResult<Result<Response, Response>, ApiClientError> {
    let url =
        reqwest::Url::parse(&request.url).change_context(ApiClientError::UrlEncodingFailed)?;

    let should_bypass_proxy = proxy.should_bypass(url.as_str());
    let client = get_base_client(proxy, should_bypass_proxy)?;

    let headers = request.headers.construct_header_map()?;
    let body = request
        .body
        .as_ref()
        .map(|body| body.get_inner_value().expose());

    let request = {
        let builder = match request.method {
            Method::Get => client.get(url),
            Method::Post => client.post(url),
            Method::Put => client.put(url),
            Method::Delete => client.delete(url),
            Method::Patch => client.patch(url),
        };
        match body {
            Some(body) => builder.body(body),
            None => builder,
        }
        .add_headers(headers)
    };

    let send_request = async {
        request.send().await.map_err(|error| {
            let api_error = match error {
                error if error.is_timeout() => ApiClientError::RequestTimeoutReceived,
                _ => ApiClientError::RequestNotSent(error.to_string()),
            };
            info_log(
                "REQUEST_FAILURE",
                &json!(format!("Unable to send request to connector.",)),
            );
            report!(api_error)
        })
    };

    let response = send_request.await;

    handle_response(response).await
}

static NON_PROXIED_CLIENT: OnceCell<Client> = OnceCell::new();
static PROXIED_CLIENT: OnceCell<Client> = OnceCell::new();

fn get_base_client(
    proxy_config: &Proxy,
    should_bypass_proxy: bool,
) -> CustomResult<Client, ApiClientError> {
    Ok(match proxy_config.cache_key(should_bypass_proxy) {
        None => &NON_PROXIED_CLIENT,
        Some(_) => &PROXIED_CLIENT,
    }
    .get_or_try_init(|| {
        get_client_builder(proxy_config, should_bypass_proxy)?
            .build()
            .change_context(ApiClientError::ClientConstructionFailed)
            .inspect_err(|err| {
                info_log(
                    "ERROR",
                    &json!(format!("Failed to construct base client. Error: {:?}", err)),
                );
            })
    })?
    .clone())
}

fn get_client_builder(
    proxy_config: &Proxy,
    should_bypass_proxy: bool,
) -> CustomResult<reqwest::ClientBuilder, ApiClientError> {
    let mut client_builder = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_idle_timeout(Duration::from_secs(
            proxy_config
                .idle_pool_connection_timeout
                .unwrap_or_default(),
        ));

    if let Some(timeout) = proxy_config.request_timeout_secs {
        client_builder = client_builder.timeout(Duration::from_secs(timeout));
    }

    if should_bypass_proxy {
        return Ok(client_builder);
    }

    // Proxy all HTTPS traffic through the configured HTTPS proxy
    if let Some(url) = proxy_config.https_url.as_ref() {
        client_builder = client_builder.proxy(
            reqwest::Proxy::https(url)
                .change_context(ApiClientError::InvalidProxyConfiguration)
                .inspect_err(|err| {
                    info_log(
                        "PROXY_ERROR",
                        &json!(format!("HTTPS proxy configuration error. Error: {:?}", err)),
                    );
                })?,
        );
    }

    // Proxy all HTTP traffic through the configured HTTP proxy
    if let Some(url) = proxy_config.http_url.as_ref() {
        client_builder = client_builder.proxy(
            reqwest::Proxy::http(url)
                .change_context(ApiClientError::InvalidProxyConfiguration)
                .inspect_err(|err| {
                    info_log(
                        "PROXY_ERROR",
                        &json!(format!("HTTP proxy configuration error. Error: {:?}", err)),
                    );
                })?,
        );
    }

    Ok(client_builder)
}

async fn handle_response(
    response: CustomResult<reqwest::Response, ApiClientError>,
) -> CustomResult<Result<Response, Response>, ApiClientError> {
    response
        .async_map(|resp| async {
            let status_code = resp.status().as_u16();
            let headers = Some(resp.headers().to_owned());
            match status_code {
                200..=202 | 302 | 204 => {
                    let response = resp
                        .bytes()
                        .await
                        .change_context(ApiClientError::ResponseDecodingFailed)?;
                    Ok(Ok(Response {
                        headers,
                        response,
                        status_code,
                    }))
                }
                400..=599 => {
                    let bytes = resp.bytes().await.map_err(|error| {
                        report!(error).change_context(ApiClientError::ResponseDecodingFailed)
                    })?;

                    Ok(Err(Response {
                        headers,
                        response: bytes,
                        status_code,
                    }))
                }
                _ => {
                    info_log(
                        "UNEXPECTED_RESPONSE",
                        &json!("Unexpected response from server."),
                    );
                    Err(report!(ApiClientError::UnexpectedServerResponse))
                }
            }
        })
        .await?
}

/// Body as text with a leading UTF-8 byte order mark removed.
fn strip_bom_and_convert_to_string(response_bytes: &[u8]) -> Option<String> {
    String::from_utf8(response_bytes.to_vec())
        .ok()
        .map(|s| s.trim_start_matches('\u{FEFF}').to_string())
}

fn parse_json_with_bom_handling(response_bytes: &[u8]) -> Result<Value, serde_json::Error> {
    let cleaned_response = response_bytes
        .strip_prefix(&[0xEF, 0xBB, 0xBF])
        .unwrap_or(response_bytes);
    serde_json::from_slice::<Value>(cleaned_response)
}

pub(super) trait HeaderExt {
    fn construct_header_map(self) -> CustomResult<reqwest::header::HeaderMap, ApiClientError>;
}

impl HeaderExt for Headers {
    fn construct_header_map(self) -> CustomResult<reqwest::header::HeaderMap, ApiClientError> {
        use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

        self.into_iter().try_fold(
            HeaderMap::new(),
            |mut header_map, (header_name, header_value)| {
                let header_name = HeaderName::from_str(&header_name)
                    .change_context(ApiClientError::HeaderMapConstructionFailed)?;
                let header_value = header_value.into_inner();
                let header_value = HeaderValue::from_str(&header_value)
                    .change_context(ApiClientError::HeaderMapConstructionFailed)?;
                header_map.append(header_name, header_value);
                Ok(header_map)
            },
        )
    }
}

pub(super) trait RequestBuilderExt {
    fn add_headers(self, headers: reqwest::header::HeaderMap) -> Self;
}

impl RequestBuilderExt for reqwest::RequestBuilder {
    fn add_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self = self.headers(headers);
        self
    }
}

#[derive(Debug, Default, serde::Deserialize, Clone, strum::EnumString)]
pub enum Tag {
    /// General.
    #[default]
    General,
    /// Api Outgoing Request
    OutgoingApi,
}

#[inline]
pub fn info_log(action: &str, message: &Value) {
    tracing::info!(tags = %action, json_value= %message);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use hyperswitch_masking::Mask;

    use super::*;

    #[test]
    fn header_map_keeps_masked_values_on_the_wire() {
        let headers: Headers = [
            ("Content-Type".to_string(), "application/json".into()),
            (
                "Authorization".to_string(),
                "GCS v1HMAC:key:signature".to_string().into_masked(),
            ),
        ]
        .into_iter()
        .collect();

        let map = headers.construct_header_map().unwrap();
        assert_eq!(map["Authorization"], "GCS v1HMAC:key:signature");
        assert_eq!(map["Content-Type"], "application/json");
    }

    #[test]
    fn invalid_header_names_are_rejected() {
        let headers: Headers = [("bad header".to_string(), "value".into())]
            .into_iter()
            .collect();
        assert!(headers.construct_header_map().is_err());
    }

    #[test]
    fn byte_order_mark_is_stripped() {
        let body = b"\xEF\xBB\xBF{\"ResultCode\":\"Success\"}";
        assert_eq!(
            strip_bom_and_convert_to_string(body).as_deref(),
            Some("{\"ResultCode\":\"Success\"}")
        );
        assert_eq!(
            parse_json_with_bom_handling(body).unwrap(),
            json!({"ResultCode": "Success"})
        );
    }

    #[test]
    fn unreadable_bodies_become_code_less_failures() {
        let body = Response {
            headers: None,
            response: bytes::Bytes::from_static(b"<html>Bad Gateway</html>"),
            status_code: 200,
        };
        let error = unreadable_body_error(&body);
        assert_eq!(error.code, None);
        assert_eq!(error.message, "Failed to deserialize connector response");
        assert_eq!(error.reason.as_deref(), Some("<html>Bad Gateway</html>"));
    }
}
