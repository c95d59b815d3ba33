use serde::{Deserialize, Serialize};

#[derive(Clone, Deserialize, Serialize, Debug, Default, PartialEq)]
pub struct Connectors {
    pub globalcollect: ConnectorParams,
    pub moka: ConnectorParams,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ConnectorParams {
    /// base url
    #[serde(default)]
    pub base_url: String,
    /// Forces responses to be tagged as test responses.
    #[serde(default)]
    pub test_mode: bool,
}

impl ConnectorParams {
    pub fn new(base_url: String, test_mode: bool) -> Self {
        Self {
            base_url,
            test_mode,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Hash, Default)]
#[serde(default)]
pub struct Proxy {
    pub http_url: Option<String>,
    pub https_url: Option<String>,
    pub idle_pool_connection_timeout: Option<u64>,
    pub bypass_proxy_urls: Vec<String>,
    pub request_timeout_secs: Option<u64>,
}

impl Proxy {
    /// Client cache slot for this configuration, `None` selects the unproxied client.
    pub fn cache_key(&self, should_bypass_proxy: bool) -> Option<Self> {
        if should_bypass_proxy || (self.http_url.is_none() && self.https_url.is_none()) {
            None
        } else {
            Some(self.clone())
        }
    }

    pub fn should_bypass(&self, url: &str) -> bool {
        self.bypass_proxy_urls
            .iter()
            .any(|bypass| url.starts_with(bypass.as_str()))
    }
}
