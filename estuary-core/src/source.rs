use crate::error::FetchError;
use crate::region::RegionId;

#[cfg(feature = "api")]
use log::debug;
#[cfg(feature = "api")]
use reqwest::Client;

/// Path segment the backend serves point data under.
pub const ENDPOINT_PATH: &str = "estuary-data";

/// `{api_base}/estuary-data/{region}`. An empty base gives a same-origin
/// path, which is what the browser app uses.
pub fn endpoint_url(api_base: &str, region: &RegionId) -> String {
    format!(
        "{}/{}/{}",
        api_base.trim_end_matches('/'),
        ENDPOINT_PATH,
        region.as_str()
    )
}

/// Where point data comes from.
///
/// Implementations only move bytes: they report transport failures as
/// [`FetchError::Network`] and non-2xx answers as [`FetchError::Http`].
/// Parsing is left to the handler.
#[allow(async_fn_in_trait)]
pub trait PointSource {
    async fn fetch_body(&self, region: &RegionId) -> Result<String, FetchError>;
}

/// Native HTTP source backed by reqwest.
#[cfg(feature = "api")]
#[derive(Debug, Clone)]
pub struct HttpPointSource {
    client: Client,
    api_base: String,
}

#[cfg(feature = "api")]
impl HttpPointSource {
    pub fn new(client: Client, api_base: &str) -> Self {
        Self {
            client,
            api_base: api_base.to_string(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

#[cfg(feature = "api")]
impl PointSource for HttpPointSource {
    async fn fetch_body(&self, region: &RegionId) -> Result<String, FetchError> {
        let url = endpoint_url(&self.api_base, region);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                region: region.to_string(),
            });
        }
        Ok(response.text().await?)
    }
}
