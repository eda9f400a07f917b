//! `fetch()`-backed point source for the browser.

use estuary_core::error::FetchError;
use estuary_core::region::RegionId;
use estuary_core::source::{endpoint_url, PointSource};
use log::debug;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

fn js_error(value: JsValue) -> FetchError {
    FetchError::Network(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}

/// Reads `{api_base}/estuary-data/{region}` with the browser's `fetch()`.
#[derive(Debug, Clone)]
pub struct BrowserPointSource {
    api_base: String,
}

impl BrowserPointSource {
    pub fn new(api_base: &str) -> Self {
        Self {
            api_base: api_base.to_string(),
        }
    }
}

impl PointSource for BrowserPointSource {
    async fn fetch_body(&self, region: &RegionId) -> Result<String, FetchError> {
        let url = endpoint_url(&self.api_base, region);
        debug!("fetch {}", url);

        let window =
            web_sys::window().ok_or_else(|| FetchError::Network("no window".to_string()))?;
        let response: Response = JsFuture::from(window.fetch_with_str(&url))
            .await
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| FetchError::Network("fetch did not return a Response".to_string()))?;

        if !response.ok() {
            return Err(FetchError::Http {
                status: response.status(),
                region: region.to_string(),
            });
        }

        let body = JsFuture::from(response.text().map_err(js_error)?)
            .await
            .map_err(js_error)?;
        body.as_string()
            .ok_or_else(|| FetchError::Parse("response body is not text".to_string()))
    }
}
