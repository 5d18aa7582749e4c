use crate::domain::ports::HttpGet;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// 組出 `base?k1=v1&k2=v2`，參數依 key 排序並做 percent-encoding
pub fn build_url(base: &str, params: &HashMap<String, String>) -> Result<Url> {
    let mut url = Url::parse(base)?;
    if !params.is_empty() {
        let mut sorted: Vec<(&String, &String)> = params.iter().collect();
        sorted.sort();
        let mut query = url.query_pairs_mut();
        for (key, value) in sorted {
            query.append_pair(key, value);
        }
    }
    Ok(url)
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new(timeout_seconds: u64) -> Self {
        Self {
            client: Client::new(),
            timeout: Duration::from_secs(timeout_seconds),
        }
    }
}

#[async_trait]
impl HttpGet for ReqwestTransport {
    async fn get(&self, url: &str, params: &HashMap<String, String>) -> Result<String> {
        let url = build_url(url, params)?;

        tracing::debug!("Making API request to: {}", url);
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?;

        tracing::debug!("API response status: {}", response.status());
        let body = response.error_for_status()?.text().await?;
        tracing::debug!("Received {} bytes", body.len());

        Ok(body)
    }
}
