use crate::domain::model::{Module, ModuleItem};
use crate::domain::ports::{CanvasApi, ConfigProvider};
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, LINK};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("syllabus-etl/", env!("CARGO_PKG_VERSION"));

/// Canvas REST client. Every request is sent once with the configured
/// timeout; paginated listings follow `Link: <...>; rel="next"`.
#[derive(Debug, Clone)]
pub struct CanvasClient {
    client: Client,
    base_url: String,
    access_token: String,
    per_page: usize,
}

impl CanvasClient {
    pub fn new(
        base_url: &str,
        access_token: &str,
        timeout: Duration,
        per_page: usize,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
            per_page,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let token = config
            .access_token()
            .ok_or_else(|| EtlError::MissingConfigError {
                field: "access_token".to_string(),
            })?;

        Self::new(
            config.base_url(),
            token,
            Duration::from_secs(config.request_timeout_secs()),
            config.per_page(),
        )
    }

    pub fn modules_url(&self, course_id: &str) -> String {
        format!("{}/api/v1/courses/{}/modules", self.base_url, course_id)
    }

    fn first_page_url(&self, url: &str) -> Result<String> {
        let mut parsed = Url::parse(url)?;
        if !parsed.query_pairs().any(|(k, _)| k == "per_page") {
            parsed
                .query_pairs_mut()
                .append_pair("per_page", &self.per_page.to_string());
        }
        Ok(parsed.to_string())
    }

    async fn get_all<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>> {
        let mut results = Vec::new();
        let mut seen = HashSet::new();
        let mut next = Some(self.first_page_url(url)?);

        while let Some(page_url) = next.take() {
            if !seen.insert(page_url.clone()) {
                tracing::warn!("Pagination loop detected at {}, stopping", page_url);
                break;
            }

            tracing::debug!("GET {}", page_url);
            let response = self
                .client
                .get(&page_url)
                .bearer_auth(&self.access_token)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(EtlError::HttpStatusError {
                    url: page_url,
                    status: status.as_u16(),
                });
            }

            next = next_page_link(response.headers());
            let body = response.text().await?;
            let page: Vec<T> =
                serde_json::from_str(&body).map_err(|e| EtlError::MalformedResponse {
                    url: page_url.clone(),
                    message: e.to_string(),
                })?;

            tracing::debug!("Received {} records from {}", page.len(), page_url);
            results.extend(page);
        }

        Ok(results)
    }
}

#[async_trait]
impl CanvasApi for CanvasClient {
    async fn list_modules(&self, course_id: &str) -> Result<Vec<Module>> {
        let url = self.modules_url(course_id);
        self.get_all(&url).await
    }

    async fn list_items(&self, items_url: &str) -> Result<Vec<ModuleItem>> {
        self.get_all(items_url).await
    }
}

/// Extract the `rel="next"` target from a `Link` header.
pub fn next_page_link(headers: &HeaderMap) -> Option<String> {
    let link = headers.get(LINK)?.to_str().ok()?;
    link.split(',').find_map(|entry| {
        let mut segments = entry.split(';');
        let target = segments.next()?.trim();
        let is_next = segments.any(|param| {
            let param = param.trim();
            param == r#"rel="next""# || param == "rel=next"
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}
