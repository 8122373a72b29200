use async_trait::async_trait;
use common::{error::AppError, utils::config::AppConfig};
use tracing::debug;
use url::Url;

use crate::{request::PageRequest, submission::Listing};

/// The external search service, one page per call.
#[async_trait]
pub trait SearchApi: Send + Sync {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Listing, AppError>;
}

/// Unauthenticated client for Reddit's public `search.json` endpoint.
pub struct RedditClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl RedditClient {
    pub fn new(endpoint: &str, user_agent: &str) -> Result<Self, AppError> {
        let endpoint = Url::parse(endpoint)?;
        let http = reqwest::Client::builder().user_agent(user_agent).build()?;

        Ok(Self { http, endpoint })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        Self::new(&config.reddit_search_url, &config.user_agent)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SearchApi for RedditClient {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Listing, AppError> {
        let url = request.url(&self.endpoint);
        debug!(%url, "url");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
