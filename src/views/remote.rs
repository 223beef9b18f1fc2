use async_trait::async_trait;
use reqwest::Client;

use crate::{error::Result, types::ViewTotal, utils::ensure_success, views::ViewStore};

/// Relays view counts to an external counting service.
///
/// The service is expected to answer both `GET {base}/{slug}` and
/// `POST {base}/{slug}` with `{"total": <n>}`.
#[derive(Debug, Clone)]
pub struct RemoteViewStore {
    http: Client,
    base_url: String,
}

impl RemoteViewStore {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    fn url(&self, slug: &str) -> String {
        format!("{}/{}", self.base_url, slug)
    }
}

#[async_trait]
impl ViewStore for RemoteViewStore {
    async fn register(&self, slug: &str) -> Result<u64> {
        let res = self.http.post(self.url(slug)).send().await?;
        let total: ViewTotal = ensure_success(res).await?.json().await?;
        Ok(total.total)
    }

    async fn total(&self, slug: &str) -> Result<u64> {
        let res = self.http.get(self.url(slug)).send().await?;
        let total: ViewTotal = ensure_success(res).await?.json().await?;
        Ok(total.total)
    }
}
