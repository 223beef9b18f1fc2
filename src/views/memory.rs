use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{error::Result, views::ViewStore};

/// Process-local counter for development when no counting service is
/// configured. Counts are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryViewStore {
    counts: Mutex<HashMap<String, u64>>,
}

impl MemoryViewStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ViewStore for MemoryViewStore {
    async fn register(&self, slug: &str) -> Result<u64> {
        let mut counts = self.counts.lock().await;
        let total = counts.entry(slug.to_string()).or_insert(0);
        *total += 1;
        Ok(*total)
    }

    async fn total(&self, slug: &str) -> Result<u64> {
        let counts = self.counts.lock().await;
        Ok(counts.get(slug).copied().unwrap_or(0))
    }
}
