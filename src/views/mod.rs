//! Article view counting.
//!
//! Counts are owned by an external counting service; this module only relays
//! registrations and reads to it. Registration and reads are independent
//! calls, so a read may not yet include a view registered just before it.

mod memory;
mod remote;

use std::fmt;

use async_trait::async_trait;

use crate::error::Result;

pub use memory::MemoryViewStore;
pub use remote::RemoteViewStore;

/// Placeholder shown while the count is unknown or zero.
pub const VIEWS_PLACEHOLDER: &str = "–––";

#[async_trait]
pub trait ViewStore: Send + Sync {
    /// Registers one view for `slug` and returns the backend's new total.
    async fn register(&self, slug: &str) -> Result<u64>;

    /// Reads the current total for `slug`.
    async fn total(&self, slug: &str) -> Result<u64>;
}

/// Display state of a view count as seen by a reader.
///
/// Pages are rendered only after the read has settled, so a reader sees
/// either a loaded total or the failure placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewCount {
    Loaded(u64),
    Failed,
}

impl ViewCount {
    /// Reads the total from `store`, folding any failure into `Failed`.
    pub async fn fetch(store: &dyn ViewStore, slug: &str) -> Self {
        store
            .total(slug)
            .await
            .inspect_err(|e| crate::warning!("Cannot read views for {}: {}", slug, e))
            .into()
    }
}

impl<E> From<std::result::Result<u64, E>> for ViewCount {
    fn from(res: std::result::Result<u64, E>) -> Self {
        match res {
            Ok(total) => ViewCount::Loaded(total),
            Err(_) => ViewCount::Failed,
        }
    }
}

impl fmt::Display for ViewCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewCount::Loaded(total) if *total > 0 => {
                write!(f, "{} views", group_thousands(*total))
            }
            _ => write!(f, "{VIEWS_PLACEHOLDER} views"),
        }
    }
}

/// Formats `n` with comma thousands separators, e.g. `1234567` → `1,234,567`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
