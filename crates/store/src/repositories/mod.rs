use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use motoquote_core::domain::{Quote, QuoteId};

pub mod memory;

pub use memory::InMemoryQuoteRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("storage error: {0}")]
    Storage(String),
}

/// A finalized quote together with the reference assigned on save.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredQuote {
    pub id: QuoteId,
    pub quote: Quote,
    pub saved_at: DateTime<Utc>,
}

#[async_trait]
pub trait QuoteRepository: Send + Sync {
    async fn find_by_id(&self, id: &QuoteId) -> Result<Option<StoredQuote>, RepositoryError>;
    async fn list(&self) -> Result<Vec<StoredQuote>, RepositoryError>;
    async fn save(&self, quote: Quote) -> Result<StoredQuote, RepositoryError>;
}
