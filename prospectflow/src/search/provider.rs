//! Protocol trait for search backends.

use async_trait::async_trait;

use super::planner::SearchRequest;

/// A search backend returning ranked result URLs for a query.
///
/// Implementations never fail towards the caller: transport errors,
/// malformed responses and provider-reported errors all come back as an
/// empty list. The returned list keeps provider order and never exceeds
/// `request.limit`.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Runs one query.
    async fn search(&self, request: &SearchRequest) -> Vec<String>;
}
