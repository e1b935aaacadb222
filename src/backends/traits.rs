use async_trait::async_trait;

use super::external_streams::{ExternalStream, ResolveResponse};
use crate::models::ContentId;
use crate::utils::StreamResult;

/// Read-only access to the external stream resolution service.
#[async_trait]
pub trait StreamResolver: Send + Sync + std::fmt::Debug {
    /// Candidate streams currently offered for `content_id`, in server order.
    async fn list_streams(&self, content_id: &ContentId) -> StreamResult<Vec<ExternalStream>>;

    /// Resolve the candidate at `index` of the most recent listing into a playable URL.
    /// The index is passed through untouched; its meaning belongs to the server.
    async fn resolve_stream(
        &self,
        content_id: &ContentId,
        index: usize,
    ) -> StreamResult<ResolveResponse>;
}
