//! Media Sources
//!
//! Abstraction over where a creator's posts come from. A source lists posts
//! and looks up per-post engagement; `fetch_media` stitches the two together.

mod demo;

pub use demo::DemoMediaSource;

use async_trait::async_trait;
use futures::future::join_all;

use crate::error::Result;
use crate::model::MediaRecord;

/// Most posts enriched per fetch
pub const MAX_MEDIA_ITEMS: usize = 25;

/// Media source trait (Strategy pattern)
///
/// Implement this for each platform: Instagram Graph API, demo data, etc.
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// List recent posts, newest first. Counts may be absent.
    async fn list_media(&self) -> Result<Vec<MediaRecord>>;

    /// Total engagement for one post
    async fn engagement(&self, media_id: &str) -> Result<i64>;

    /// List posts and enrich each with its engagement.
    ///
    /// Lookups run concurrently. A failed lookup degrades that post to zero
    /// engagement rather than failing the batch.
    async fn fetch_media(&self) -> Result<Vec<MediaRecord>> {
        let mut media = self.list_media().await?;
        media.truncate(MAX_MEDIA_ITEMS);

        let lookups = join_all(media.iter().map(|m| self.engagement(&m.id))).await;

        let mut degraded = 0usize;
        let enriched: Vec<MediaRecord> = media
            .into_iter()
            .zip(lookups)
            .map(|(mut record, lookup)| {
                let engagement = lookup.unwrap_or_else(|e| {
                    tracing::warn!(media_id = %record.id, error = %e, "Engagement lookup failed");
                    degraded += 1;
                    0
                });
                record.like_count = Some(engagement);
                record.comments_count = Some(0);
                record
            })
            .collect();

        tracing::info!(
            source = self.name(),
            posts = enriched.len(),
            degraded,
            "Fetched media"
        );

        Ok(enriched)
    }

    /// Source name
    fn name(&self) -> &str;
}
