//! Where a validated listing goes on submit.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use itemforge_core::{DomainResult, ListingId, SubmissionId};

use crate::record::ListingRecord;

/// Proof that a listing was published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishReceipt {
    pub listing_id: ListingId,
    pub submission_id: SubmissionId,
    pub published_at: DateTime<Utc>,
}

/// Backend that accepts a validated listing.
///
/// Failures should be returned as `DomainError::SubmissionFailed`; the
/// controller converts anything else into one.
#[async_trait]
pub trait ListingPublisher: Send + Sync {
    async fn publish(
        &self,
        submission_id: SubmissionId,
        record: &ListingRecord,
    ) -> DomainResult<PublishReceipt>;
}

/// Stand-in backend: waits a fixed latency, then always succeeds.
#[derive(Debug, Clone)]
pub struct SimulatedPublisher {
    latency: Duration,
}

impl SimulatedPublisher {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

#[async_trait]
impl ListingPublisher for SimulatedPublisher {
    async fn publish(
        &self,
        submission_id: SubmissionId,
        record: &ListingRecord,
    ) -> DomainResult<PublishReceipt> {
        tracing::debug!(
            %submission_id,
            title = record.title(),
            latency = ?self.latency,
            "simulating publish"
        );
        tokio::time::sleep(self.latency).await;

        Ok(PublishReceipt {
            listing_id: ListingId::new(),
            submission_id,
            published_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn simulated_publish_waits_then_succeeds() {
        let publisher = SimulatedPublisher::new(Duration::from_millis(20));
        let submission_id = SubmissionId::new();
        let started = std::time::Instant::now();

        let receipt = publisher.publish(submission_id, &ListingRecord::new()).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(20));
        assert_eq!(receipt.submission_id, submission_id);
    }
}
