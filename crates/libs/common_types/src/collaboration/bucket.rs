use crate::collaboration::record::Collaboration;
use crate::collaboration::status::CollaborationStatus;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The list tab a collaboration is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum StatusBucket {
    Pending,
    InProgress,
    Archived,
    /// Fallback for statuses outside the partition table.
    Other,
}

/// Three disjoint status sets. Anything not listed is classified as
/// [`StatusBucket::Other`].
#[derive(Debug, Clone, Copy)]
pub struct PartitionTable {
    pub pending: &'static [CollaborationStatus],
    pub in_progress: &'static [CollaborationStatus],
    pub archived: &'static [CollaborationStatus],
}

pub const DEFAULT_PARTITION: PartitionTable = PartitionTable {
    pending: &[
        CollaborationStatus::Pending,
        CollaborationStatus::PendingApproval,
        CollaborationStatus::InfluencerOffer,
        CollaborationStatus::AgencyOffer,
        CollaborationStatus::BrandOffer,
        CollaborationStatus::BrandCounterOffer,
        CollaborationStatus::InfluencerCounterOffer,
    ],
    in_progress: &[
        CollaborationStatus::AgreementReached,
        CollaborationStatus::InProgress,
        CollaborationStatus::WorkSubmitted,
        CollaborationStatus::Disputed,
        CollaborationStatus::BrandDecisionPending,
        CollaborationStatus::RefundPendingAdminReview,
    ],
    archived: &[CollaborationStatus::Completed, CollaborationStatus::Rejected],
};

impl PartitionTable {
    #[must_use]
    pub fn classify(&self, status: &CollaborationStatus) -> StatusBucket {
        if self.pending.contains(status) {
            StatusBucket::Pending
        } else if self.in_progress.contains(status) {
            StatusBucket::InProgress
        } else if self.archived.contains(status) {
            StatusBucket::Archived
        } else {
            StatusBucket::Other
        }
    }
}

impl StatusBucket {
    /// Classifies with the default partition table.
    #[must_use]
    pub fn of(status: &CollaborationStatus) -> Self {
        DEFAULT_PARTITION.classify(status)
    }
}

/// Collaborations split into list tabs. Input order is kept inside each tab.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BucketedCollaborations<T> {
    pub pending: Vec<T>,
    pub in_progress: Vec<T>,
    pub archived: Vec<T>,
    pub other: Vec<T>,
}

impl<T> Default for BucketedCollaborations<T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            in_progress: Vec::new(),
            archived: Vec::new(),
            other: Vec::new(),
        }
    }
}

impl<T> BucketedCollaborations<T> {
    pub fn push(&mut self, bucket: StatusBucket, item: T) {
        match bucket {
            StatusBucket::Pending => self.pending.push(item),
            StatusBucket::InProgress => self.in_progress.push(item),
            StatusBucket::Archived => self.archived.push(item),
            StatusBucket::Other => self.other.push(item),
        }
    }
}

/// Groups collaborations by the tab their status belongs to.
pub fn partition_collaborations(
    collaborations: impl IntoIterator<Item = Collaboration>,
) -> BucketedCollaborations<Collaboration> {
    let mut buckets = BucketedCollaborations::default();
    for collaboration in collaborations {
        buckets.push(StatusBucket::of(&collaboration.status), collaboration);
    }
    buckets
}
