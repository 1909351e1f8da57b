pub mod bucket;
pub mod cancellation;
pub mod error;
pub mod negotiation;
pub mod opening;
pub mod record;
pub mod role;
pub mod status;

pub use bucket::{BucketedCollaborations, PartitionTable, StatusBucket, partition_collaborations};
pub use cancellation::{CancellationDraft, CancellationError, CancellationTicket};
pub use error::TransitionError;
pub use negotiation::Action;
pub use opening::{OpeningRequest, Participant, opening_status};
pub use record::{Collaboration, Offer, PaymentStatus, WorkStatus};
pub use role::{ActorRole, CollaborationKind, Side};
pub use status::CollaborationStatus;
