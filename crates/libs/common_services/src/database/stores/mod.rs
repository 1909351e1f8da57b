pub mod collaboration_store;
pub mod kyc_store;
pub mod payout_store;
pub mod user_store;
