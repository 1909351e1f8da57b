pub mod auth;
pub mod collaboration;
pub mod kyc;
pub mod payout;
pub mod upload;
