pub mod app_user;
pub mod collaboration;
pub mod kyc;
pub mod payout;
