#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]
pub mod collaboration;
pub mod fees;

pub use collaboration::*;
pub use fees::{FeeSettings, FeeToggle, PayoutBreakdown, calculate_payout, parse_amount};
