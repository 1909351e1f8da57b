pub mod test_collaboration;
pub mod test_payout;
pub mod test_root;
