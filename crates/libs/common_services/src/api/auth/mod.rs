pub mod error;
pub mod hashing;
pub mod interfaces;
pub mod service;
