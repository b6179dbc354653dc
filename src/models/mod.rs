pub mod activities;
pub mod analysis;
pub mod common;
pub mod criteria;
pub mod evaluations;
pub mod export;
pub mod flags;
pub mod grades;

pub use common::response::{ApiResponse, ErrorCode};
