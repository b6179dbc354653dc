pub mod entities;
pub mod merge;
pub mod requests;
