pub mod entities;
pub mod requests;
pub mod resolve;
pub mod responses;
