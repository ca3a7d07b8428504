//! # Quill Shared
//!
//! Wire types shared between the API server and its clients: entity JSON
//! representations and the single response envelope every handler uses.

pub mod dto;
pub mod response;

pub use response::ApiMessage;
