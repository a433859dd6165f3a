//! # Blog Shared
//!
//! Wire types shared by the server and its clients: JSON bodies with the
//! blog's field names, their validation rules and the error body.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, FieldError};
