//! # Blog Core
//!
//! The domain layer of the blog backend: entities, error types and the
//! persistence gateway traits. No infrastructure dependencies live here.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
