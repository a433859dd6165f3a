//! SeaORM entities, one per table.

pub mod post;
pub mod theme;
pub mod user;
