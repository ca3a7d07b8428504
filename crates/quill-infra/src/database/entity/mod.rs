//! SeaORM entity definitions.

pub mod favorite;
pub mod post;
pub mod user;
