//! Domain entities - the core business objects.

mod post;
mod theme;
mod user;

pub use post::Post;
pub use theme::Theme;
pub use user::User;
