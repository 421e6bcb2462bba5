pub mod api;
pub mod form;

pub use api::{generate_blog, list_audiences};
pub use form::{generate, index};
