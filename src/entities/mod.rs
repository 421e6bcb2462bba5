pub mod blog;
pub mod models;

pub use blog::{Audience, BlogForm, BlogRequest, GeneratedBlog};
