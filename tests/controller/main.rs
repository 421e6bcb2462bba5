#[path = "../common/mod.rs"]
mod common;

mod blog_form_test;
