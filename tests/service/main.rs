#[path = "../common/mod.rs"]
mod common;

mod blog_service_test;
