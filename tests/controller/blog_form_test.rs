use actix_web::{test, App};
use blog_generator::middleware::error_handler;
use blog_generator::routes::{configure, AppState};

use crate::common::{
    failing_manager, manager_with, replying, state_with, state_with_background, MockGenerator,
    SAMPLE_OUTPUT,
};

async fn post_form(state: AppState, fields: &[(&str, &str)]) -> String {
    let app = test::init_service(App::new().wrap(error_handler()).configure(configure(state))).await;
    let req = test::TestRequest::post().uri("/generate").set_form(fields).to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success(), "unexpected status {}", resp.status());
    String::from_utf8(test::read_body(resp).await.to_vec()).unwrap()
}

#[actix_web::test]
async fn test_index_renders_form() {
    let state = state_with_background(manager_with(MockGenerator::new()));
    let app = test::init_service(App::new().configure(configure(state))).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    assert_eq!(resp.headers().get("content-type").unwrap(), "text/html; charset=utf-8");

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("<title>Blog Generator App</title>"));
    assert!(body.contains("Enter details below"));
    for audience in ["Researchers", "Data Scientist", "Common People", "Professionals"] {
        assert!(body.contains(&format!(">{}</option>", audience)), "missing option {audience}");
    }
    assert!(body.contains("url('data:image/gif;base64,R0lGODlh')"));
    assert!(body.contains("Blog Generator test footer"));
    assert!(!body.contains("Actual Word Count"));
}

#[actix_web::test]
async fn test_generate_renders_truncated_post() {
    let mut model = MockGenerator::new();
    model
        .expect_generate_response()
        .withf(|prompt| {
            prompt.contains("on the topic \"Rust\" for the Professionals audience")
                && prompt.contains("within a limit of 5 words")
        })
        .times(1)
        .returning(|_| Ok(SAMPLE_OUTPUT.to_string()));

    let body = post_form(
        state_with(manager_with(model)),
        &[("topic", "Rust"), ("word_count", "5"), ("audience", "Professionals")],
    )
    .await;

    assert!(body.contains("Blog generated successfully!"));
    assert!(body.contains(">Rust is great It is</textarea>"));
    assert!(body.contains("Actual Word Count: 13"));
    assert!(body.contains("<option value=\"Professionals\" selected>"));
    assert!(body.contains("value=\"Rust\""));
}

#[actix_web::test]
async fn test_missing_fields_show_warning_without_generating() {
    let mut model = MockGenerator::new();
    model.expect_generate_response().never();

    let body = post_form(
        state_with(manager_with(model)),
        &[("topic", "Rust"), ("word_count", "   "), ("audience", "Researchers")],
    )
    .await;

    assert!(body.contains("Please enter both the blog topic and the desired word count."));
    assert!(body.contains("notice warning"));
    assert!(!body.contains("<textarea"));
}

#[actix_web::test]
async fn test_invalid_word_count_shows_error() {
    let mut model = MockGenerator::new();
    model.expect_generate_response().never();

    let body = post_form(
        state_with(manager_with(model)),
        &[("topic", "Rust"), ("word_count", "many"), ("audience", "Researchers")],
    )
    .await;

    assert!(body.contains("An error occurred: The word count must be a positive whole number."));
    assert!(body.contains("notice error"));
}

#[actix_web::test]
async fn test_model_failure_is_displayed() {
    let body = post_form(
        state_with(failing_manager()),
        &[("topic", "Rust"), ("word_count", "10"), ("audience", "Common People")],
    )
    .await;

    assert!(body.contains("An error occurred: Model error: Model weights not found"));
    assert!(body.contains("<option value=\"Common People\" selected>"));
}

#[actix_web::test]
async fn test_user_input_is_escaped() {
    let body = post_form(
        state_with(manager_with(replying("Plain output"))),
        &[("topic", "<script>alert(1)</script>"), ("word_count", "2"), ("audience", "")],
    )
    .await;

    assert!(!body.contains("<script>alert(1)</script>"));
    assert!(body.contains("&lt;script&gt;"));
    assert!(body.contains(">Plain output</textarea>"));
}

#[actix_web::test]
async fn test_oversized_body_renders_error_page() {
    let mut model = MockGenerator::new();
    model.expect_generate_response().never();
    let topic = "a".repeat(20 * 1024);

    let body = post_form(
        state_with(manager_with(model)),
        &[("topic", topic.as_str()), ("word_count", "10"), ("audience", "Researchers")],
    )
    .await;

    assert!(body.contains("notice error"));
    assert!(body.contains("An error occurred: URL encoded payload is larger"));
    assert!(body.contains("<title>Blog Generator App</title>"));
}

#[actix_web::test]
async fn test_wrong_content_type_renders_error_page() {
    let mut model = MockGenerator::new();
    model.expect_generate_response().never();
    let app = test::init_service(
        App::new().wrap(error_handler()).configure(configure(state_with(manager_with(model)))),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/generate")
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"{"topic":"Rust","word_count":"10"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    assert_eq!(resp.headers().get("content-type").unwrap(), "text/html; charset=utf-8");
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("notice error"));
    assert!(!body.contains("<textarea"));
}
