use blog_generator::entities::{Audience, BlogForm, BlogRequest};
use blog_generator::error::AppError;
use blog_generator::service::models::ModelError;
use blog_generator::service::BlogService;

use crate::common::{failing_manager, manager_with, MockGenerator, SAMPLE_OUTPUT};

fn request(word_count: usize) -> BlogRequest {
    BlogRequest { topic: "Ownership in Rust".to_string(), audience: Audience::CommonPeople, word_count }
}

#[tokio::test]
async fn test_generate_truncates_and_counts() {
    let mut model = MockGenerator::new();
    model
        .expect_generate_response()
        .withf(|prompt| {
            prompt.contains("\"Ownership in Rust\"")
                && prompt.contains("Common People audience")
                && prompt.contains("limit of 6 words")
                && prompt.ends_with("Common People community.")
        })
        .times(1)
        .returning(|_| Ok(SAMPLE_OUTPUT.to_string()));

    let service = BlogService::new(manager_with(model));
    let blog = service.generate(&request(6)).await.unwrap();

    assert_eq!(blog.content, "Rust is great It is fast");
    assert_eq!(blog.word_count, 13);
}

#[tokio::test]
async fn test_short_output_is_kept_whole() {
    let mut model = MockGenerator::new();
    model.expect_generate_response().returning(|_| Ok("Short: answer.".to_string()));

    let service = BlogService::new(manager_with(model));
    let blog = service.generate(&request(500)).await.unwrap();

    assert_eq!(blog.content, "Short answer");
    assert_eq!(blog.word_count, 2);
}

#[tokio::test]
async fn test_model_is_loaded_once_across_requests() {
    let mut model = MockGenerator::new();
    model.expect_generate_response().times(3).returning(|_| Ok("one two three".to_string()));

    let service = BlogService::new(manager_with(model));
    for _ in 0..3 {
        service.generate(&request(2)).await.unwrap();
    }
    assert!(service.models().is_loaded());
}

#[tokio::test]
async fn test_invalid_request_skips_model() {
    let mut model = MockGenerator::new();
    model.expect_generate_response().never();
    let service = BlogService::new(manager_with(model));

    let err = service.generate(&request(0)).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(ref details) if details.field == "word_count"));

    let form = BlogForm {
        topic: "Rust".to_string(),
        word_count: "ten".to_string(),
        audience: "Researchers".to_string(),
    };
    assert!(matches!(service.generate_from_form(&form).await, Err(AppError::Validation(_))));
    assert!(!service.models().is_loaded());
}

#[tokio::test]
async fn test_generation_error_propagates() {
    let mut model = MockGenerator::new();
    model
        .expect_generate_response()
        .returning(|_| Err(ModelError::Tokenizer("unknown token".to_string())));

    let service = BlogService::new(manager_with(model));
    let err = service.generate(&request(10)).await.unwrap_err();
    assert!(matches!(err, AppError::Model(ModelError::Tokenizer(_))));
    assert!(err.to_string().contains("unknown token"));
}

#[tokio::test]
async fn test_load_failure_propagates() {
    let service = BlogService::new(failing_manager());
    let err = service.generate(&request(10)).await.unwrap_err();
    assert!(matches!(err, AppError::Model(ModelError::WeightsNotFound(_))));
}
