use actix_web::{test, App};
use blog_generator::error::{AppError, ErrorResponse};
use blog_generator::middleware::{error_handler, Logging};
use blog_generator::routes::configure;

use crate::common::{manager_with, state_with, MockGenerator};

#[actix_web::test]
async fn test_chinese_locale_is_rendered() {
    rust_i18n::set_locale("zh-CN");

    let state = state_with(manager_with(MockGenerator::new()));
    let app = test::init_service(
        App::new().wrap(error_handler()).wrap(Logging).configure(configure(state)),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    let page = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/api/v1/unknown").to_request()).await;
    let body: ErrorResponse = test::read_body_json(resp).await;
    let generic = ErrorResponse::from(&AppError::Generic("x".to_string()));

    rust_i18n::set_locale("en");

    assert!(page.contains("<title>博客生成器</title>"));
    assert!(page.contains("lang=\"zh-CN\""));
    assert_eq!(body.code, 404);
    assert_eq!(body.status, "未找到");
    assert_eq!(generic.status, "服务器内部错误");
}
