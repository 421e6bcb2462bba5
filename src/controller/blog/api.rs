use crate::entities::{Audience, BlogRequest};
use crate::error::Result;
use crate::routes::AppState;
use actix_web::{get, post, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct BlogResponse {
    pub id: String,
    pub object: String,
    pub created: DateTime<Utc>,
    pub topic: String,
    pub audience: Audience,
    pub requested_words: usize,
    pub word_count: usize,
    pub content: String,
}

#[post("/blog")]
pub async fn generate_blog(
    state: web::Data<AppState>,
    req: web::Json<BlogRequest>,
) -> Result<HttpResponse> {
    let request = req.into_inner();
    log::debug!("Blog API request: {:?}", request);

    let blog = state.blog.generate(&request).await?;
    let response = BlogResponse {
        id: Uuid::new_v4().to_string(),
        object: "blog.generation".to_string(),
        created: Utc::now(),
        topic: request.topic,
        audience: request.audience,
        requested_words: request.word_count,
        word_count: blog.word_count,
        content: blog.content,
    };
    Ok(HttpResponse::Ok().json(response))
}

#[get("/audiences")]
pub async fn list_audiences() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "audiences": Audience::ALL }))
}
