use crate::routes::AppState;
use actix_web::{get, web, HttpResponse};
use serde_json::json;

#[get("/models")]
pub async fn model_status(state: web::Data<AppState>) -> HttpResponse {
    let status = state.models().status();
    log::debug!("Model status: {:?}", status);
    HttpResponse::Ok().json(json!({ "models": [status] }))
}
