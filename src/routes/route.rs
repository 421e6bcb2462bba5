use crate::controller::{blog, models};
use crate::error::AppError;
use crate::service::{BlogService, ModelManager};
use crate::utils::config::AppConfig;
use crate::utils::download::BackgroundImage;
use actix_web::web;
use std::sync::Arc;

/// Shared per-process state. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub blog: BlogService,
    pub background: Option<Arc<BackgroundImage>>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, background: Option<BackgroundImage>) -> Self {
        let models = ModelManager::new(config.model.clone(), config.generation.clone());
        Self::with_models(config, models, background)
    }

    pub fn with_models(
        config: Arc<AppConfig>,
        models: ModelManager,
        background: Option<BackgroundImage>,
    ) -> Self {
        Self { config, blog: BlogService::new(models), background: background.map(Arc::new) }
    }

    pub fn models(&self) -> &ModelManager {
        self.blog.models()
    }
}

pub fn api_routes() -> actix_web::Scope {
    web::scope("/api/v1")
        .service(blog::api::generate_blog)
        .service(blog::api::list_audiences)
        .service(models::models::model_status)
}

async fn not_found() -> Result<actix_web::HttpResponse, AppError> {
    Err(AppError::NotFound)
}

pub fn configure(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(state))
            .app_data(web::FormConfig::default().limit(16 * 1024))
            .app_data(web::JsonConfig::default().limit(16 * 1024))
            .service(blog::form::index)
            .service(blog::form::generate)
            .service(api_routes())
            .default_service(web::to(not_found));
    }
}
