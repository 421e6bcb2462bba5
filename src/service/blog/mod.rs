pub mod postprocess;
pub mod prompt;

use crate::entities::{BlogForm, BlogRequest, GeneratedBlog};
use crate::error::{AppError, Result};
use crate::service::models::ModelManager;
use std::time::Instant;
use uuid::Uuid;

pub use postprocess::postprocess;
pub use prompt::build_prompt;

#[derive(Clone)]
pub struct BlogService {
    models: ModelManager,
}

impl BlogService {
    pub fn new(models: ModelManager) -> Self {
        Self { models }
    }

    pub fn models(&self) -> &ModelManager {
        &self.models
    }

    pub async fn generate_from_form(&self, form: &BlogForm) -> Result<GeneratedBlog> {
        let request = form.validate()?;
        self.generate(&request).await
    }

    /// Builds the prompt, runs the model on the blocking pool and
    /// post-processes the output.
    pub async fn generate(&self, request: &BlogRequest) -> Result<GeneratedBlog> {
        request.validate()?;

        let request_id = Uuid::new_v4();
        log::info!(
            "[{}] Generating {} words on {:?} for {}",
            request_id,
            request.word_count,
            request.topic,
            request.audience
        );

        let prompt = build_prompt(request)?;
        log::debug!("[{}] Prompt ({} chars): {}", request_id, prompt.len(), prompt);

        let model = self.models.get_model().await?;
        let start = Instant::now();
        let raw = tokio::task::spawn_blocking(move || model.generate_response(&prompt))
            .await
            .map_err(|e| {
                log::error!("[{}] Generation task failed: {}", request_id, e);
                AppError::Cancelled
            })?
            .inspect_err(|e| log::error!("[{}] Generation failed: {}", request_id, e))?;

        let blog = postprocess(&raw, request.word_count);
        log::info!(
            "[{}] Generated {} words (kept {}) in {}ms",
            request_id,
            blog.word_count,
            request.word_count.min(blog.word_count),
            start.elapsed().as_millis()
        );
        Ok(blog)
    }
}
