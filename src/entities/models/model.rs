use crate::service::models::ModelError;

/// A loaded text-generation model.
///
/// Implementations block while generating; callers run them on a blocking thread.
pub trait Model: Send + Sync {
    fn generate_response(&self, prompt: &str) -> Result<String, ModelError>;
}
