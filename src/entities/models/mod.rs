pub mod llama;
pub mod model;

pub use llama::LlamaModel;
pub use model::Model;
