//! 模型服务实现
//!
//! 本模块负责本地量化模型的管理，包括：
//! - 按需加载模型（每个进程只加载一次）
//! - 模型状态查询
//!
//! # 示例
//! ```no_run
//! use blog_generator::service::models::ModelManager;
//! use blog_generator::utils::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::load("config/app.yml").unwrap();
//!     let manager = ModelManager::new(config.model, config.generation);
//!     let model = manager.get_model().await.unwrap();
//!     println!("{}", model.generate_response("Write a haiku about rust").unwrap());
//! }
//! ```

pub mod loader;

use crate::entities::models::Model;
use crate::utils::config::{GenerationConfig, ModelConfig};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::OnceCell;

pub use self::loader::ModelLoader;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Model weights not found: {0}")]
    WeightsNotFound(String),
    #[error("Tokenizer not found: {0}")]
    TokenizerNotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Candle error: {0}")]
    Candle(#[from] candle_core::Error),
    #[error("Tokenizer error: {0}")]
    Tokenizer(String),
    #[error("Prompt produced no tokens")]
    EmptyPrompt,
    #[error("Model lock poisoned")]
    Poisoned,
    #[error("Model initialization failed: {0}")]
    InitializationFailed(String),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ModelStatus {
    pub id: String,
    pub weights: String,
    pub is_cached: bool,
    pub is_loaded: bool,
}

type LoadFn = dyn Fn() -> Result<Arc<dyn Model>, ModelError> + Send + Sync;

/// 缓存进程内唯一的模型句柄
///
/// 并发的首次调用共享同一次加载。加载失败不会被缓存，下一次调用会重新加载。
#[derive(Clone)]
pub struct ModelManager {
    config: ModelConfig,
    model: Arc<OnceCell<Arc<dyn Model>>>,
    loader: Arc<LoadFn>,
}

impl ModelManager {
    /// 创建一个加载 `config` 所描述的量化 llama 模型的 ModelManager 实例
    pub fn new(config: ModelConfig, generation: GenerationConfig) -> Self {
        let loader_config = config.clone();
        Self::with_loader(config, move || {
            let model = ModelLoader::new(&loader_config)?.load(generation.clone())?;
            Ok(Arc::new(model) as Arc<dyn Model>)
        })
    }

    /// 使用自定义加载函数创建 ModelManager
    pub fn with_loader<F>(config: ModelConfig, loader: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn Model>, ModelError> + Send + Sync + 'static,
    {
        Self { config, model: Arc::new(OnceCell::new()), loader: Arc::new(loader) }
    }

    /// 获取模型，首次调用时在阻塞线程池中加载
    ///
    /// # 返回值
    /// * `Ok(model)` - 已加载的模型
    /// * `Err(ModelError)` - 权重或分词器缺失，或加载失败
    pub async fn get_model(&self) -> Result<Arc<dyn Model>, ModelError> {
        self.model
            .get_or_try_init(|| async {
                log::info!("Loading model {} from {}", self.config.id, self.config.weights.display());
                let start = Instant::now();
                let loader = self.loader.clone();
                let model = tokio::task::spawn_blocking(move || (*loader)())
                    .await
                    .map_err(|e| ModelError::InitializationFailed(e.to_string()))?
                    .inspect_err(|e| log::error!("Failed to load model {}: {}", self.config.id, e))?;
                log::info!("Model {} loaded in {}ms", self.config.id, start.elapsed().as_millis());
                Ok::<_, ModelError>(model)
            })
            .await
            .cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.model.initialized()
    }

    pub fn status(&self) -> ModelStatus {
        ModelStatus {
            id: self.config.id.clone(),
            weights: self.config.weights.display().to_string(),
            is_cached: self.config.weights.is_file(),
            is_loaded: self.is_loaded(),
        }
    }
}
