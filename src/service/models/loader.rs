use crate::entities::models::LlamaModel;
use crate::service::models::ModelError;
use crate::utils::config::{GenerationConfig, ModelConfig};
use candle_core::quantized::{ggml_file, gguf_file};
use candle_core::Device;
use candle_transformers::models::quantized_llama::ModelWeights;
use std::path::{Path, PathBuf};
use tokenizers::Tokenizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightsFormat {
    Gguf,
    Ggml,
}

impl WeightsFormat {
    /// `.gguf` 文件按 GGUF 读取，其他文件按旧版 GGML 读取
    pub fn detect(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("gguf") => WeightsFormat::Gguf,
            _ => WeightsFormat::Ggml,
        }
    }
}

pub struct ModelLoader {
    weights_path: PathBuf,
    tokenizer_path: PathBuf,
    format: WeightsFormat,
    gqa: usize,
    device: Device,
}

impl ModelLoader {
    pub fn new(config: &ModelConfig) -> Result<Self, ModelError> {
        // 检查权重文件
        if !config.weights.is_file() {
            return Err(ModelError::WeightsNotFound(config.weights.display().to_string()));
        }
        // 检查分词器文件
        if !config.tokenizer.is_file() {
            return Err(ModelError::TokenizerNotFound(config.tokenizer.display().to_string()));
        }

        let device = if config.use_gpu { Device::cuda_if_available(0)? } else { Device::Cpu };

        Ok(Self {
            weights_path: config.weights.clone(),
            tokenizer_path: config.tokenizer.clone(),
            format: WeightsFormat::detect(&config.weights),
            gqa: config.gqa,
            device,
        })
    }

    pub fn load(&self, generation: GenerationConfig) -> Result<LlamaModel, ModelError> {
        let weights = self.load_weights()?;
        let tokenizer = self.load_tokenizer()?;
        Ok(LlamaModel::new(weights, tokenizer, self.device.clone(), generation))
    }

    fn load_weights(&self) -> Result<ModelWeights, ModelError> {
        let mut file = std::fs::File::open(&self.weights_path)?;
        let weights = match self.format {
            WeightsFormat::Gguf => {
                let content = gguf_file::Content::read(&mut file)
                    .map_err(|e| e.with_path(&self.weights_path))?;
                log::info!(
                    "Read GGUF weights: {} tensors, {} metadata entries",
                    content.tensor_infos.len(),
                    content.metadata.len()
                );
                ModelWeights::from_gguf(content, &mut file, &self.device)?
            }
            WeightsFormat::Ggml => {
                let content = ggml_file::Content::read(&mut file, &self.device)
                    .map_err(|e| e.with_path(&self.weights_path))?;
                log::info!(
                    "Read GGML weights: {} tensors, vocab size {}",
                    content.tensors.len(),
                    content.hparams.n_vocab
                );
                ModelWeights::from_ggml(content, self.gqa)?
            }
        };
        Ok(weights)
    }

    fn load_tokenizer(&self) -> Result<Tokenizer, ModelError> {
        Tokenizer::from_file(&self.tokenizer_path).map_err(|e| {
            ModelError::Tokenizer(format!(
                "failed to load {}: {}",
                self.tokenizer_path.display(),
                e
            ))
        })
    }
}
