use crate::entities::models::Model;
use crate::service::models::ModelError;
use crate::utils::config::GenerationConfig;
use candle_core::{DType, Device, Tensor};
use candle_transformers::generation::{LogitsProcessor, Sampling};
use candle_transformers::models::quantized_llama::ModelWeights;
use std::sync::Mutex;
use std::time::Instant;
use tokenizers::Tokenizer;

const EOS_TOKEN: &str = "</s>";

/// 量化 llama 模型实现，推理参数固定
pub struct LlamaModel {
    weights: Mutex<ModelWeights>,
    tokenizer: Tokenizer,
    device: Device,
    generation: GenerationConfig,
    eos_token_id: Option<u32>,
}

impl LlamaModel {
    pub fn new(
        weights: ModelWeights,
        tokenizer: Tokenizer,
        device: Device,
        generation: GenerationConfig,
    ) -> Self {
        let eos_token_id = tokenizer.token_to_id(EOS_TOKEN);
        if eos_token_id.is_none() {
            log::warn!("Tokenizer has no {} token, generation stops at max_new_tokens", EOS_TOKEN);
        }
        Self { weights: Mutex::new(weights), tokenizer, device, generation, eos_token_id }
    }

    fn sample(
        &self,
        processor: &mut LogitsProcessor,
        logits: &Tensor,
        context: &[u32],
    ) -> Result<u32, ModelError> {
        let logits = logits.squeeze(0)?.to_dtype(DType::F32)?;
        let logits = if self.generation.repeat_penalty == 1.0 {
            logits
        } else {
            let start = context.len().saturating_sub(self.generation.repeat_last_n);
            candle_transformers::utils::apply_repeat_penalty(
                &logits,
                self.generation.repeat_penalty,
                &context[start..],
            )?
        };
        Ok(processor.sample(&logits)?)
    }
}

impl Model for LlamaModel {
    fn generate_response(&self, prompt: &str) -> Result<String, ModelError> {
        let encoding = self
            .tokenizer
            .encode(prompt, true)
            .map_err(|e| ModelError::Tokenizer(e.to_string()))?;
        let budget = self.generation.context_length.saturating_sub(self.generation.max_new_tokens);
        let prompt_tokens = fit_to_context(encoding.get_ids(), budget);
        if prompt_tokens.is_empty() {
            return Err(ModelError::EmptyPrompt);
        }
        if prompt_tokens.len() < encoding.get_ids().len() {
            log::warn!(
                "Prompt truncated from {} to {} tokens",
                encoding.get_ids().len(),
                prompt_tokens.len()
            );
        }

        let seed = self.generation.seed.unwrap_or_else(rand::random);
        let mut processor = LogitsProcessor::from_sampling(seed, sampling(&self.generation));
        let max_new_tokens = self.generation.max_new_tokens;
        let mut context = prompt_tokens.to_vec();
        let mut generated = Vec::with_capacity(max_new_tokens);

        let start = Instant::now();
        let mut weights = self.weights.lock().map_err(|_| ModelError::Poisoned)?;

        let input = Tensor::new(prompt_tokens, &self.device)?.unsqueeze(0)?;
        let logits = weights.forward(&input, 0)?;
        let mut next_token = self.sample(&mut processor, &logits, &context)?;

        for index in 0..max_new_tokens {
            if Some(next_token) == self.eos_token_id {
                break;
            }
            generated.push(next_token);
            context.push(next_token);
            if index + 1 == max_new_tokens {
                break;
            }

            let input = Tensor::new(&[next_token], &self.device)?.unsqueeze(0)?;
            let logits = weights.forward(&input, prompt_tokens.len() + index)?;
            next_token = self.sample(&mut processor, &logits, &context)?;
        }
        drop(weights);

        let elapsed = start.elapsed();
        log::debug!(
            "Generated {} tokens from a {}-token prompt in {}ms ({:.2} tokens/s)",
            generated.len(),
            prompt_tokens.len(),
            elapsed.as_millis(),
            generated.len() as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
        );

        self.tokenizer.decode(&generated, true).map_err(|e| ModelError::Tokenizer(e.to_string()))
    }
}

/// 根据生成参数选择采样策略，温度不大于 0 时使用贪心解码
pub fn sampling(config: &GenerationConfig) -> Sampling {
    if config.temperature <= 0.0 {
        Sampling::ArgMax
    } else {
        Sampling::TopKThenTopP { k: config.top_k, p: config.top_p, temperature: config.temperature }
    }
}

/// 保留最后 `budget` 个 token，使提示词和生成内容不超出上下文窗口
pub fn fit_to_context(tokens: &[u32], budget: usize) -> &[u32] {
    &tokens[tokens.len().saturating_sub(budget)..]
}
