use crate::utils::config::AppConfig;
use anyhow::Context;
use log::info;
use std::path::Path;
use std::sync::Arc;

pub const LOG_CONFIG_PATH: &str = "config/log4rs.yml";

/// 初始化日志系统并加载应用配置
pub async fn init() -> anyhow::Result<Arc<AppConfig>> {
    // 初始化日志系统
    log4rs::init_file(LOG_CONFIG_PATH, Default::default())
        .with_context(|| format!("failed to initialize logging from {}", LOG_CONFIG_PATH))?;

    // 加载应用配置
    let config_path = AppConfig::path_from_env();
    let config = load_config(&config_path)?;
    info!("Application configuration loaded from {}", config_path.display());

    // 初始化本地化系统
    rust_i18n::set_locale(&config.locales.default);
    info!("Using locale: {}", config.locales.default);

    info!(
        "Model {} configured: weights={}, tokenizer={}",
        config.model.id,
        config.model.weights.display(),
        config.model.tokenizer.display()
    );
    info!("Generation parameters: {:?}", config.generation);

    Ok(Arc::new(config))
}

pub fn load_config(path: &Path) -> anyhow::Result<AppConfig> {
    AppConfig::load(path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))
}
