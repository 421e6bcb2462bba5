use actix_web::{App, HttpServer};
use anyhow::Context;
use std::time::Duration;

use blog_generator::middleware::{error_handler, Logging};
use blog_generator::routes::{self, AppState};
use blog_generator::utils::{init, BackgroundDownloader};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 初始化日志系统、应用配置和本地化
    let config = init::init()
        .await
        .context("failed to initialize application")
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, format!("{:#}", e)))?;

    // 背景图片获取失败时不影响启动
    let background = BackgroundDownloader::resolve(&config.background).await;
    let state = AppState::new(config.clone(), background);

    // 预加载模型，失败时由后续请求重试
    if config.model.preload {
        match state.models().get_model().await {
            Ok(_) => log::info!("Model {} ready", config.model.id),
            Err(e) => log::error!(
                "Model {} failed to load at startup, requests will retry: {}",
                config.model.id,
                e
            ),
        }
    }

    let server = config.server.clone();
    log::info!("Listening on http://{}:{}", server.host, server.port);

    // 创建带有优雅关闭功能的服务器
    HttpServer::new(move || {
        App::new()
            .wrap(error_handler())
            .wrap(Logging)
            .configure(routes::configure(state.clone()))
    })
    .workers(server.workers)
    .client_request_timeout(Duration::from_secs(server.client_request_timeout)) // 客户端请求超时
    .bind((server.host.as_str(), server.port))?
    .shutdown_timeout(server.shutdown_timeout) // 优雅关闭等待时间
    .run()
    .await
}
