// sftp-fetch - 无状态 SFTP 文件拉取服务
// 应用入口

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;

mod api;
mod constants;
mod models;
mod services;
mod ssh;

use services::settings::{self, ServiceSettings};
use services::DownloadService;
use ssh::SshConnector;

fn main() -> Result<()> {
    // 初始化日志系统
    // 可以通过 RUST_LOG 环境变量控制日志级别，例如：RUST_LOG=debug sftp-fetch
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false) // 不显示 target（模块路径）
        .init();

    let settings = settings::load_settings().context("无法加载服务配置")?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("sftp-worker")
        .build()
        .context("无法创建 Tokio 运行时")?;

    runtime.block_on(serve(settings))
}

async fn serve(settings: ServiceSettings) -> Result<()> {
    let addr = settings.socket_addr()?;
    let service = DownloadService::new(
        Arc::new(SshConnector),
        settings.timeouts.clone(),
        settings.host_key_policy.clone(),
    );
    let app = api::router(api::AppState::new(service, settings.include_logs));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("无法监听 {}", addr))?;
    tracing::info!(
        "[API] {} v{} listening on http://{}",
        constants::service::NAME,
        constants::service::VERSION,
        addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP 服务异常退出")?;

    tracing::info!("[API] Server stopped");
    Ok(())
}

/// 等待 Ctrl+C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("[API] Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("[API] Shutdown signal received");
}
