//! HTTP Server 实现
//!
//! 使用 axum 创建本地 HTTP Server，支持启动和优雅关闭。

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};

use super::config::ServerConfig;
use super::error::ServerError;
use super::handlers::{self, AppState};
use crate::services::PrivacyMiningService;

/// Server 控制句柄
///
/// 用于控制 Server 的生命周期，drop 时自动发送关闭信号
pub struct ServerHandle {
    /// 关闭信号发送器
    shutdown_tx: Option<oneshot::Sender<()>>,
    /// 后台任务
    task: Option<JoinHandle<()>>,
    /// 当前运行的端口
    port: u16,
}

impl ServerHandle {
    /// 获取当前端口
    pub fn port(&self) -> u16 {
        self.port
    }

    /// 发送关闭信号
    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }

    /// 发送关闭信号并等待 Server 退出
    pub async fn shutdown_and_wait(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "Server task failed");
            }
        }
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// 本地 HTTP Server
pub struct LocalServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl LocalServer {
    /// 创建新的 Server 实例
    pub fn new(config: ServerConfig, service: PrivacyMiningService) -> Self {
        Self {
            config,
            state: Arc::new(AppState { service }),
        }
    }

    /// 构建路由
    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/health", get(handlers::health_check))
            .route("/api/encrypt", post(handlers::encrypt_data))
            .route("/api/mine", post(handlers::mine_data))
            .route("/api/sessions/{session_id}", get(handlers::get_session))
            .layer(DefaultBodyLimit::max(self.config.max_upload_bytes))
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .with_state(self.state.clone())
    }

    /// 启动 Server
    ///
    /// # Arguments
    /// * `port` - 可选端口号，如果不提供则使用配置中的端口
    ///
    /// # Returns
    /// ServerHandle 用于控制 Server 生命周期
    pub async fn start(&self, port: Option<u16>) -> Result<ServerHandle, ServerError> {
        let port = port.unwrap_or(self.config.port);
        ServerConfig::validate_port(port)?;

        let addr = self.config.socket_addr(port);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { port, source })?;

        let app = self.router();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let graceful = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            });

            if let Err(e) = graceful.await {
                tracing::error!(error = %e, "Server error");
            }
        });

        tracing::info!(%addr, "Local server listening");

        Ok(ServerHandle {
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
            port,
        })
    }
}
