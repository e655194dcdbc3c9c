//! 本地 HTTP Server 模块
//!
//! 加密、挖掘与会话查询的 HTTP 接口。默认监听 127.0.0.1:{port}。

mod config;
mod error;
mod handlers;
mod server;

pub use config::{default_config_dir, ServerConfig, CONFIG_DIR_ENV, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_PORT};
pub use error::ServerError;
pub use handlers::MineRequest;
pub use server::{LocalServer, ServerHandle};
