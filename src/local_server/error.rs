//! 本地 Server 错误类型定义

use thiserror::Error;

/// 本地 Server 错误
#[derive(Debug, Error)]
pub enum ServerError {
    /// 端口无效
    #[error("Port must be >= 1024 (non-privileged ports), got {0}")]
    InvalidPort(u16),

    /// 端口绑定失败
    #[error("Failed to bind to port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },

    /// 文件操作错误
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// 配置序列化错误
    #[error("Config serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
