//! 本地 Server 配置模块
//!
//! 从配置目录下的 settings.yaml 读取监听地址、上传大小上限和挖掘随机种子。

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use super::error::ServerError;

/// 默认端口号
pub const DEFAULT_PORT: u16 = 19840;

/// 默认上传大小上限 (16 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// 覆盖配置目录的环境变量
pub const CONFIG_DIR_ENV: &str = "HOLOMINE_CONFIG_DIR";

/// 配置文件名
const CONFIG_FILENAME: &str = "settings.yaml";

/// 本地 Server 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 监听地址
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// 上传内容大小上限（字节）
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// 挖掘报告随机种子，未设置时每次请求使用新的随机数
    #[serde(default)]
    pub mining_seed: Option<u64>,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_max_upload_bytes() -> usize {
    DEFAULT_MAX_UPLOAD_BYTES
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: default_host(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            mining_seed: None,
        }
    }
}

impl ServerConfig {
    /// 从配置目录加载配置
    ///
    /// 文件不存在或无法解析时返回默认配置
    pub fn load(config_dir: &Path) -> Self {
        let config_path = Self::config_path(config_dir);

        if !config_path.exists() {
            return Self::default();
        }

        let content = match fs::read_to_string(&config_path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %config_path.display(), error = %e, "Failed to read config, using defaults");
                return Self::default();
            }
        };

        serde_yaml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %config_path.display(), error = %e, "Invalid config, using defaults");
            Self::default()
        })
    }

    /// 加载配置，文件不存在时写入默认配置
    ///
    /// 首次启动时在配置目录生成 settings.yaml
    pub fn load_or_init(config_dir: &Path) -> Result<Self, ServerError> {
        if Self::config_path(config_dir).exists() {
            return Ok(Self::load(config_dir));
        }

        let config = Self::default();
        config.save(config_dir)?;
        tracing::info!(path = %Self::config_path(config_dir).display(), "Wrote default config");
        Ok(config)
    }

    /// 保存配置到配置目录
    pub fn save(&self, config_dir: &Path) -> Result<(), ServerError> {
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_yaml::to_string(self)?;
        fs::write(Self::config_path(config_dir), content)?;
        Ok(())
    }

    /// 验证端口是否有效
    ///
    /// 端口必须 >= 1024
    pub fn validate_port(port: u16) -> Result<(), ServerError> {
        if port < 1024 {
            return Err(ServerError::InvalidPort(port));
        }
        Ok(())
    }

    /// 监听地址
    pub fn socket_addr(&self, port: u16) -> SocketAddr {
        SocketAddr::new(self.host, port)
    }

    /// 配置文件完整路径
    pub fn config_path(config_dir: &Path) -> PathBuf {
        config_dir.join(CONFIG_FILENAME)
    }
}

/// 默认配置目录
///
/// 优先使用 `HOLOMINE_CONFIG_DIR`，否则为系统配置目录下的 `holomine`
pub fn default_config_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }

    dirs::config_dir()
        .map(|dir| dir.join("holomine"))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod config_tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(config.max_upload_bytes, 16 * 1024 * 1024);
        assert_eq!(config.mining_seed, None);
    }

    #[test]
    fn test_load_nonexistent_config() {
        let dir = tempdir().unwrap();
        let config = ServerConfig::load(dir.path());
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_save_and_load_config() {
        let dir = tempdir().unwrap();
        let config = ServerConfig {
            port: 12345,
            mining_seed: Some(7),
            ..Default::default()
        };

        config.save(dir.path()).unwrap();

        let loaded = ServerConfig::load(dir.path());
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_save_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("nested").join("holomine");

        ServerConfig::default().save(&nested).unwrap();
        assert!(ServerConfig::config_path(&nested).exists());
    }

    #[test]
    fn test_load_or_init_writes_default_file() {
        let dir = tempdir().unwrap();
        let config_dir = dir.path().join("holomine");

        let config = ServerConfig::load_or_init(&config_dir).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert!(ServerConfig::config_path(&config_dir).exists());
        assert_eq!(ServerConfig::load(&config_dir), config);
    }

    #[test]
    fn test_load_or_init_keeps_existing_file() {
        let dir = tempdir().unwrap();
        fs::write(ServerConfig::config_path(dir.path()), "port: 20002\nmining_seed: 9\n").unwrap();

        let config = ServerConfig::load_or_init(dir.path()).unwrap();
        assert_eq!(config.port, 20002);
        assert_eq!(config.mining_seed, Some(9));

        let content = fs::read_to_string(ServerConfig::config_path(dir.path())).unwrap();
        assert_eq!(content, "port: 20002\nmining_seed: 9\n");
    }

    #[test]
    fn test_load_or_init_reports_io_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();

        let result = ServerConfig::load_or_init(&blocker.join("holomine"));
        assert!(matches!(result, Err(ServerError::Io(_))));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempdir().unwrap();
        fs::write(ServerConfig::config_path(dir.path()), "port: 20000\n").unwrap();

        let config = ServerConfig::load(dir.path());
        assert_eq!(config.port, 20000);
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(config.mining_seed, None);
    }

    #[test]
    fn test_invalid_config_falls_back_to_default() {
        let dir = tempdir().unwrap();
        fs::write(ServerConfig::config_path(dir.path()), "port: [not, a, port]").unwrap();

        let config = ServerConfig::load(dir.path());
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_validate_port() {
        assert!(ServerConfig::validate_port(1024).is_ok());
        assert!(ServerConfig::validate_port(8080).is_ok());
        assert!(ServerConfig::validate_port(65535).is_ok());

        assert!(matches!(
            ServerConfig::validate_port(80),
            Err(ServerError::InvalidPort(80))
        ));
        assert!(ServerConfig::validate_port(0).is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr(20001).to_string(), "127.0.0.1:20001");
    }
}
