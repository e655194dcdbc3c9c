//! 隐私挖掘服务
//!
//! 对外暴露的核心操作：
//! - `encrypt`: 数据集 -> 全息编码 + AES-256-CBC -> 会话存储
//! - `mine`: 密文引用 + 算法 -> 分析报告（不解密）
//! - `session`: 按会话 ID 查询元数据
//! - `health`: 健康检查

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::dataset::{parse_dataset, Dataset};
use crate::error::AppError;
use crate::mining::{MiningAlgorithm, MiningDispatcher, Report};
use crate::session::{InMemorySessionStore, SessionStore};
use crate::transform::HolographicEncryptor;

/// 加密响应
///
/// 只返回密文和元数据，不包含密钥与 IV
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptResponse {
    /// Base64 密文
    pub encrypted: String,
    /// 会话 ID
    pub session_id: String,
    /// 算法名称
    pub algorithm: String,
    /// 密钥长度（位）
    pub key_size: u32,
    /// 原始记录数
    pub record_count: usize,
    /// 响应时间
    pub timestamp: DateTime<Utc>,
}

/// 会话摘要
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: String,
    pub encrypted: String,
    pub algorithm: String,
    pub key_size: u32,
    pub record_count: usize,
    pub created_at: DateTime<Utc>,
}

/// 健康检查响应
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: String,
    pub encryption: String,
    pub algorithms: Vec<MiningAlgorithm>,
    pub active_sessions: usize,
    pub timestamp: DateTime<Utc>,
}

/// 隐私挖掘服务
pub struct PrivacyMiningService {
    encryptor: HolographicEncryptor,
    dispatcher: MiningDispatcher,
    store: Arc<dyn SessionStore>,
}

impl PrivacyMiningService {
    /// 使用注入的会话存储和挖掘调度器创建服务
    pub fn new(store: Arc<dyn SessionStore>, dispatcher: MiningDispatcher) -> Self {
        Self {
            encryptor: HolographicEncryptor::new(),
            dispatcher,
            store,
        }
    }

    /// 使用内存存储和非确定性调度器创建服务
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemorySessionStore::new()), MiningDispatcher::new())
    }

    /// 会话存储
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// 加密数据集并保存到会话存储
    ///
    /// 空数据集直接拒绝，不执行加密
    pub async fn encrypt(&self, dataset: &Dataset) -> Result<EncryptResponse, AppError> {
        dataset.ensure_not_empty()?;
        let record_count = dataset.record_count();

        let bundle = self.encryptor.encrypt(dataset)?;
        let encrypted = bundle.ciphertext_b64();
        let algorithm = bundle.algorithm.clone();
        let key_size = bundle.key_size_bits;
        let ciphertext_len = bundle.ciphertext.len();

        let session_id = self.store.put(bundle, record_count).await?;

        tracing::info!(
            session_id = %session_id,
            record_count,
            ciphertext_len,
            "Dataset encrypted"
        );

        Ok(EncryptResponse {
            encrypted,
            session_id,
            algorithm,
            key_size,
            record_count,
            timestamp: Utc::now(),
        })
    }

    /// 解析上传的文本并加密
    pub async fn encrypt_text(&self, content: &str) -> Result<EncryptResponse, AppError> {
        let dataset = parse_dataset(content);
        self.encrypt(&dataset).await
    }

    /// 对密文引用运行挖掘算法
    ///
    /// 密文只用于计算指纹，不会查询会话存储，也不会解密
    pub fn mine(&self, reference: &str, selector: &str) -> Result<Report, AppError> {
        let report = self.dispatcher.run_named(reference, selector)?;

        tracing::info!(
            algorithm = selector,
            execution_time_ms = report.execution_time_ms,
            "Mining report generated"
        );

        Ok(report)
    }

    /// 查询会话摘要
    pub async fn session(&self, session_id: &str) -> Result<SessionSummary, AppError> {
        let record = self.store.get(session_id).await?;

        Ok(SessionSummary {
            encrypted: record.bundle.ciphertext_b64(),
            algorithm: record.bundle.algorithm.clone(),
            key_size: record.bundle.key_size_bits,
            session_id: record.session_id,
            record_count: record.record_count,
            created_at: record.created_at,
        })
    }

    /// 健康检查
    pub async fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "running".to_string(),
            encryption: "holographic-enabled".to_string(),
            algorithms: MiningAlgorithm::ALL.to_vec(),
            active_sessions: self.store.len().await,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests;
