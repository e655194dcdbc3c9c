//! 会话存储模块
//!
//! 以随机会话 ID 保存加密结果 (CiphertextBundle)。
//!
//! ## 生命周期
//! - 加密成功后创建，之后不更新、不删除
//! - 仅存在于进程内存中，重启后丢失
//! - 通过 [`SessionStore`] trait 注入，可替换为持久化或分布式实现

mod store;


use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::transform::CiphertextBundle;

pub use store::{InMemorySessionStore, MAX_ID_ATTEMPTS};

/// 会话 ID 长度（十六进制字符）
pub const SESSION_ID_LEN: usize = 32;

/// 会话存储错误
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// 会话不存在
    #[error("Session not found: {0}")]
    NotFound(String),

    /// 多次生成的 ID 均已被占用
    #[error("Could not allocate a unique session id after {attempts} attempts")]
    IdSpaceExhausted { attempts: usize },
}

/// 会话记录
#[derive(Debug, Clone)]
pub struct SessionRecord {
    /// 会话 ID
    pub session_id: String,
    /// 加密结果
    pub bundle: CiphertextBundle,
    /// 原始记录数
    pub record_count: usize,
    /// 创建时间
    pub created_at: DateTime<Utc>,
}

/// 会话存储 trait
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// 保存加密结果，返回新分配的会话 ID
    async fn put(
        &self,
        bundle: CiphertextBundle,
        record_count: usize,
    ) -> Result<String, SessionError>;

    /// 按 ID 获取会话
    async fn get(&self, session_id: &str) -> Result<SessionRecord, SessionError>;

    /// 会话数量
    async fn len(&self) -> usize;

    /// 是否为空
    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// 生成会话 ID
///
/// 对 32 字节随机数取 SHA-256，保留十六进制摘要的前 32 个字符
pub fn generate_session_id() -> String {
    let bytes: [u8; 32] = rand::thread_rng().gen();
    let digest = Sha256::digest(bytes);
    let mut id = format!("{:x}", digest);
    id.truncate(SESSION_ID_LEN);
    id
}
