//! 内存会话存储

use async_trait::async_trait;
use chrono::Utc;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{generate_session_id, SessionError, SessionRecord, SessionStore};
use crate::transform::CiphertextBundle;

/// 分配会话 ID 的最大尝试次数
pub const MAX_ID_ATTEMPTS: usize = 8;

type IdGenerator = Box<dyn Fn() -> String + Send + Sync>;

/// 内存会话存储
///
/// 只追加的映射，无淘汰。插入在单个写锁内完成。
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, SessionRecord>>,
    id_generator: IdGenerator,
}

impl InMemorySessionStore {
    /// 创建新的内存存储
    pub fn new() -> Self {
        Self::with_id_generator(generate_session_id)
    }

    /// 使用自定义 ID 生成器创建存储
    pub fn with_id_generator<F>(generator: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self {
            sessions: RwLock::new(HashMap::new()),
            id_generator: Box::new(generator),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn put(
        &self,
        bundle: CiphertextBundle,
        record_count: usize,
    ) -> Result<String, SessionError> {
        let mut sessions = self.sessions.write().await;

        for attempt in 1..=MAX_ID_ATTEMPTS {
            match sessions.entry((self.id_generator)()) {
                Entry::Occupied(entry) => {
                    tracing::warn!(
                        session_id = %entry.key(),
                        attempt,
                        "Session id collision, regenerating"
                    );
                }
                Entry::Vacant(entry) => {
                    let session_id = entry.key().clone();
                    entry.insert(SessionRecord {
                        session_id: session_id.clone(),
                        bundle,
                        record_count,
                        created_at: Utc::now(),
                    });
                    return Ok(session_id);
                }
            }
        }

        Err(SessionError::IdSpaceExhausted {
            attempts: MAX_ID_ATTEMPTS,
        })
    }

    async fn get(&self, session_id: &str) -> Result<SessionRecord, SessionError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(session_id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
