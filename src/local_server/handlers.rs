//! HTTP 路由处理器
//!
//! 实现 /api/encrypt、/api/mine、/api/sessions/{id} 和 /api/health 端点。
//! 处理器只做请求解析，业务逻辑在 [`PrivacyMiningService`] 中。

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::AppError;
use crate::mining::{MiningAlgorithm, MiningError, Report};
use crate::services::{EncryptResponse, PrivacyMiningService, SessionSummary};

/// 共享状态
pub struct AppState {
    pub service: PrivacyMiningService,
}

/// 挖掘请求
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MineRequest {
    /// 客户端提交的密文（Base64）
    pub encrypted_data: Option<String>,
    /// 算法，字段缺省时为 clustering，显式 null 视为无效算法
    #[serde(default = "default_algorithm")]
    pub algorithm: Option<String>,
}

fn default_algorithm() -> Option<String> {
    Some(MiningAlgorithm::default().as_str().to_string())
}

/// POST /api/encrypt
///
/// 请求体为上传文件的文本内容（JSON 或按行分隔的文本）
pub async fn encrypt_data(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<EncryptResponse>, AppError> {
    let response = state.service.encrypt_text(&body).await?;
    Ok(Json(response))
}

/// POST /api/mine
///
/// 对提交的密文运行挖掘算法，不解密
pub async fn mine_data(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MineRequest>, JsonRejection>,
) -> Result<Json<Report>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::bad_request(e.body_text()))?;

    let encrypted = request
        .encrypted_data
        .ok_or_else(|| AppError::bad_request("No encrypted data"))?;
    let algorithm = request
        .algorithm
        .ok_or_else(|| MiningError::InvalidAlgorithm("null".to_string()))?;

    let report = state.service.mine(&encrypted, &algorithm)?;
    Ok(Json(report))
}

/// GET /api/sessions/{session_id}
///
/// 查询会话摘要（不包含密钥）
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionSummary>, AppError> {
    let summary = state.service.session(&session_id).await?;
    Ok(Json(summary))
}

/// GET /api/health
///
/// 健康检查端点
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.service.health().await))
}
