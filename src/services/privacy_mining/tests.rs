//! 隐私挖掘服务测试

use super::*;
use crate::dataset::DatasetError;
use crate::mining::{MiningError, ReportDetails};
use crate::session::SessionError;
use crate::transform::BLOCK_SIZE;
use base64::Engine;
use serde_json::json;
use std::collections::HashSet;

fn decode_b64(text: &str) -> Vec<u8> {
    base64::engine::general_purpose::STANDARD.decode(text).unwrap()
}

#[tokio::test]
async fn test_encrypt_single_record() {
    let service = PrivacyMiningService::in_memory();
    let dataset = Dataset::from(json!([{"id": 0, "content": "a"}]));

    let response = service.encrypt(&dataset).await.unwrap();

    assert_eq!(response.record_count, 1);
    assert_eq!(response.algorithm, "Holographic-AES-256-CBC");
    assert_eq!(response.key_size, 256);
    assert_eq!(response.session_id.len(), 32);
    assert_eq!(decode_b64(&response.encrypted).len() % BLOCK_SIZE, 0);

    let record = service.store().get(&response.session_id).await.unwrap();
    assert_eq!(record.record_count, 1);
    assert_eq!(record.bundle.ciphertext_b64(), response.encrypted);
}

#[tokio::test]
async fn test_encrypt_then_mine_outlier() {
    let service = PrivacyMiningService::in_memory();
    let response = service
        .encrypt(&Dataset::from(json!([{"id": 0, "content": "a"}])))
        .await
        .unwrap();

    let report = service.mine(&response.encrypted, "outlier").unwrap();

    assert_eq!(report.algorithm, "Outlier Detection (Encrypted)");
    match report.details {
        ReportDetails::Outlier(summary) => {
            assert!((500..2000).contains(&summary.total_records));
            assert!(summary.outliers <= summary.total_records);
        }
        other => panic!("expected outlier details, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_dataset_is_rejected_without_storing() {
    let service = PrivacyMiningService::in_memory();

    for content in ["[]", "{}", "", "\n  \n\n"] {
        let err = service.encrypt_text(content).await.unwrap_err();
        assert!(
            matches!(err, AppError::Dataset(DatasetError::Empty)),
            "unexpected error for {:?}: {:?}",
            content,
            err
        );
    }

    assert!(service.store().is_empty().await);
}

#[tokio::test]
async fn test_falsy_json_upload_is_rejected() {
    let service = PrivacyMiningService::in_memory();

    for content in ["null", "false", "0", "\"\""] {
        let err = service.encrypt_text(content).await.unwrap_err();
        assert_eq!(err.code(), "EMPTY_DATASET", "input {:?}", content);
    }

    assert_eq!(service.store().len().await, 0);
}

#[tokio::test]
async fn test_encrypt_text_line_fallback() {
    let service = PrivacyMiningService::in_memory();
    let response = service
        .encrypt_text("alpha,1\nbeta,2\n\ngamma,3\n")
        .await
        .unwrap();

    assert_eq!(response.record_count, 3);
}

#[tokio::test]
async fn test_same_dataset_gives_different_ciphertext() {
    let service = PrivacyMiningService::in_memory();
    let dataset = Dataset::from(json!([{"id": 0, "content": "a"}]));

    let first = service.encrypt(&dataset).await.unwrap();
    let second = service.encrypt(&dataset).await.unwrap();

    assert_ne!(first.session_id, second.session_id);
    assert_ne!(first.encrypted, second.encrypted);

    let a = service.store().get(&first.session_id).await.unwrap();
    let b = service.store().get(&second.session_id).await.unwrap();
    assert_ne!(a.bundle.key, b.bundle.key);
    assert_ne!(a.bundle.iv, b.bundle.iv);
    assert_eq!(
        a.bundle.decrypt_hologram().unwrap().len(),
        b.bundle.decrypt_hologram().unwrap().len()
    );
}

#[tokio::test]
async fn test_session_ids_unique_across_10000_encryptions() {
    let service = PrivacyMiningService::in_memory();
    let dataset = Dataset::from(json!([{"id": 0, "content": "a"}]));

    let mut ids = HashSet::new();
    for _ in 0..10_000 {
        let response = service.encrypt(&dataset).await.unwrap();
        assert!(ids.insert(response.session_id));
    }

    assert_eq!(service.store().len().await, 10_000);
}

#[tokio::test]
async fn test_session_summary() {
    let service = PrivacyMiningService::in_memory();
    let response = service
        .encrypt(&Dataset::from(json!({"a": 1, "b": 2})))
        .await
        .unwrap();

    let summary = service.session(&response.session_id).await.unwrap();
    assert_eq!(summary.session_id, response.session_id);
    assert_eq!(summary.encrypted, response.encrypted);
    assert_eq!(summary.record_count, 2);
    assert_eq!(summary.key_size, 256);

    // 摘要不能泄露密钥
    let json = serde_json::to_value(&summary).unwrap();
    assert!(json.get("key").is_none());
    assert!(json.get("iv").is_none());
}

#[tokio::test]
async fn test_session_not_found() {
    let service = PrivacyMiningService::in_memory();
    let err = service.session("missing").await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Session(SessionError::NotFound(ref id)) if id == "missing"
    ));
}

#[test]
fn test_mine_invalid_algorithm() {
    let service = PrivacyMiningService::in_memory();
    let err = service.mine("anything", "unknown").unwrap_err();
    assert!(matches!(
        err,
        AppError::Mining(MiningError::InvalidAlgorithm(ref s)) if s == "unknown"
    ));
}

#[test]
fn test_mine_without_stored_session() {
    let service = PrivacyMiningService::in_memory();
    for algorithm in MiningAlgorithm::ALL {
        let report = service.mine("never-encrypted", algorithm.as_str()).unwrap();
        assert_eq!(report.algorithm, algorithm.display_name());
        assert!(!report.patterns.is_empty());
    }
}

#[test]
fn test_seeded_service_is_reproducible() {
    let a = PrivacyMiningService::new(
        Arc::new(InMemorySessionStore::new()),
        MiningDispatcher::seeded(99),
    );
    let b = PrivacyMiningService::new(
        Arc::new(InMemorySessionStore::new()),
        MiningDispatcher::seeded(99),
    );

    let ra = a.mine("reference", "classification").unwrap();
    let rb = b.mine("reference", "classification").unwrap();
    assert_eq!(ra.patterns, rb.patterns);
}

#[tokio::test]
async fn test_health() {
    let service = PrivacyMiningService::in_memory();
    service.encrypt_text("one line").await.unwrap();

    let health = service.health().await;
    assert_eq!(health.status, "running");
    assert_eq!(health.encryption, "holographic-enabled");
    assert_eq!(health.active_sessions, 1);

    let json = serde_json::to_value(&health).unwrap();
    assert_eq!(
        json["algorithms"],
        json!(["clustering", "association", "classification", "outlier"])
    );
    assert_eq!(json["activeSessions"], 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_encryptions() {
    let service = Arc::new(PrivacyMiningService::in_memory());

    let tasks: Vec<_> = (0..32)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .encrypt(&Dataset::from(json!([{"id": i, "content": "x"}])))
                    .await
                    .unwrap()
                    .session_id
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for task in tasks {
        ids.insert(task.await.unwrap());
    }

    assert_eq!(ids.len(), 32);
    assert_eq!(service.store().len().await, 32);
}
