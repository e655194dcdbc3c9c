//! Mining type definitions
//!
//! Algorithm selectors, generator outputs and the report handed back to
//! clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Privacy label attached to every report
pub const PRIVACY_LEVEL: &str = "High (Holographic Encryption - No Decryption)";

/// Length of a derived centroid hash (hex characters)
pub const CENTROID_HASH_LEN: usize = 16;

/// Mining errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MiningError {
    /// Unrecognized algorithm selector
    #[error("Invalid algorithm: {0}")]
    InvalidAlgorithm(String),
}

/// Supported mining algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MiningAlgorithm {
    /// K-means style clustering
    Clustering,
    /// Association rule mining
    Association,
    /// Classification
    Classification,
    /// Outlier detection
    Outlier,
}

impl MiningAlgorithm {
    /// All selectors, in the order advertised by the health check
    pub const ALL: [MiningAlgorithm; 4] = [
        MiningAlgorithm::Clustering,
        MiningAlgorithm::Association,
        MiningAlgorithm::Classification,
        MiningAlgorithm::Outlier,
    ];

    /// Wire selector
    pub fn as_str(&self) -> &'static str {
        match self {
            MiningAlgorithm::Clustering => "clustering",
            MiningAlgorithm::Association => "association",
            MiningAlgorithm::Classification => "classification",
            MiningAlgorithm::Outlier => "outlier",
        }
    }

    /// Human-readable report title
    pub fn display_name(&self) -> &'static str {
        match self {
            MiningAlgorithm::Clustering => "K-Means Clustering (Privacy-Preserving)",
            MiningAlgorithm::Association => "Association Rule Mining (Secure)",
            MiningAlgorithm::Classification => "Privacy-Preserving Classification",
            MiningAlgorithm::Outlier => "Outlier Detection (Encrypted)",
        }
    }
}

impl Default for MiningAlgorithm {
    fn default() -> Self {
        MiningAlgorithm::Clustering
    }
}

impl fmt::Display for MiningAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MiningAlgorithm {
    type Err = MiningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.as_str() == s)
            .ok_or_else(|| MiningError::InvalidAlgorithm(s.to_string()))
    }
}

/// SHA-256 fingerprint of a ciphertext reference
///
/// The only deterministic input to a report. The reference is never looked
/// up or decrypted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprints a ciphertext reference
    pub fn of(reference: &str) -> Self {
        Self(hex_sha256(reference.as_bytes()))
    }

    /// Hex digest
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derives the centroid hash for a zero-based cluster index
    ///
    /// `sha256("{fingerprint}_{index}")`, truncated to 16 hex characters.
    pub fn centroid_hash(&self, index: usize) -> String {
        let mut hash = hex_sha256(format!("{}_{}", self.0, index).as_bytes());
        hash.truncate(CENTROID_HASH_LEN);
        hash
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn hex_sha256(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

/// One synthetic cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// One-based cluster id
    pub id: usize,
    /// Record count, in `[10, 100)`
    pub size: u32,
    /// Fingerprint-derived centroid hash
    pub centroid_hash: String,
    /// Variance, in `[0.1, 0.5]`
    pub variance: f64,
}

/// One synthetic association rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationRule {
    /// Rule label, e.g. `Pattern A ⇒ Pattern B`
    pub rule: String,
    pub confidence: f64,
    pub support: f64,
    pub lift: f64,
}

/// Synthetic classification summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationSummary {
    /// Class labels
    pub classes: Vec<String>,
    /// Probability simplex over `classes`; sums to one
    pub distribution: Vec<f64>,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
}

/// Synthetic outlier summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierSummary {
    /// Records "analyzed", in `[500, 2000)`
    pub total_records: u32,
    /// `floor(total_records * percentage / 100)`
    pub outliers: u32,
    /// Outlier percentage, in `[1.5, 5.0]`
    pub outlier_percentage: f64,
    pub threshold: f64,
    pub z_score_threshold: f64,
    pub confidence_level: String,
}

/// Typed generator output carried alongside the sentences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReportDetails {
    Clustering { clusters: Vec<Cluster> },
    Association { rules: Vec<AssociationRule> },
    Classification(ClassificationSummary),
    Outlier(OutlierSummary),
}

impl ReportDetails {
    /// Algorithm that produced these details
    pub fn algorithm(&self) -> MiningAlgorithm {
        match self {
            ReportDetails::Clustering { .. } => MiningAlgorithm::Clustering,
            ReportDetails::Association { .. } => MiningAlgorithm::Association,
            ReportDetails::Classification(_) => MiningAlgorithm::Classification,
            ReportDetails::Outlier(_) => MiningAlgorithm::Outlier,
        }
    }

    /// Renders the human-readable pattern sentences
    pub fn patterns(&self) -> Vec<String> {
        match self {
            ReportDetails::Clustering { clusters } => clusters
                .iter()
                .map(|c| {
                    format!(
                        "Cluster {}: {} records (Hash: {}, Variance: {})",
                        c.id,
                        c.size,
                        c.centroid_hash,
                        format_metric(c.variance)
                    )
                })
                .collect(),
            ReportDetails::Association { rules } => rules
                .iter()
                .map(|r| {
                    format!(
                        "{} | Confidence: {}, Support: {}, Lift: {}",
                        r.rule,
                        format_metric(r.confidence),
                        format_metric(r.support),
                        format_metric(r.lift)
                    )
                })
                .collect(),
            ReportDetails::Classification(summary) => {
                let mut patterns: Vec<String> = summary
                    .classes
                    .iter()
                    .zip(&summary.distribution)
                    .map(|(class, share)| format!("{}: {:.1}%", class, share * 100.0))
                    .collect();
                patterns.push(format!("Model Accuracy: {}", format_metric(summary.accuracy)));
                patterns.push(format!(
                    "Precision: {}, Recall: {}",
                    format_metric(summary.precision),
                    format_metric(summary.recall)
                ));
                patterns.push(format!("F1-Score: {}", format_metric(summary.f1_score)));
                patterns
            }
            ReportDetails::Outlier(summary) => vec![
                format!("Total Records Analyzed: {}", summary.total_records),
                format!(
                    "Outliers Detected: {} ({}%)",
                    summary.outliers,
                    format_metric(summary.outlier_percentage)
                ),
                format!("Detection Threshold: {}", format_metric(summary.threshold)),
                format!("Z-Score Threshold: {}", format_metric(summary.z_score_threshold)),
                format!("Confidence Level: {}", summary.confidence_level),
            ],
        }
    }
}

/// Formats an already-rounded metric, keeping a trailing `.0` on integers
pub(crate) fn format_metric(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Mining report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Algorithm display name
    pub algorithm: String,
    /// Ordered pattern sentences (the report payload)
    pub patterns: Vec<String>,
    /// Typed generator output
    pub details: ReportDetails,
    /// Wall-clock generation time
    #[serde(rename = "executionTime")]
    pub execution_time_ms: u64,
    /// Privacy label
    pub privacy_level: String,
    /// Generation time
    pub timestamp: DateTime<Utc>,
}
