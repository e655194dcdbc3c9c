//! Synthetic report generators
//!
//! Each generator draws its metrics from the supplied RNG. Only the cluster
//! centroid hashes depend on the ciphertext, through its fingerprint.

use rand::Rng;
use rand_distr::Dirichlet;

use super::types::{
    AssociationRule, ClassificationSummary, Cluster, Fingerprint, OutlierSummary,
};

/// Default cluster count
pub const DEFAULT_CLUSTERS: usize = 3;

/// Number of association rules per report
pub const RULE_COUNT: usize = 4;

/// Class labels reported by the classifier
pub const CLASS_LABELS: [&str; 4] = ["Class Alpha", "Class Beta", "Class Gamma", "Class Delta"];

/// Dirichlet concentration for every class
const CLASS_ALPHA: [f64; CLASS_LABELS.len()] = [1.0; CLASS_LABELS.len()];

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// K-means style clustering over `k` clusters
pub fn kmeans_clustering<R>(fingerprint: &Fingerprint, k: usize, rng: &mut R) -> Vec<Cluster>
where
    R: Rng + ?Sized,
{
    (0..k)
        .map(|index| Cluster {
            id: index + 1,
            size: rng.gen_range(10..100),
            centroid_hash: fingerprint.centroid_hash(index),
            variance: round_to(rng.gen_range(0.1..=0.5), 3),
        })
        .collect()
}

/// Four association rules, `Pattern A ⇒ Pattern B` through `G ⇒ H`
pub fn association_rules<R>(rng: &mut R) -> Vec<AssociationRule>
where
    R: Rng + ?Sized,
{
    (0..RULE_COUNT as u8)
        .map(|i| AssociationRule {
            rule: format!(
                "Pattern {} ⇒ Pattern {}",
                char::from(b'A' + i * 2),
                char::from(b'B' + i * 2)
            ),
            confidence: round_to(rng.gen_range(0.75..=0.95), 3),
            support: round_to(rng.gen_range(0.30..=0.60), 3),
            lift: round_to(rng.gen_range(1.2..=2.5), 3),
        })
        .collect()
}

/// Class distribution plus model quality metrics
///
/// The distribution is a Dirichlet(1, 1, 1, 1) draw, left unrounded so it
/// sums to one.
pub fn classification<R>(rng: &mut R) -> ClassificationSummary
where
    R: Rng + ?Sized,
{
    let distribution = match Dirichlet::new(&CLASS_ALPHA) {
        Ok(dirichlet) => rng.sample(dirichlet),
        Err(_) => vec![1.0 / CLASS_ALPHA.len() as f64; CLASS_ALPHA.len()],
    };

    ClassificationSummary {
        classes: CLASS_LABELS.iter().map(|label| label.to_string()).collect(),
        distribution,
        accuracy: round_to(rng.gen_range(0.82..=0.96), 3),
        precision: round_to(rng.gen_range(0.80..=0.95), 3),
        recall: round_to(rng.gen_range(0.78..=0.93), 3),
        f1_score: round_to(rng.gen_range(0.81..=0.94), 3),
    }
}

/// Outlier detection summary
pub fn outlier_detection<R>(rng: &mut R) -> OutlierSummary
where
    R: Rng + ?Sized,
{
    let total_records: u32 = rng.gen_range(500..2000);
    let percentage: f64 = rng.gen_range(1.5..=5.0);
    let outliers = (f64::from(total_records) * percentage / 100.0) as u32;

    OutlierSummary {
        total_records,
        outliers,
        outlier_percentage: round_to(percentage, 2),
        threshold: round_to(rng.gen_range(0.90..=0.98), 3),
        z_score_threshold: round_to(rng.gen_range(2.5..=3.5), 2),
        confidence_level: "95%".to_string(),
    }
}
