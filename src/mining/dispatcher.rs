//! Mining dispatcher
//!
//! Routes an algorithm selector to its generator and wraps the result in a
//! [`Report`]. The ciphertext reference is only fingerprinted.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::Mutex;
use std::time::Instant;

use super::generators::{
    association_rules, classification, kmeans_clustering, outlier_detection, DEFAULT_CLUSTERS,
};
use super::types::{Fingerprint, MiningAlgorithm, MiningError, Report, ReportDetails, PRIVACY_LEVEL};

enum RngSource {
    /// Fresh thread-local randomness per call
    Entropy,
    /// Reproducible stream shared across calls
    Seeded(Mutex<StdRng>),
}

/// Mining dispatcher
pub struct MiningDispatcher {
    rng: RngSource,
    clusters: usize,
}

impl MiningDispatcher {
    /// Unseeded dispatcher; numeric values differ on every call
    pub fn new() -> Self {
        Self {
            rng: RngSource::Entropy,
            clusters: DEFAULT_CLUSTERS,
        }
    }

    /// Dispatcher drawing from a seeded generator
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: RngSource::Seeded(Mutex::new(StdRng::seed_from_u64(seed))),
            clusters: DEFAULT_CLUSTERS,
        }
    }

    /// Seeded when `seed` is set, unseeded otherwise
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::seeded)
    }

    /// Whether reports are reproducible
    pub fn is_seeded(&self) -> bool {
        matches!(self.rng, RngSource::Seeded(_))
    }

    /// Runs `algorithm` against a ciphertext reference
    pub fn run(&self, reference: &str, algorithm: MiningAlgorithm) -> Report {
        let started = Instant::now();
        let fingerprint = Fingerprint::of(reference);

        let details = self.with_rng(|rng| match algorithm {
            MiningAlgorithm::Clustering => ReportDetails::Clustering {
                clusters: kmeans_clustering(&fingerprint, self.clusters, rng),
            },
            MiningAlgorithm::Association => ReportDetails::Association {
                rules: association_rules(rng),
            },
            MiningAlgorithm::Classification => ReportDetails::Classification(classification(rng)),
            MiningAlgorithm::Outlier => ReportDetails::Outlier(outlier_detection(rng)),
        });

        let patterns = details.patterns();

        Report {
            algorithm: algorithm.display_name().to_string(),
            patterns,
            details,
            execution_time_ms: started.elapsed().as_millis() as u64,
            privacy_level: PRIVACY_LEVEL.to_string(),
            timestamp: Utc::now(),
        }
    }

    /// Parses `selector` and runs it
    ///
    /// # Errors
    /// [`MiningError::InvalidAlgorithm`] for unknown selectors.
    pub fn run_named(&self, reference: &str, selector: &str) -> Result<Report, MiningError> {
        let algorithm = selector.parse()?;
        Ok(self.run(reference, algorithm))
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut dyn RngCore) -> T) -> T {
        match &self.rng {
            RngSource::Entropy => f(&mut rand::thread_rng()),
            RngSource::Seeded(rng) => {
                let mut guard = rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                f(&mut *guard)
            }
        }
    }
}

impl Default for MiningDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
