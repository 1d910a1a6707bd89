//! Replay backend implementation.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, instrument};
use uuid::Uuid;

use skoll_hal::{
    Backend, BackendAvailability, BackendConfig, BackendFactory, Capabilities, Counts,
    ExecutionResult, HalError, HalResult, Job, JobId, JobStatus, ValidationResult,
};
use skoll_ir::Circuit;

/// Where a replay backend gets its outcomes from.
enum ReplaySource {
    /// Serve the configured counts verbatim, ignoring the shot count.
    Exact(Counts),
    /// Sample the requested number of shots from a weighted distribution
    /// with a fixed seed. Identical submissions produce identical counts.
    Weighted {
        outcomes: Vec<(String, f64)>,
        seed: u64,
    },
}

/// Job data for the replay backend.
struct ReplayJob {
    job: Job,
    result: Option<ExecutionResult>,
}

/// A backend that serves pre-configured measurement outcomes.
///
/// The replay backend stands in for a real device in tests and demos: it
/// submits, tracks, and completes jobs through the normal [`Backend`]
/// lifecycle, but the measurement counts come from a configured
/// distribution rather than an actual execution. Sampling is seeded, so
/// a given configuration always replays the same counts.
pub struct ReplayBackend {
    /// Backend configuration.
    config: BackendConfig,
    /// Cached capabilities.
    capabilities: Capabilities,
    /// Active jobs.
    jobs: Arc<Mutex<FxHashMap<String, ReplayJob>>>,
    /// Configured outcome source.
    source: ReplaySource,
}

impl ReplayBackend {
    /// Create a replay backend that returns `counts` verbatim for every job.
    pub fn exact(counts: Counts, num_qubits: u32) -> Self {
        Self {
            config: BackendConfig::new("replay"),
            capabilities: Capabilities::replay(num_qubits),
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            source: ReplaySource::Exact(counts),
        }
    }

    /// Create a replay backend that samples shots from a weighted
    /// distribution. Weights need not be normalized.
    pub fn weighted(
        outcomes: impl IntoIterator<Item = (String, f64)>,
        num_qubits: u32,
        seed: u64,
    ) -> Self {
        Self {
            config: BackendConfig::new("replay"),
            capabilities: Capabilities::replay(num_qubits),
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            source: ReplaySource::Weighted {
                outcomes: outcomes.into_iter().collect(),
                seed,
            },
        }
    }

    /// Replay backend preloaded with the noiseless distribution of a
    /// period-2 phase estimation over `counting_bits` counting qubits:
    /// half the shots read phase 0, half read phase 1/2.
    ///
    /// `num_qubits` bounds the circuits the backend accepts, so it must
    /// cover the counting register plus whatever work register rides along.
    pub fn ideal_period_two(counting_bits: u32, num_qubits: u32, seed: u64) -> Self {
        let zero = "0".repeat(counting_bits as usize);
        let mut half = String::from("1");
        half.push_str(&"0".repeat(counting_bits.saturating_sub(1) as usize));
        Self::weighted([(zero, 0.5), (half, 0.5)], num_qubits, seed)
    }

    /// Check that the configured source can actually produce outcomes.
    ///
    /// A weighted distribution with no outcome of positive weight has
    /// nothing to sample from; sampling it would fail mid-job.
    fn check_source(&self) -> HalResult<()> {
        if let ReplaySource::Weighted { outcomes, .. } = &self.source {
            if !outcomes.iter().any(|(_, w)| *w > 0.0) {
                return Err(HalError::Configuration(
                    "weighted replay needs at least one outcome with positive weight".into(),
                ));
            }
        }
        Ok(())
    }

    /// Produce the counts for one job.
    #[instrument(skip(self))]
    fn run_replay(&self, shots: u32) -> ExecutionResult {
        let start = Instant::now();

        let counts = match &self.source {
            ReplaySource::Exact(counts) => {
                debug!("Replaying {} configured outcomes", counts.len());
                counts.clone()
            }
            ReplaySource::Weighted { outcomes, seed } => {
                let total_weight: f64 = outcomes.iter().map(|(_, w)| w).sum();
                let mut rng = StdRng::seed_from_u64(*seed);
                let mut counts = Counts::new();
                // Pre-register outcomes so insertion order follows the
                // configuration, not the sampling order.
                for (bitstring, _) in outcomes {
                    counts.insert(bitstring.clone(), 0);
                }
                for _ in 0..shots {
                    let mut pick = rng.gen_range(0.0..total_weight);
                    for (bitstring, weight) in outcomes {
                        if pick < *weight {
                            counts.insert(bitstring.clone(), 1);
                            break;
                        }
                        pick -= weight;
                    }
                }
                counts
            }
        };

        let elapsed = start.elapsed();
        debug!("Replay completed in {:?}", elapsed);

        ExecutionResult::new(counts, shots).with_execution_time(elapsed.as_millis() as u64)
    }
}

#[async_trait]
impl Backend for ReplayBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        let mut reasons = Vec::new();

        if circuit.num_qubits() > self.capabilities.num_qubits as usize {
            reasons.push(format!(
                "circuit has {} qubits but backend supports {}",
                circuit.num_qubits(),
                self.capabilities.num_qubits
            ));
        }

        for inst in circuit.instructions() {
            if inst.is_gate() && !self.capabilities.gate_set.contains(inst.name()) {
                reasons.push(format!("unsupported gate: {}", inst.name()));
            }
        }

        if reasons.is_empty() {
            Ok(ValidationResult::Valid)
        } else {
            Ok(ValidationResult::Invalid { reasons })
        }
    }

    #[instrument(skip(self, circuit))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        self.check_source()?;

        if shots == 0 || shots > self.capabilities.max_shots {
            return Err(HalError::InvalidShots(format!(
                "requested {} shots, backend accepts 1..={}",
                shots, self.capabilities.max_shots
            )));
        }

        if circuit.num_qubits() > self.capabilities.num_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "circuit has {} qubits but backend supports {}",
                circuit.num_qubits(),
                self.capabilities.num_qubits
            )));
        }

        let job_id = JobId::new(Uuid::new_v4().to_string());
        let job = Job::new(job_id.clone(), shots).with_backend(self.config.name.clone());

        {
            let mut jobs = self
                .jobs
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            jobs.insert(job_id.0.clone(), ReplayJob { job, result: None });
        }

        debug!("Submitted job: {}", job_id);

        // Replay completes inline; the async lifecycle is kept so callers
        // exercise the same code path as against a remote service.
        let result = self.run_replay(shots);

        {
            let mut jobs = self
                .jobs
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            if let Some(replay_job) = jobs.get_mut(&job_id.0) {
                replay_job.result = Some(result);
                replay_job.job = replay_job.job.clone().with_status(JobStatus::Completed);
            }
        }

        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        let jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        jobs.get(&job_id.0)
            .map(|j| j.job.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        jobs.get(&job_id.0)
            .and_then(|j| j.result.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        let mut jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(replay_job) = jobs.get_mut(&job_id.0) {
            replay_job.job = replay_job.job.clone().with_status(JobStatus::Cancelled);
            Ok(())
        } else {
            Err(HalError::JobNotFound(job_id.0.clone()))
        }
    }
}

impl BackendFactory for ReplayBackend {
    /// Build a replay backend from configuration.
    ///
    /// Recognized `extra` keys: `max_qubits` (default 24), `seed`
    /// (default 0), and `outcomes`, a map of bitstring to weight. The map
    /// must hold at least one outcome with positive weight. With no
    /// `outcomes` key the backend replays an empty outcome set.
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let max_qubits = config
            .extra
            .get("max_qubits")
            .and_then(serde_json::value::Value::as_u64)
            .map_or(24, |v| v as u32);

        let seed = config
            .extra
            .get("seed")
            .and_then(serde_json::value::Value::as_u64)
            .unwrap_or(0);

        let source = match config.extra.get("outcomes") {
            Some(value) => {
                let map: std::collections::BTreeMap<String, f64> =
                    serde_json::from_value(value.clone())?;
                ReplaySource::Weighted {
                    outcomes: map.into_iter().collect(),
                    seed,
                }
            }
            None => ReplaySource::Exact(Counts::new()),
        };

        let backend = Self {
            config,
            capabilities: Capabilities::replay(max_qubits),
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            source,
        };
        backend.check_source()?;
        Ok(backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period_two_counts() -> Counts {
        let mut counts = Counts::new();
        counts.insert("0000", 2048);
        counts.insert("1000", 2048);
        counts
    }

    #[tokio::test]
    async fn test_replay_capabilities() {
        let backend = ReplayBackend::exact(period_two_counts(), 11);
        let caps = backend.capabilities();

        assert!(caps.is_simulator);
        assert_eq!(caps.num_qubits, 11);
    }

    #[tokio::test]
    async fn test_exact_replay_lifecycle() {
        let backend = ReplayBackend::exact(period_two_counts(), 11);

        let circuit = Circuit::with_size("pe", 11, 4);
        let job_id = backend.submit(&circuit, 4096).await.unwrap();

        let status = backend.status(&job_id).await.unwrap();
        assert!(status.is_success());

        let result = backend.result(&job_id).await.unwrap();
        assert_eq!(result.shots, 4096);
        assert_eq!(result.counts.get("0000"), 2048);
        assert_eq!(result.counts.get("1000"), 2048);
    }

    #[tokio::test]
    async fn test_weighted_sampling_is_deterministic() {
        let circuit = Circuit::with_size("pe", 4, 4);

        let first = ReplayBackend::ideal_period_two(4, 11, 7);
        let id = first.submit(&circuit, 1000).await.unwrap();
        let a = first.wait(&id).await.unwrap();

        let second = ReplayBackend::ideal_period_two(4, 11, 7);
        let id = second.submit(&circuit, 1000).await.unwrap();
        let b = second.wait(&id).await.unwrap();

        assert_eq!(a.counts, b.counts);
    }

    #[tokio::test]
    async fn test_weighted_sampling_totals_match_shots() {
        let backend = ReplayBackend::ideal_period_two(4, 11, 42);
        let circuit = Circuit::with_size("pe", 4, 4);

        let job_id = backend.submit(&circuit, 512).await.unwrap();
        let result = backend.result(&job_id).await.unwrap();

        assert_eq!(result.counts.total(), 512);
        // Only the two configured bitstrings ever appear.
        assert_eq!(
            result.counts.get("0000") + result.counts.get("1000"),
            512
        );
    }

    #[tokio::test]
    async fn test_configured_order_is_preserved() {
        let backend =
            ReplayBackend::weighted([("11".to_string(), 0.1), ("00".to_string(), 0.9)], 2, 1);
        let circuit = Circuit::with_size("c", 2, 2);

        let job_id = backend.submit(&circuit, 100).await.unwrap();
        let result = backend.result(&job_id).await.unwrap();

        let order: Vec<_> = result.counts.iter().map(|(b, _)| b.to_string()).collect();
        assert_eq!(order, vec!["11", "00"]);
    }

    #[tokio::test]
    async fn test_too_many_qubits_rejected() {
        let backend = ReplayBackend::exact(Counts::new(), 5);
        let circuit = Circuit::with_size("big", 10, 0);

        let result = backend.submit(&circuit, 100).await;
        assert!(matches!(result, Err(HalError::CircuitTooLarge(_))));

        let validation = backend.validate(&circuit).await.unwrap();
        assert!(!validation.is_valid());
    }

    #[tokio::test]
    async fn test_zero_shots_rejected() {
        let backend = ReplayBackend::exact(Counts::new(), 5);
        let circuit = Circuit::with_size("c", 2, 0);

        let result = backend.submit(&circuit, 0).await;
        assert!(matches!(result, Err(HalError::InvalidShots(_))));
    }

    #[tokio::test]
    async fn test_unknown_job_rejected() {
        let backend = ReplayBackend::exact(Counts::new(), 5);
        let missing = JobId::new("no-such-job");

        assert!(matches!(
            backend.status(&missing).await,
            Err(HalError::JobNotFound(_))
        ));
        assert!(matches!(
            backend.cancel(&missing).await,
            Err(HalError::JobNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_weighted_outcomes_rejected() {
        // An empty distribution has nothing to sample from; submission
        // must fail cleanly instead of panicking mid-job.
        let backend = ReplayBackend::weighted([], 4, 1);
        let circuit = Circuit::with_size("c", 2, 2);

        let result = backend.submit(&circuit, 10).await;
        assert!(matches!(result, Err(HalError::Configuration(_))));

        // The same degenerate distribution via the config surface is
        // refused at construction.
        let config = BackendConfig::new("replay").with_extra("outcomes", serde_json::json!({}));
        assert!(matches!(
            ReplayBackend::from_config(config),
            Err(HalError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_zero_weight_outcomes_rejected() {
        let backend =
            ReplayBackend::weighted([("00".to_string(), 0.0), ("11".to_string(), 0.0)], 2, 1);
        let circuit = Circuit::with_size("c", 2, 2);

        let result = backend.submit(&circuit, 10).await;
        assert!(matches!(result, Err(HalError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_from_config() {
        let config = BackendConfig::new("replay")
            .with_extra("max_qubits", serde_json::json!(8))
            .with_extra("seed", serde_json::json!(3))
            .with_extra("outcomes", serde_json::json!({"00": 0.5, "11": 0.5}));

        let backend = ReplayBackend::from_config(config).unwrap();
        assert_eq!(backend.capabilities().num_qubits, 8);

        let circuit = Circuit::with_size("c", 2, 2);
        let job_id = backend.submit(&circuit, 64).await.unwrap();
        let result = backend.result(&job_id).await.unwrap();
        assert_eq!(result.counts.total(), 64);
    }
}
