//! Episode driver for agents
//!
//! Runs episodes back to back against [`RaceCarEnvironment`], picking actions
//! with a [`Policy`], and reports every finished episode to the log and the
//! results file.
//!
//! # Example
//!
//! ```rust,no_run
//! use race_car_env::modes::{Session, SessionConfig};
//! use race_car_env::rl::{ObservationBackend, WeightedRandomPolicy, default_device};
//!
//! let config = SessionConfig::new(10);
//! let policy = WeightedRandomPolicy::new(config.seed)?;
//! let mut session = Session::<ObservationBackend, _>::new(config, policy, default_device())?;
//! let stats = session.run()?;
//! println!("{}", stats.format_summary());
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context, Result};
use burn::tensor::{Tensor, backend::Backend};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

use crate::metrics::{EpisodeStats, EpisodeSummary, ResultsLog, SessionReport};
use crate::rl::{Policy, RaceCarEnvironment};
use crate::sim::EnvConfig;

/// Configuration for a driving session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Number of episodes to run
    pub num_episodes: usize,

    /// Run every episode as a validation episode
    pub validation: bool,

    /// Per-episode results file, if any
    pub results_path: Option<PathBuf>,

    /// Seed for the policy's random number generator
    pub seed: u64,

    /// Episodes in the rolling score average
    pub window_size: usize,

    pub env_config: EnvConfig,
}

impl SessionConfig {
    pub fn new(num_episodes: usize) -> Self {
        Self {
            num_episodes,
            validation: false,
            results_path: None,
            seed: 0,
            window_size: 100,
            env_config: EnvConfig::default(),
        }
    }
}

/// Runs episodes until the episode limit or a stop request
pub struct Session<B: Backend, P> {
    env: RaceCarEnvironment<B>,
    policy: P,
    stats: EpisodeStats,
    results: Option<ResultsLog>,
    stop: Arc<AtomicBool>,
    config: SessionConfig,
}

impl<B, P> Session<B, P>
where
    B: Backend,
    P: Policy<Tensor<B, 3>>,
{
    pub fn new(config: SessionConfig, policy: P, device: B::Device) -> Result<Self> {
        config
            .env_config
            .validate()
            .map_err(anyhow::Error::msg)
            .context("Invalid environment config")?;

        let mut env = RaceCarEnvironment::new(config.env_config.clone(), device);
        env.set_validation_mode(config.validation);

        let results = config
            .results_path
            .as_deref()
            .map(ResultsLog::create)
            .transpose()?;

        Ok(Self {
            env,
            policy,
            stats: EpisodeStats::new(config.window_size),
            results,
            stop: Arc::new(AtomicBool::new(false)),
            config,
        })
    }

    /// Flag that ends the session once the current episode finishes
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Run the session
    ///
    /// # Returns
    ///
    /// Statistics over every episode that finished
    pub fn run(&mut self) -> Result<&EpisodeStats> {
        if self.config.validation {
            info!("validating model, episodes are not used for learning");
        }

        let mut stopped_early = false;
        for _ in 0..self.config.num_episodes {
            if self.stop.load(Ordering::SeqCst) {
                stopped_early = true;
                warn!(
                    episodes = self.stats.total_episodes(),
                    "stop requested, ending session"
                );
                break;
            }

            let summary = self.run_episode()?;
            let new_best = self.stats.record_episode(&summary);

            let line = self
                .stats
                .format_episode(self.stats.total_episodes(), &summary, new_best);
            info!("{}", line);
            if let Some(results) = self.results.as_mut() {
                results.append_line(&line)?;
            }
        }

        info!("{}", self.stats.format_summary());

        if let Some(results) = self.results.as_ref() {
            let report = SessionReport::new(
                &self.stats,
                self.config.env_config.clone(),
                self.config.validation,
                stopped_early,
            );
            report.save(&results.report_path())?;
        }

        Ok(&self.stats)
    }

    /// Drive one episode from reset until done
    fn run_episode(&mut self) -> Result<EpisodeSummary> {
        let mut observation = self.env.reset();
        let mut score = 0.0;
        let mut steps = 0;

        loop {
            let action = self.policy.select_action(&observation);
            let (next_observation, reward, done) = self
                .env
                .step(action)
                .context("Failed to step environment")?;

            score += reward as f64;
            steps += 1;
            observation = next_observation;

            if done {
                break;
            }
        }

        let checkpoints = self
            .env
            .controller()
            .episode()
            .map_or(0, |episode| episode.checkpoints.passed_count());

        Ok(EpisodeSummary {
            score,
            steps,
            checkpoints,
            done_reasons: self.env.last_done_reasons().to_vec(),
        })
    }

    pub fn stats(&self) -> &EpisodeStats {
        &self.stats
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rl::{FixedPolicy, WeightedRandomPolicy};
    use crate::sim::{DoneReason, VALIDATION_EPISODE};
    use burn::backend::NdArray;
    use burn::backend::ndarray::NdArrayDevice;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    type TestBackend = NdArray<f32>;

    /// Shared in-memory sink for captured log output
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn session<P: Policy<Tensor<TestBackend, 3>>>(
        config: SessionConfig,
        policy: P,
    ) -> Session<TestBackend, P> {
        Session::new(config, policy, NdArrayDevice::default()).unwrap()
    }

    #[test]
    fn test_brake_policy_ends_every_episode_at_once() {
        // Braking from rest reverses on the first tick
        let mut session = session(SessionConfig::new(3), FixedPolicy { action: 2 });
        let stats = session.run().unwrap();

        assert_eq!(stats.total_episodes(), 3);
        assert_eq!(stats.total_steps(), 3);
        assert!(stats.average_score() < -9999.0);
    }

    #[test]
    fn test_results_file_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.txt");

        let mut config = SessionConfig::new(2);
        config.results_path = Some(path.clone());
        let mut session = session(config, FixedPolicy { action: 2 });
        session.run().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("#> episode: 1 | score: -10000."));
        assert!(lines[1].starts_with("#> episode: 2 | "));
        assert!(lines[1].contains("total steps: 2"));
        // A negative rolling average is never a new best
        assert!(lines.iter().all(|l| !l.contains("HighScore")));

        let report = SessionReport::load(&dir.path().join("results.report.json")).unwrap();
        assert_eq!(report.episodes, 2);
        assert!(!report.stopped_early);
    }

    #[test]
    fn test_validation_episode_ids() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("validation.txt");

        let mut config = SessionConfig::new(2);
        config.validation = true;
        config.results_path = Some(path.clone());
        let mut session = session(config, FixedPolicy { action: 2 });

        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            session.run().unwrap();
        });

        // Results lines count the session's episodes; the sentinel id only
        // reaches the controller's frames
        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("#> episode: 1 | "));
        assert!(lines[1].starts_with("#> episode: 2 | "));
        assert_eq!(session.env.controller().episode_counter(), VALIDATION_EPISODE);

        assert!(logs.contents().contains("validating model"));
    }

    #[test]
    fn test_stop_before_first_episode() {
        let mut session = session(SessionConfig::new(5), FixedPolicy { action: 2 });
        session.stop_handle().store(true, Ordering::SeqCst);

        let stats = session.run().unwrap();
        assert_eq!(stats.total_episodes(), 0);
    }

    #[test]
    fn test_idle_policy_hits_time_limit() {
        // Doing nothing never leaves the start line and never reverses
        let mut session = session(SessionConfig::new(1), FixedPolicy { action: 3 });
        session.run().unwrap();

        let controller = session.env.controller();
        let episode = controller.episode().unwrap();
        assert!(episode.time_elapsed > 500.0);
        assert_eq!(session.env.last_done_reasons(), &[DoneReason::TimeLimit]);
    }

    #[test]
    fn test_weighted_policy_session_terminates() {
        let policy = WeightedRandomPolicy::new(3).unwrap();
        let mut session = session(SessionConfig::new(2), policy);
        let stats = session.run().unwrap();
        assert_eq!(stats.total_episodes(), 2);
        assert!(stats.total_steps() >= 2);
    }

    #[test]
    fn test_invalid_env_config_rejected() {
        let mut config = SessionConfig::new(1);
        config.env_config.time_limit = 0.0;
        let result = Session::<TestBackend, _>::new(
            config,
            FixedPolicy { action: 1 },
            NdArrayDevice::default(),
        );
        assert!(result.is_err());
    }
}
