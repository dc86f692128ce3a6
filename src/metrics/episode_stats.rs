//! Episode statistics for driving sessions
//!
//! Keeps a rolling window of episode scores and reports the moving average
//! together with the best average seen so far. The window holds the latest
//! episode plus the `window_size` episodes before it. The best average starts
//! at 0.0, so a session that never scores above zero never reports a new
//! best.

use std::collections::VecDeque;

use crate::sim::DoneReason;

/// Summary of one finished episode
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeSummary {
    /// Sum of all rewards
    pub score: f64,
    pub steps: usize,
    pub checkpoints: usize,
    pub done_reasons: Vec<DoneReason>,
}

impl EpisodeSummary {
    pub fn finished_lap(&self) -> bool {
        self.done_reasons.contains(&DoneReason::FinishLine)
    }
}

/// Rolling episode statistics
///
/// # Example
///
/// ```rust
/// use race_car_env::metrics::{EpisodeStats, EpisodeSummary};
///
/// let mut stats = EpisodeStats::new(100);
/// let new_best = stats.record_episode(&EpisodeSummary {
///     score: 120.0,
///     steps: 40,
///     checkpoints: 1,
///     done_reasons: vec![],
/// });
///
/// assert!(new_best);
/// assert_eq!(stats.total_steps(), 40);
/// ```
#[derive(Debug, Clone)]
pub struct EpisodeStats {
    /// Episode scores (rolling window)
    scores: VecDeque<f64>,

    /// Best rolling average seen so far, floored at 0.0
    best_average: f64,

    total_episodes: usize,
    total_steps: usize,
    laps_completed: usize,

    /// Window size for rolling averages
    window_size: usize,
}

impl EpisodeStats {
    pub fn new(window_size: usize) -> Self {
        Self {
            scores: VecDeque::with_capacity(window_size + 1),
            best_average: 0.0,
            total_episodes: 0,
            total_steps: 0,
            laps_completed: 0,
            window_size,
        }
    }

    /// Record a finished episode.
    ///
    /// # Returns
    ///
    /// `true` if the rolling average is at least 0.0 and at least as high as
    /// every previous one
    pub fn record_episode(&mut self, summary: &EpisodeSummary) -> bool {
        if self.scores.len() > self.window_size {
            self.scores.pop_front();
        }
        self.scores.push_back(summary.score);
        self.total_episodes += 1;
        self.total_steps += summary.steps;
        if summary.finished_lap() {
            self.laps_completed += 1;
        }

        let average = self.average_score();
        let is_best = average >= self.best_average;
        if is_best {
            self.best_average = average;
        }
        is_best
    }

    /// Mean score over the rolling window, or 0.0 before any episode
    pub fn average_score(&self) -> f64 {
        if self.scores.is_empty() {
            0.0
        } else {
            self.scores.iter().sum::<f64>() / self.scores.len() as f64
        }
    }

    pub fn best_average(&self) -> f64 {
        self.best_average
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn laps_completed(&self) -> usize {
        self.laps_completed
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// One results line for an episode, e.g.
    /// `#> episode: 3 | score: 12.50 | total steps: 120 | average 100 score: 8.20`
    ///
    /// `episode` is the session's own 1-based count, also in validation mode.
    pub fn format_episode(
        &self,
        episode: usize,
        summary: &EpisodeSummary,
        new_best: bool,
    ) -> String {
        let mut line = format!(
            "#> episode: {} | score: {:.2} | total steps: {} | average {} score: {:.2}",
            episode,
            summary.score,
            self.total_steps,
            self.window_size,
            self.average_score(),
        );
        if new_best {
            line.push_str(" => New HighScore! <= ");
        }
        line
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Episodes: {} | Steps: {} | Laps: {} | Average score: {:.2} | Best average: {:.2}",
            self.total_episodes,
            self.total_steps,
            self.laps_completed,
            self.average_score(),
            self.best_average,
        )
    }
}
