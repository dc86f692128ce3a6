pub mod drive_metrics;
pub mod episode_stats;
pub mod results_log;

pub use drive_metrics::DriveMetrics;
pub use episode_stats::{EpisodeStats, EpisodeSummary};
pub use results_log::{ResultsLog, SessionReport};
