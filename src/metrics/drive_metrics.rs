use std::time::{Duration, Instant};

/// Wall-clock and lap bookkeeping for manual driving
pub struct DriveMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub runs: u32,
    pub laps_completed: u32,
    /// Fastest completed lap, in simulated seconds
    pub best_lap: Option<f64>,
}

impl DriveMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            runs: 0,
            laps_completed: 0,
            best_lap: None,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_run_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    /// Record the end of a run; `lap_time` is set when the finish line was crossed
    pub fn on_run_over(&mut self, lap_time: Option<f64>) {
        self.runs += 1;
        if let Some(time) = lap_time {
            self.laps_completed += 1;
            if self.best_lap.is_none_or(|best| time < best) {
                self.best_lap = Some(time);
            }
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }

    pub fn format_best_lap(&self) -> String {
        match self.best_lap {
            Some(time) => format!("{:.1} s", time),
            None => String::from("--"),
        }
    }
}

impl Default for DriveMetrics {
    fn default() -> Self {
        Self::new()
    }
}
