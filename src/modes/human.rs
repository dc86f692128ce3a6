use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::collections::VecDeque;
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::input::{InputHandler, KeyAction};
use crate::metrics::DriveMetrics;
use crate::render::{Dashboard, DashboardView};
use crate::sim::{ControlInput, DT, DoneReason, EnvConfig, EpisodeController};

/// Trail points kept for the dashboard
const MAX_TRAIL_LEN: usize = 5000;

pub struct HumanMode {
    controller: EpisodeController,
    metrics: DriveMetrics,
    dashboard: Dashboard,
    input_handler: InputHandler,
    should_quit: bool,
    /// Keys pressed since the last tick
    pending_control: ControlInput,
    trail: VecDeque<(f64, f64)>,
    /// Empty while the run is going
    done_reasons: Vec<DoneReason>,
}

impl HumanMode {
    pub fn new(config: EnvConfig) -> Self {
        let mut controller = EpisodeController::new(config);
        controller.reset();

        Self {
            controller,
            metrics: DriveMetrics::new(),
            dashboard: Dashboard::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            pending_control: ControlInput::neutral(),
            trail: VecDeque::from([(0.0, 0.0)]),
            done_reasons: Vec::new(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_drive_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_drive_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Simulation runs in real time: one tick per DT
        let tick_interval = Duration::from_secs_f64(DT);
        let mut tick_timer = interval(tick_interval);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = tick_timer.tick() => {
                    if self.done_reasons.is_empty() {
                        self.update_sim()?;
                    }
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        if let Some(episode) = self.controller.episode() {
                            let view = DashboardView {
                                track: self.controller.track(),
                                episode,
                                episode_id: self.controller.episode_counter(),
                                trail: &self.trail,
                                metrics: &self.metrics,
                                done_reasons: &self.done_reasons,
                            };
                            self.dashboard.render(frame, &view);
                        }
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Drive(drive_key) => drive_key.apply(&mut self.pending_control),
                KeyAction::Restart => self.reset_run(),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    /// Advance one tick with the keys pressed since the last one
    fn update_sim(&mut self) -> Result<()> {
        let control = std::mem::replace(&mut self.pending_control, ControlInput::neutral());
        let outcome = self.controller.step(control)?;

        self.trail.push_back((outcome.frame.x, outcome.frame.y));
        if self.trail.len() > MAX_TRAIL_LEN {
            self.trail.pop_front();
        }

        if outcome.done {
            let lap_time = outcome
                .done_reasons
                .contains(&DoneReason::FinishLine)
                .then_some(outcome.frame.time_elapsed);
            self.metrics.on_run_over(lap_time);
            self.done_reasons = outcome.done_reasons;
        }

        Ok(())
    }

    fn reset_run(&mut self) {
        let frame = self.controller.reset();
        self.metrics.on_run_start();
        self.pending_control = ControlInput::neutral();
        self.trail.clear();
        self.trail.push_back((frame.x, frame.y));
        self.done_reasons.clear();
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
