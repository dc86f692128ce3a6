use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Paragraph,
        canvas::{Canvas, Context, Line as CanvasLine, Points},
    },
};
use std::collections::VecDeque;

use crate::metrics::DriveMetrics;
use crate::sim::{DoneReason, EpisodeState, Track, VALIDATION_EPISODE};

/// Drawn length of the car marker; the real 2 m car is too small to see
const CAR_MARKER_LENGTH: f64 = 4.0;

/// Everything the dashboard shows for one frame
pub struct DashboardView<'a> {
    pub track: &'a Track,
    pub episode: &'a EpisodeState,
    pub episode_id: i64,
    /// Positions visited this run, oldest first
    pub trail: &'a VecDeque<(f64, f64)>,
    pub metrics: &'a DriveMetrics,
    /// Empty while the run is still going
    pub done_reasons: &'a [DoneReason],
}

/// Terminal view of the track, the car and its path
pub struct Dashboard;

impl Dashboard {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, view: &DashboardView) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Track
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(chunks[0], view);
        frame.render_widget(stats, chunks[0]);

        let track_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(15),
                Constraint::Percentage(70),
                Constraint::Percentage(15),
            ])
            .split(chunks[1])[1];

        if view.done_reasons.is_empty() {
            frame.render_widget(self.render_track(view), track_area);
        } else {
            let game_over = self.render_run_over(track_area, view);
            frame.render_widget(game_over, track_area);
        }

        let controls = self.render_controls(chunks[2]);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_track<'a>(
        &self,
        view: &'a DashboardView<'a>,
    ) -> Canvas<'a, impl Fn(&mut Context<'_>) + 'a> {
        let track = view.track;
        let hf = track.half_thickness;
        Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Race Track "),
            )
            .marker(Marker::Braille)
            .x_bounds([-55.0, 15.0])
            .y_bounds([-30.0, 80.0])
            .paint(move |ctx| {
                // Lane edges
                for straight in [track.first_straight, track.second_straight] {
                    for x in [straight.center_x - hf, straight.center_x + hf] {
                        ctx.draw(&CanvasLine {
                            x1: x,
                            y1: straight.y_min,
                            x2: x,
                            y2: straight.y_max,
                            color: Color::Gray,
                        });
                    }
                }
                for curve in [track.first_curve, track.second_curve] {
                    for radius in [curve.radius - hf, curve.radius + hf] {
                        let points = curve.arc_points(radius, 48);
                        for pair in points.windows(2) {
                            ctx.draw(&CanvasLine {
                                x1: pair[0].0,
                                y1: pair[0].1,
                                x2: pair[1].0,
                                y2: pair[1].1,
                                color: Color::Gray,
                            });
                        }
                    }
                }

                // Checkpoint gates and finish line
                let passed = view.episode.checkpoints.checkpoint_passed;
                let gates = [
                    (track.first_straight, track.first_straight.y_max, passed[0]),
                    (track.second_straight, track.second_straight.y_max, passed[1]),
                    (track.second_straight, track.second_straight.y_min, passed[2]),
                ];
                for (lane, y, done) in gates {
                    ctx.draw(&CanvasLine {
                        x1: lane.center_x - hf,
                        y1: y,
                        x2: lane.center_x + hf,
                        y2: y,
                        color: if done { Color::Green } else { Color::Yellow },
                    });
                }
                let start = track.first_straight;
                ctx.draw(&CanvasLine {
                    x1: start.center_x - hf,
                    y1: start.y_min,
                    x2: start.center_x + hf,
                    y2: start.y_min,
                    color: Color::White,
                });

                let (older, newer) = view.trail.as_slices();
                for coords in [older, newer] {
                    ctx.draw(&Points {
                        coords,
                        color: Color::Red,
                    });
                }

                // Car as a short line from its center along the heading
                let vehicle = &view.episode.vehicle;
                let (sin, cos) = vehicle.heading.sin_cos();
                ctx.draw(&CanvasLine {
                    x1: vehicle.position.x,
                    y1: vehicle.position.y,
                    x2: vehicle.position.x - CAR_MARKER_LENGTH * sin,
                    y2: vehicle.position.y + CAR_MARKER_LENGTH * cos,
                    color: Color::Cyan,
                });
            })
    }

    fn render_stats(&self, _area: Rect, view: &DashboardView) -> Paragraph<'_> {
        let episode = if view.episode_id == VALIDATION_EPISODE {
            Span::styled(
                "VALIDATING MODEL NOW",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                format!("Episode: {}", view.episode_id),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
        };

        let text = vec![Line::from(vec![
            episode,
            Span::raw("    "),
            Span::styled("Speed: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{:.1} m/s", view.episode.vehicle.speed),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time Elapsed: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{:.1} s", view.episode.time_elapsed),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Checkpoints: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}/3", view.episode.checkpoints.passed_count()),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Best lap: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                view.metrics.format_best_lap(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Wall: ", Style::default().fg(Color::Yellow)),
            Span::styled(view.metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_run_over(&self, _area: Rect, view: &DashboardView) -> Paragraph<'_> {
        let finished = view.done_reasons.contains(&DoneReason::FinishLine);
        let (title, color) = if finished {
            ("LAP COMPLETE", Color::Green)
        } else {
            ("RUN OVER", Color::Red)
        };
        let reasons: Vec<String> = view.done_reasons.iter().map(|r| r.to_string()).collect();

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![Span::styled(
                reasons.join(", "),
                Style::default().fg(Color::Gray),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Time: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("{:.1} s", view.episode.time_elapsed),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Checkpoints: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("{}/3", view.episode.checkpoints.passed_count()),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self, _area: Rect) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("W/↑", Style::default().fg(Color::Cyan)),
            Span::raw(" gas | "),
            Span::styled("S/↓", Style::default().fg(Color::Cyan)),
            Span::raw(" brake | "),
            Span::styled("A/← D/→", Style::default().fg(Color::Cyan)),
            Span::raw(" steer | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}
