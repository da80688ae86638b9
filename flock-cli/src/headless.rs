use std::io::{self, Write};

use anyhow::{Context, Result};
use flock_core::DisplayAdapter;
use flock_shared::{Frame, FrameSummary, Point, TickInput};
use rand::rngs::SmallRng;
use rand::Rng;

use crate::scenario::Scenario;

/// Settings for a headless run
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessOptions {
    pub width: f32,
    pub height: f32,
    /// Milliseconds reported as elapsed on every tick
    pub tick_millis: f32,
    /// Stop after this many ticks
    pub max_ticks: u64,
    /// Log a summary every this many ticks; 0 disables it
    pub log_every: u64,
}

/// What a finished headless run produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadlessReport {
    pub frames_presented: u64,
    pub frames_written: u64,
    pub last_summary: Option<FrameSummary>,
}

/// A display adapter with a fixed timestep and scripted input.
///
/// Frames are optionally written to `W` as JSON lines.
pub struct HeadlessDisplay<W: Write> {
    options: HeadlessOptions,
    scenario: Scenario,
    rng: SmallRng,
    sink: Option<W>,
    tick: u64,
    pointer: Point,
    report: HeadlessReport,
    write_error: Option<io::Error>,
}

impl<W: Write> HeadlessDisplay<W> {
    pub fn new(
        options: HeadlessOptions,
        scenario: Scenario,
        rng: SmallRng,
        sink: Option<W>,
    ) -> Self {
        let pointer = Point::new(options.width / 2.0, options.height / 2.0);
        Self {
            options,
            scenario,
            rng,
            sink,
            tick: 0,
            pointer,
            report: HeadlessReport::default(),
            write_error: None,
        }
    }

    /// Flush output and hand back the run report and the sink
    pub fn finish(mut self) -> Result<(HeadlessReport, Option<W>)> {
        if let Some(err) = self.write_error.take() {
            return Err(err).context("Failed to write frame");
        }
        if let Some(sink) = self.sink.as_mut() {
            sink.flush().context("Failed to flush frame output")?;
        }
        Ok((self.report, self.sink))
    }

    fn write_frame(&mut self, frame: &Frame) -> io::Result<()> {
        let Some(sink) = self.sink.as_mut() else {
            return Ok(());
        };
        let line = frame.to_json_line().map_err(io::Error::from)?;
        writeln!(sink, "{line}")?;
        self.report.frames_written += 1;
        Ok(())
    }
}

impl<W: Write> DisplayAdapter for HeadlessDisplay<W> {
    fn world_size(&self) -> (f32, f32) {
        (self.options.width, self.options.height)
    }

    fn random_position(&mut self) -> Point {
        Point::new(
            self.rng.gen_range(0.0..=self.options.width),
            self.rng.gen_range(0.0..=self.options.height),
        )
    }

    fn poll_input(&mut self) -> TickInput {
        self.tick += 1;

        let mut input = TickInput::idle(self.options.tick_millis, self.pointer);
        for event in self.scenario.events_at(self.tick) {
            event.apply(&mut input);
        }
        self.pointer = input.pointer;

        if self.write_error.is_some() {
            log::warn!("Stopping after a failed frame write");
            input.quit = true;
        }
        if self.tick > self.options.max_ticks {
            input.quit = true;
        }
        input
    }

    fn present(&mut self, frame: &Frame) {
        self.report.frames_presented += 1;
        self.report.last_summary = Some(frame.summary);

        if self.write_error.is_none() {
            if let Err(err) = self.write_frame(frame) {
                log::warn!("Failed to write frame {}: {}", frame.summary.tick, err);
                self.write_error = Some(err);
            }
        }

        let every = self.options.log_every;
        if every > 0 && frame.summary.tick % every == 0 {
            log::info!(
                "tick {}: {} boids, {} obstacles",
                frame.summary.tick,
                frame.summary.boid_count,
                frame.summary.obstacle_count
            );
            if let Some(detail) = frame.detail {
                log::debug!(
                    "boid #{} at ({:.2}, {:.2}) heading {:.2}",
                    detail.index,
                    detail.position.x,
                    detail.position.y,
                    detail.heading
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flock_core::seeded_rng;

    fn options(max_ticks: u64) -> HeadlessOptions {
        HeadlessOptions {
            width: 200.0,
            height: 100.0,
            tick_millis: 16.0,
            max_ticks,
            log_every: 0,
        }
    }

    #[test]
    fn test_quits_after_max_ticks() {
        let mut display: HeadlessDisplay<Vec<u8>> =
            HeadlessDisplay::new(options(2), Scenario::default(), seeded_rng(0), None);
        assert!(!display.poll_input().quit);
        assert!(!display.poll_input().quit);
        assert!(display.poll_input().quit);
    }

    #[test]
    fn test_pointer_persists_between_events() {
        let scenario = Scenario::from_json(
            r#"{"events": [{"tick": 2, "pointer": {"x": 5.0, "y": 6.0}}]}"#,
        )
        .unwrap();
        let mut display: HeadlessDisplay<Vec<u8>> =
            HeadlessDisplay::new(options(10), scenario, seeded_rng(0), None);

        assert_eq!(display.poll_input().pointer, Point::new(100.0, 50.0));
        assert_eq!(display.poll_input().pointer, Point::new(5.0, 6.0));
        let input = display.poll_input();
        assert_eq!(input.pointer, Point::new(5.0, 6.0));
        assert_eq!(input.elapsed, 16.0);
    }

    #[test]
    fn test_random_positions_inside_world() {
        let mut display: HeadlessDisplay<Vec<u8>> =
            HeadlessDisplay::new(options(1), Scenario::default(), seeded_rng(4), None);
        for _ in 0..200 {
            let p = display.random_position();
            assert!((0.0..=200.0).contains(&p.x));
            assert!((0.0..=100.0).contains(&p.y));
        }
    }

    #[test]
    fn test_frames_written_as_json_lines() {
        let mut display = HeadlessDisplay::new(
            options(5),
            Scenario::default(),
            seeded_rng(0),
            Some(Vec::<u8>::new()),
        );
        for tick in 1..=3 {
            display.present(&Frame {
                summary: FrameSummary {
                    tick,
                    ..FrameSummary::default()
                },
                ..Frame::default()
            });
        }

        let (report, sink) = display.finish().unwrap();
        assert_eq!(report.frames_presented, 3);
        assert_eq!(report.frames_written, 3);
        assert_eq!(report.last_summary.map(|summary| summary.tick), Some(3));

        let output = String::from_utf8(sink.unwrap()).unwrap();
        let frames: Vec<Frame> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[1].summary.tick, 2);
    }
}
