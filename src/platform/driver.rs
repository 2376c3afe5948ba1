//! Glue between host callbacks and the session
//!
//! One `on_frame` per requested display refresh: tick, draw, and ask for
//! the next frame while the session is still running.

use glam::Vec2;

use super::{Clock, FrameScheduler};
use crate::renderer::{DrawSurface, SceneRenderer};
use crate::sim::{GamePhase, Session};
use crate::tuning::Tuning;

pub struct FrameDriver<C: Clock, F: FrameScheduler> {
    session: Session,
    renderer: SceneRenderer,
    clock: C,
    scheduler: F,
    /// A frame is already requested; avoids running two loops after a restart
    frame_pending: bool,
    frames: u64,
    last_phase: GamePhase,
}

impl<C: Clock, F: FrameScheduler> FrameDriver<C, F> {
    pub fn new(seed: u64, tuning: Tuning, clock: C, scheduler: F) -> Self {
        let bounds = Vec2::new(tuning.field.width, tuning.field.height);
        Self {
            session: Session::new(seed, tuning),
            renderer: SceneRenderer::new(seed, bounds),
            clock,
            scheduler,
            frame_pending: false,
            frames: 0,
            last_phase: GamePhase::Idle,
        }
    }

    /// Start or restart, then make sure the loop is scheduled
    pub fn on_start_command(&mut self) {
        let now = self.clock.now_ms();
        self.session.on_start_command(now);
        self.last_phase = self.session.phase();
        self.request_frame();
    }

    pub fn on_lift_signal(&mut self) {
        self.session.on_lift_signal();
    }

    /// Handle one display refresh. Returns whether another was requested.
    pub fn on_frame<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) -> bool {
        self.frame_pending = false;
        let now = self.clock.now_ms();

        let running = self.session.frame(now);
        self.renderer.draw(self.session.state(), surface, now);
        self.frames += 1;

        let phase = self.session.phase();
        if phase != self.last_phase {
            log::info!("Phase {:?} -> {:?} after {} frames", self.last_phase, phase, self.frames);
            self.last_phase = phase;
        }

        if running {
            self.request_frame();
        }
        running
    }

    fn request_frame(&mut self) {
        if !self.frame_pending {
            self.frame_pending = true;
            self.scheduler.request_frame();
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    /// Frames handled since construction
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{ManualClock, ManualScheduler};
    use crate::renderer::DrawCommand;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn driver() -> FrameDriver<ManualClock, ManualScheduler> {
        FrameDriver::new(7, Tuning::default(), ManualClock::new(0.0), ManualScheduler::new())
    }

    #[test]
    fn test_start_requests_frame() {
        let mut driver = driver();
        assert!(!driver.scheduler_mut().take_request());
        driver.on_start_command();
        assert!(driver.session().is_running());
        assert!(driver.scheduler_mut().take_request());
    }

    #[test]
    fn test_restart_does_not_double_schedule() {
        let mut driver = driver();
        driver.on_start_command();
        driver.on_start_command();
        assert_eq!(driver.scheduler_mut().requests(), 1);
    }

    #[test]
    fn test_frame_draws_and_reschedules() {
        let mut driver = driver();
        driver.on_start_command();
        driver.scheduler_mut().take_request();

        driver.clock_mut().advance(FRAME_MS);
        let mut out: Vec<DrawCommand> = Vec::new();
        assert!(driver.on_frame(&mut out));
        assert!(matches!(out.first(), Some(DrawCommand::Clear { .. })));
        assert!(driver.scheduler_mut().take_request());
        assert_eq!(driver.frames(), 1);
    }

    #[test]
    fn test_loop_stops_after_end() {
        let mut driver = driver();
        driver.on_start_command();

        let mut out: Vec<DrawCommand> = Vec::new();
        while driver.scheduler_mut().take_request() {
            driver.clock_mut().advance(FRAME_MS);
            out.clear();
            driver.on_frame(&mut out);
        }
        assert_eq!(driver.session().phase(), GamePhase::Ended);
        assert!(driver.session().summary().is_some());
        assert!(!driver.on_frame(&mut out));
    }
}
