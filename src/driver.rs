//! Loop driver: owns one session, its surface and its input adapter, and
//! runs update-then-render once per scheduled frame.
//!
//! The host calls `tick()` at its own refresh rate. A frame only runs if one
//! was scheduled, and a frame is only rescheduled while the session is
//! running, so closing or pausing simply drops the pending slot. There is
//! never more than one pending frame per driver.

use tracing::{debug, info, trace};

use crate::display::Surface;
use crate::entities::{GameSummary, SessionPhase};
use crate::error::Result;
use crate::input::{ActivationSource, InputAdapter, InputEvent};
use crate::session::Session;

/// Completion subscriber; called exactly once per session run.
pub type CompletionHook = Box<dyn FnMut(&GameSummary)>;

#[derive(Clone, Debug, PartialEq)]
pub enum TickStatus {
    /// Nothing was scheduled; nothing ran.
    Idle,
    /// A frame ran and the next one is scheduled.
    Running,
    /// A frame ran and the session reached game-over during it.
    Finished(GameSummary),
}

pub struct LoopDriver<S: Surface> {
    session: Box<dyn Session>,
    surface: S,
    input: InputAdapter,
    /// Id of the scheduled frame, if any.
    pending: Option<u64>,
    next_frame: u64,
    visible: bool,
    paused: bool,
    on_complete: Option<CompletionHook>,
    reported: bool,
}

impl<S: Surface> LoopDriver<S> {
    pub fn new(session: Box<dyn Session>, surface: S) -> Self {
        Self {
            session,
            surface,
            input: InputAdapter::default(),
            pending: None,
            next_frame: 0,
            visible: false,
            paused: false,
            on_complete: None,
            reported: false,
        }
    }

    /// Subscribe to the outbound completion signal.
    pub fn on_complete(mut self, hook: impl FnMut(&GameSummary) + 'static) -> Self {
        self.on_complete = Some(Box::new(hook));
        self
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn session(&self) -> &dyn Session {
        self.session.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn summary(&self) -> Option<GameSummary> {
        self.session.summary()
    }

    // ── Lifecycle ────────────────────────────────────────────────────────────

    /// Show the surface and enter the session's initial phase: the tutorial
    /// if it has one (drawn once, loop idle), otherwise straight to running.
    pub fn start(&mut self) -> Result<()> {
        self.pending = None;
        self.session.reset(true);
        self.reset_io();
        self.surface.set_visible(true)?;
        self.visible = true;
        info!(game = ?self.session.kind(), phase = ?self.session.phase(), "session started");

        if self.session.phase() == SessionPhase::Running {
            self.schedule();
        }
        self.session.render(&mut self.surface)
    }

    /// Reinitialise and run again, skipping the tutorial.
    pub fn restart(&mut self) -> Result<()> {
        self.pending = None;
        self.session.reset(false);
        self.session.begin();
        self.reset_io();
        if !self.visible {
            self.surface.set_visible(true)?;
            self.visible = true;
        }
        info!(game = ?self.session.kind(), "session restarted");
        self.schedule();
        Ok(())
    }

    /// Cancel the pending frame and hide the surface. Idempotent.
    pub fn close(&mut self) -> Result<()> {
        self.pending = None;
        self.paused = false;
        if self.visible {
            self.surface.set_visible(false)?;
            self.visible = false;
            info!(game = ?self.session.kind(), "session closed");
        }
        Ok(())
    }

    pub fn pause(&mut self) {
        if self.pending.take().is_some() {
            self.paused = true;
            debug!("loop paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused && self.session.phase() == SessionPhase::Running {
            self.paused = false;
            self.schedule();
            debug!("loop resumed");
        }
    }

    fn reset_io(&mut self) {
        self.input.reset();
        self.input.set_bounds(self.session.pointer_bounds());
        self.paused = false;
        self.reported = false;
    }

    fn schedule(&mut self) {
        if self.pending.is_none() {
            self.next_frame += 1;
            self.pending = Some(self.next_frame);
            trace!(frame = self.next_frame, "frame scheduled");
        }
    }

    // ── Input ────────────────────────────────────────────────────────────────

    /// Feed one host event. In the tutorial an activation dismisses it (a
    /// pointer activation only inside the start region) and is consumed.
    pub fn handle_input(&mut self, event: InputEvent) {
        if !self.visible {
            return;
        }
        let activation = self.input.push(event);
        if self.session.phase() != SessionPhase::Tutorial {
            return;
        }
        let Some(activation) = activation else { return };

        let dismiss = match (activation.source, activation.at) {
            (ActivationSource::Click, Some(at)) => self
                .session
                .start_region()
                .map_or(true, |region| region.contains(at)),
            _ => true,
        };
        self.input.cancel_activation();
        if dismiss {
            self.session.begin();
            info!(game = ?self.session.kind(), "tutorial dismissed");
            self.schedule();
        }
    }

    // ── Frame ────────────────────────────────────────────────────────────────

    /// Run the scheduled frame, if any: update, then render, then decide
    /// whether to schedule the next one.
    pub fn tick(&mut self) -> Result<TickStatus> {
        if self.pending.take().is_none() {
            return Ok(TickStatus::Idle);
        }

        let frame = self.input.take_frame();
        self.session.update(&frame);
        self.session.render(&mut self.surface)?;

        if self.session.is_terminal() {
            if let Some(summary) = self.session.summary() {
                if !self.reported {
                    self.reported = true;
                    info!(
                        game = ?summary.kind,
                        score = summary.score,
                        rank = %summary.rank,
                        outcome = ?summary.outcome,
                        "game over"
                    );
                    if let Some(hook) = self.on_complete.as_mut() {
                        hook(&summary);
                    }
                }
                return Ok(TickStatus::Finished(summary));
            }
        }

        if self.session.phase() == SessionPhase::Running {
            self.schedule();
        }
        Ok(TickStatus::Running)
    }

    /// Redraw the current state without advancing it (e.g. after a resize).
    pub fn redraw(&mut self) -> Result<()> {
        self.session.render(&mut self.surface)
    }
}
