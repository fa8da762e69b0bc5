//! Input adapter.
//!
//! Normalises raw host events into two signals per frame: a continuous
//! pointer position clamped to the playfield, and at most one discrete
//! activation. Directional keys are tracked as "held" for the games that
//! steer with them.
//!
//! Hold model: every press/repeat records the frame it was last seen. A key
//! counts as held while that record is fresh (within the hold window) or,
//! with no window, until its release arrives. Terminals that never report
//! releases keep keys alive through OS key-repeat.

use std::collections::HashMap;

use crate::entities::{Rect, Vec2};

/// Default freshness window in frames (~133 ms at 60 FPS), shorter than the
/// OS repeat interval so held keys stay live while repeating.
pub const HOLD_WINDOW: u64 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// The designated activation key (Space).
    Action,
    Left,
    Right,
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Key press or auto-repeat.
    KeyDown(Key),
    KeyUp(Key),
    PointerMove(Vec2),
    /// Primary-button click at a surface position.
    Click(Vec2),
    TouchStart(Vec2),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivationSource {
    Key,
    Click,
    Touch,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Activation {
    pub source: ActivationSource,
    /// Surface coordinate for pointer-delivered activations.
    pub at: Option<Vec2>,
}

/// Snapshot handed to `Session::update` once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub pointer: Vec2,
    pub activation: Option<Activation>,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl FrameInput {
    /// A frame with no input at all.
    pub fn idle() -> Self {
        Self::default()
    }

    /// A frame carrying a single key activation.
    pub fn activate() -> Self {
        Self {
            activation: Some(Activation {
                source: ActivationSource::Key,
                at: None,
            }),
            ..Self::default()
        }
    }

    pub fn activated(&self) -> bool {
        self.activation.is_some()
    }
}

#[derive(Clone, Debug)]
pub struct InputAdapter {
    bounds: Option<Rect>,
    pointer: Vec2,
    pending: Option<Activation>,
    /// Maps each held key to the frame it was last seen (press or repeat).
    key_frame: HashMap<Key, u64>,
    frame: u64,
    hold_window: Option<u64>,
}

impl Default for InputAdapter {
    fn default() -> Self {
        Self::new(Some(HOLD_WINDOW))
    }
}

impl InputAdapter {
    pub fn new(hold_window: Option<u64>) -> Self {
        Self {
            bounds: None,
            pointer: Vec2::ZERO,
            pending: None,
            key_frame: HashMap::new(),
            frame: 0,
            hold_window,
        }
    }

    /// Restrict the pointer to a playfield sub-rectangle; the current
    /// pointer is re-clamped immediately.
    pub fn set_bounds(&mut self, bounds: Option<Rect>) {
        self.bounds = bounds;
        self.pointer = self.clamp(self.pointer);
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    fn clamp(&self, p: Vec2) -> Vec2 {
        match &self.bounds {
            Some(b) => b.clamp(p),
            None => p,
        }
    }

    /// Record one host event. Returns the activation if this event produced
    /// the frame's (single) activation; later ones in the same frame are
    /// swallowed.
    pub fn push(&mut self, event: InputEvent) -> Option<Activation> {
        let activation = match event {
            InputEvent::KeyDown(key) => {
                self.key_frame.insert(key, self.frame);
                (key == Key::Action).then_some(Activation {
                    source: ActivationSource::Key,
                    at: None,
                })
            }
            InputEvent::KeyUp(key) => {
                self.key_frame.remove(&key);
                None
            }
            InputEvent::PointerMove(p) => {
                self.pointer = self.clamp(p);
                None
            }
            InputEvent::Click(p) => Some(Activation {
                source: ActivationSource::Click,
                at: Some(p),
            }),
            InputEvent::TouchStart(p) => Some(Activation {
                source: ActivationSource::Touch,
                at: Some(p),
            }),
        };

        match activation {
            Some(a) if self.pending.is_none() => {
                self.pending = Some(a);
                Some(a)
            }
            _ => None,
        }
    }

    /// Drop the pending activation (it was consumed elsewhere, e.g. by a
    /// tutorial dismissal).
    pub fn cancel_activation(&mut self) {
        self.pending = None;
    }

    fn is_held(&self, key: Key) -> bool {
        match (self.key_frame.get(&key), self.hold_window) {
            (Some(&last), Some(window)) => self.frame.saturating_sub(last) <= window,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// Close the current frame: advance the frame counter and hand out the
    /// accumulated input.
    pub fn take_frame(&mut self) -> FrameInput {
        self.frame += 1;
        FrameInput {
            pointer: self.pointer,
            activation: self.pending.take(),
            left: self.is_held(Key::Left),
            right: self.is_held(Key::Right),
            up: self.is_held(Key::Up),
            down: self.is_held(Key::Down),
        }
    }

    /// Forget pending activations and held keys; the pointer is kept.
    pub fn reset(&mut self) {
        self.pending = None;
        self.key_frame.clear();
    }
}
