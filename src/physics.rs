//! Discrete-time kinematics shared by the games.
//!
//! Everything here advances by exactly one tick per call; there is no
//! wall-clock delta, so identical inputs and RNG seeds replay identically.

use std::f32::consts::TAU;

use rand::Rng;

use crate::entities::{Body, Rgba, Spark, Vec2};

// ── Integration ───────────────────────────────────────────────────────────────

/// `vel += accel; pos += vel`.
pub fn accelerate_then_move(body: &mut Body, accel: Vec2) {
    body.vel.x += accel.x;
    body.vel.y += accel.y;
    body.pos.x += body.vel.x;
    body.pos.y += body.vel.y;
}

/// `pos += vel; vel += accel`.
pub fn move_then_accelerate(body: &mut Body, accel: Vec2) {
    body.pos.x += body.vel.x;
    body.pos.y += body.vel.y;
    body.vel.x += accel.x;
    body.vel.y += accel.y;
}

// ── Gauges ────────────────────────────────────────────────────────────────────

/// A value that ping-pongs between `min` and `max` at a fixed rate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gauge {
    pub value: f32,
    /// +1.0 or -1.0.
    pub direction: f32,
    pub speed: f32,
    pub min: f32,
    pub max: f32,
}

impl Gauge {
    pub fn new(value: f32, speed: f32, min: f32, max: f32) -> Self {
        Self {
            value,
            direction: 1.0,
            speed,
            min,
            max,
        }
    }

    pub fn step(&mut self) {
        self.value += self.direction * self.speed;
        if self.value >= self.max || self.value <= self.min {
            self.value = self.value.clamp(self.min, self.max);
            self.direction = -self.direction;
        }
    }

    /// Position within the range, 0..=1.
    pub fn fraction(&self) -> f32 {
        (self.value - self.min) / (self.max - self.min)
    }
}

// ── Depth / perspective ───────────────────────────────────────────────────────

/// Interpolate from `origin` towards `vanishing` by `depth` (0 = release,
/// 100 = viewer plane), with per-axis weights.
pub fn project_depth(origin: Vec2, vanishing: Vec2, depth: f32, weight: Vec2) -> Vec2 {
    let t = depth / 100.0;
    Vec2::new(
        origin.x + t * (vanishing.x - origin.x) * weight.x,
        origin.y + t * (vanishing.y - origin.y) * weight.y,
    )
}

/// Size multiplier interpolated linearly across depth 0..=100.
pub fn depth_scale(depth: f32, at_zero: f32, at_hundred: f32) -> f32 {
    at_zero + (depth / 100.0) * (at_hundred - at_zero)
}

/// Offset of a body moving sinusoidally about a rest position.
pub fn sine_offset(frame: u64, speed: f32, phase: f32, amplitude: f32) -> f32 {
    (frame as f32 * speed + phase).sin() * amplitude
}

// ── Sparks ────────────────────────────────────────────────────────────────────

/// Evenly spaced ring of sparks flying outward.
pub fn ring_burst(center: Vec2, count: usize, speed: f32, decay: f32, color: Rgba) -> Vec<Spark> {
    (0..count)
        .map(|i| {
            let angle = TAU / count as f32 * i as f32;
            Spark {
                body: Body {
                    pos: center,
                    vel: Vec2::new(angle.cos() * speed, angle.sin() * speed),
                },
                life: 1.0,
                decay,
                gravity: 0.0,
                color,
            }
        })
        .collect()
}

/// Randomly scattered sparks; `lift` biases them upward.
#[allow(clippy::too_many_arguments)]
pub fn scatter_burst(
    center: Vec2,
    count: usize,
    spread: f32,
    lift: f32,
    decay: f32,
    gravity: f32,
    color: Rgba,
    rng: &mut impl Rng,
) -> Vec<Spark> {
    (0..count)
        .map(|_| Spark {
            body: Body {
                pos: center,
                vel: Vec2::new(
                    (rng.gen::<f32>() - 0.5) * spread,
                    (rng.gen::<f32>() - 0.5) * spread - lift,
                ),
            },
            life: 1.0,
            decay,
            gravity,
            color,
        })
        .collect()
}

/// Advance every spark one tick and drop the spent ones.
pub fn step_sparks(sparks: &mut Vec<Spark>) {
    for s in sparks.iter_mut() {
        move_then_accelerate(&mut s.body, Vec2::new(0.0, s.gravity));
        s.life -= s.decay;
    }
    sparks.retain(Spark::is_alive);
}
