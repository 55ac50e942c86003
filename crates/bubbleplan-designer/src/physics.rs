//! Magnetic layout nudge.
//!
//! A heuristic, not a simulation: each tick every placed space gets a
//! constant-magnitude pull toward each same-zone neighbor and a push out of
//! every space it overlaps, resolved along the axis of least penetration.
//! Forces are added straight to positions (unit mass, unit timestep).

use std::time::{Duration, Instant};

use bubbleplan_core::MagneticSettings;
use tracing::{debug, info};

use crate::document::Document;
use crate::model::{Point, Space, SpaceId};

/// Result of one tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Nothing moved more than epsilon; leave the document untouched.
    Unchanged,
    /// New positions for the spaces that moved.
    Moved(Vec<(SpaceId, Point)>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsNudger {
    settings: MagneticSettings,
}

impl PhysicsNudger {
    pub fn new(settings: MagneticSettings) -> Self {
        Self { settings }
    }

    /// Computes one tick for the placed spaces on `floor`.
    pub fn step(&self, spaces: &[Space], floor: usize) -> TickOutcome {
        let active: Vec<&Space> = spaces
            .iter()
            .filter(|s| s.placed && s.floor == floor)
            .collect();

        let mut moved = Vec::new();
        let mut any_above_epsilon = false;

        for (i, space) in active.iter().enumerate() {
            let center = space.center();
            let bounds = space.bounds();
            let mut force = Point::ORIGIN;

            for (j, other) in active.iter().enumerate() {
                if i == j {
                    continue;
                }
                let other_center = other.center();
                if other.zone == space.zone {
                    force = force + (other_center - center).normalized() * self.settings.attraction;
                }
                if let Some((ox, oy)) = bounds.overlap(&other.bounds()) {
                    let away = |a: f64, b: f64| if a < b || (a == b && i < j) { -1.0 } else { 1.0 };
                    if ox < oy {
                        force.x += away(center.x, other_center.x) * self.settings.repulsion * ox;
                    } else {
                        force.y += away(center.y, other_center.y) * self.settings.repulsion * oy;
                    }
                }
            }

            let magnitude = force.length();
            if magnitude > self.settings.epsilon {
                any_above_epsilon = true;
            }
            if magnitude > 0.0 {
                moved.push((space.id.clone(), space.position + force));
            }
        }

        if any_above_epsilon {
            TickOutcome::Moved(moved)
        } else {
            TickOutcome::Unchanged
        }
    }

    /// Runs one tick against the document's current floor. Returns whether
    /// anything was written.
    pub fn apply(&self, doc: &mut Document) -> bool {
        match self.step(doc.spaces(), doc.current_floor()) {
            TickOutcome::Unchanged => false,
            TickOutcome::Moved(positions) => {
                doc.apply_positions(&positions);
                true
            }
        }
    }
}

/// Upper bound on ticks delivered by a single poll after a stall.
const MAX_CATCH_UP_TICKS: u32 = 3;

/// Fixed-interval scheduler for the nudge, driven by a monotonic clock.
///
/// The host calls [`poll`](Self::poll) from its event loop; disabling stops
/// future ticks but keeps whatever the last tick did.
#[derive(Debug, Clone)]
pub struct MagneticLoop {
    nudger: PhysicsNudger,
    interval: Duration,
    next_due: Option<Instant>,
}

impl MagneticLoop {
    pub fn new(settings: MagneticSettings) -> Self {
        Self {
            nudger: PhysicsNudger::new(settings),
            interval: Duration::from_millis(settings.tick_ms.max(1)),
            next_due: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn enable(&mut self, now: Instant) {
        if self.next_due.is_none() {
            info!("Magnetic mode enabled ({} ms tick)", self.interval.as_millis());
            self.next_due = Some(now + self.interval);
        }
    }

    pub fn disable(&mut self) {
        if self.next_due.take().is_some() {
            info!("Magnetic mode disabled");
        }
    }

    /// Number of ticks due at `now`, capped, and schedules the next one.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(due) = self.next_due else {
            return 0;
        };
        if now < due {
            return 0;
        }
        let elapsed = now.duration_since(due);
        let behind = (elapsed.as_nanos() / self.interval.as_nanos().max(1)) as u32;
        let ticks = (behind + 1).min(MAX_CATCH_UP_TICKS);
        self.next_due = Some(now + self.interval);
        ticks
    }

    /// Polls and runs every due tick against the document. Returns the
    /// number of ticks that changed it.
    pub fn run_due(&mut self, doc: &mut Document, now: Instant) -> u32 {
        let due = self.poll(now);
        let mut changed = 0;
        for _ in 0..due {
            if self.nudger.apply(doc) {
                changed += 1;
            } else {
                break;
            }
        }
        if due > 0 {
            debug!("Magnetic tick: {} due, {} changed", due, changed);
        }
        changed
    }
}
