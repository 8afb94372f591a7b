use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::node::{Document, NodeId};

/// Easing function for fades.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl Easing {
    /// Apply easing to progress (0.0 to 1.0).
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Direction of an opacity fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDirection {
    In,
    Out,
}

impl FadeDirection {
    fn target(self) -> f32 {
        match self {
            FadeDirection::In => 1.0,
            FadeDirection::Out => 0.0,
        }
    }
}

/// A single in-flight fade.
#[derive(Debug, Clone)]
struct ActiveFade {
    direction: FadeDirection,
    from: f32,
    start: Instant,
    duration: Duration,
    easing: Easing,
}

impl ActiveFade {
    fn value(&self, now: Instant) -> f32 {
        let elapsed = now.duration_since(self.start);
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };
        let eased = self.easing.apply(progress);
        self.from + (self.direction.target() - self.from) * eased
    }

    fn finished(&self, now: Instant) -> bool {
        now.duration_since(self.start) >= self.duration
    }
}

/// Tracks opacity fades across frames.
///
/// A node has at most one active fade. Starting a fade while another is in
/// flight supersedes it, picking up from the current interpolated opacity,
/// so rapid enter/leave sequences never queue competing animations.
#[derive(Debug, Default)]
pub struct FadeState {
    active: HashMap<NodeId, ActiveFade>,
}

impl FadeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_active(&self) -> bool {
        !self.active.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn is_fading(&self, node: NodeId) -> bool {
        self.active.contains_key(&node)
    }

    pub fn fade_in(&mut self, doc: &mut Document, node: NodeId, duration: Duration, now: Instant) {
        self.start(doc, node, FadeDirection::In, duration, now);
    }

    pub fn fade_out(&mut self, doc: &mut Document, node: NodeId, duration: Duration, now: Instant) {
        self.start(doc, node, FadeDirection::Out, duration, now);
    }

    /// Begin a fade on `node`, superseding any fade already in flight on it.
    pub fn start(
        &mut self,
        doc: &mut Document,
        node: NodeId,
        direction: FadeDirection,
        duration: Duration,
        now: Instant,
    ) {
        let from = self.opacity(doc, node, now);

        if duration.is_zero() {
            self.active.remove(&node);
            self.settle(doc, node, direction);
            return;
        }

        // A fade-in must be visible from its first frame.
        if direction == FadeDirection::In {
            doc.set_visible(node, true);
        }
        doc.set_opacity(node, from);

        log::trace!("[fade] {direction:?} on {node:?} over {duration:?} (from {from:.2})");
        self.active.insert(
            node,
            ActiveFade {
                direction,
                from,
                start: now,
                duration,
                easing: Easing::default(),
            },
        );
    }

    /// Current opacity of `node`: interpolated if fading, otherwise its
    /// resting value (0.0 when hidden).
    pub fn opacity(&self, doc: &Document, node: NodeId, now: Instant) -> f32 {
        match self.active.get(&node) {
            Some(fade) => fade.value(now),
            None if doc.is_visible(node) => doc.opacity(node),
            None => 0.0,
        }
    }

    /// Advance all fades: write interpolated opacities into the document and
    /// settle fades whose duration has elapsed.
    pub fn update(&mut self, doc: &mut Document, now: Instant) {
        let mut done = Vec::new();
        for (&node, fade) in &self.active {
            if fade.finished(now) {
                done.push(node);
            } else {
                doc.set_opacity(node, fade.value(now));
            }
        }
        for node in done {
            if let Some(fade) = self.active.remove(&node) {
                self.settle(doc, node, fade.direction);
                log::trace!("[fade] {:?} complete on {node:?}", fade.direction);
            }
        }
    }

    fn settle(&self, doc: &mut Document, node: NodeId, direction: FadeDirection) {
        doc.set_opacity(node, direction.target());
        doc.set_visible(node, direction == FadeDirection::In);
    }
}
