//! The collapse capability: the contract a page's UI toolkit must satisfy
//! for accordions to work. A panel moves through a small state machine and
//! emits lifecycle phases at transition start and completion; behaviors
//! subscribe to those phases rather than driving the animation themselves.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use log::debug;
use pagedom::{Document, NodeId};

/// Lifecycle phases of a collapse transition.
///
/// `Show`/`Hide` fire when a transition begins, `Shown`/`Hidden` when it
/// completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollapsePhase {
    Show,
    Hide,
    Shown,
    Hidden,
}

/// Resting and transitional states of a single panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Collapsed,
    Expanding,
    Expanded,
    Collapsing,
}

#[derive(Debug, Clone, Copy)]
struct Panel {
    state: PanelState,
    started: Option<Instant>,
}

/// Default transition length for expanding/collapsing a panel.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(350);

/// Per-panel collapse state machine.
#[derive(Debug)]
pub struct Collapse {
    duration: Duration,
    panels: BTreeMap<NodeId, Panel>,
}

impl Default for Collapse {
    fn default() -> Self {
        Self::new()
    }
}

impl Collapse {
    pub fn new() -> Self {
        Self::with_duration(DEFAULT_DURATION)
    }

    pub fn with_duration(duration: Duration) -> Self {
        Self {
            duration,
            panels: BTreeMap::new(),
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Track a panel, seeding its state from the body's current visibility.
    pub fn register(&mut self, doc: &Document, panel: NodeId) {
        let state = if doc.is_visible(panel) {
            PanelState::Expanded
        } else {
            PanelState::Collapsed
        };
        self.panels.insert(
            panel,
            Panel {
                state,
                started: None,
            },
        );
    }

    pub fn is_registered(&self, panel: NodeId) -> bool {
        self.panels.contains_key(&panel)
    }

    pub fn state(&self, panel: NodeId) -> Option<PanelState> {
        self.panels.get(&panel).map(|p| p.state)
    }

    /// Whether the panel is at (or heading toward) its collapsed state.
    pub fn is_collapsed(&self, panel: NodeId) -> bool {
        matches!(
            self.state(panel),
            Some(PanelState::Collapsed | PanelState::Collapsing)
        )
    }

    /// Flip the panel toward its opposite resting state. Returns the phase
    /// that just began (`Show` or `Hide`), or `None` for an unregistered
    /// panel. Toggling mid-transition reverses it from the current point.
    pub fn toggle(&mut self, doc: &mut Document, panel: NodeId, now: Instant) -> Option<CollapsePhase> {
        let duration = self.duration;
        let entry = self.panels.get_mut(&panel)?;
        match entry.state {
            PanelState::Collapsed | PanelState::Collapsing => {
                entry.started = Some(reversed_start(entry.started, now, duration));
                entry.state = PanelState::Expanding;
                // The body is on screen for the whole expand transition.
                doc.set_visible(panel, true);
                debug!("[collapse] show {:?}", doc.element_id(panel));
                Some(CollapsePhase::Show)
            }
            PanelState::Expanded | PanelState::Expanding => {
                entry.started = Some(reversed_start(entry.started, now, duration));
                entry.state = PanelState::Collapsing;
                debug!("[collapse] hide {:?}", doc.element_id(panel));
                Some(CollapsePhase::Hide)
            }
        }
    }

    /// Complete every transition whose duration has elapsed, settling panel
    /// visibility. Returns the completion phases to dispatch, in panel order.
    pub fn update(&mut self, doc: &mut Document, now: Instant) -> Vec<(NodeId, CollapsePhase)> {
        let mut completed = Vec::new();
        for (&id, panel) in self.panels.iter_mut() {
            let Some(started) = panel.started else {
                continue;
            };
            if now.duration_since(started) < self.duration {
                continue;
            }
            panel.started = None;
            match panel.state {
                PanelState::Expanding => {
                    panel.state = PanelState::Expanded;
                    doc.set_visible(id, true);
                    completed.push((id, CollapsePhase::Shown));
                }
                PanelState::Collapsing => {
                    panel.state = PanelState::Collapsed;
                    doc.set_visible(id, false);
                    completed.push((id, CollapsePhase::Hidden));
                }
                PanelState::Collapsed | PanelState::Expanded => {}
            }
        }
        completed
    }
}

// When reversing mid-flight, the new transition only has to cover the part
// already opened (or closed), so it inherits the elapsed fraction.
fn reversed_start(started: Option<Instant>, now: Instant, duration: Duration) -> Instant {
    match started {
        Some(started) => {
            let elapsed = now.duration_since(started).min(duration);
            now - (duration - elapsed)
        }
        None => now,
    }
}

/// The page's UI-toolkit binding. Capabilities are optional; behaviors must
/// check for presence before wiring themselves up and fail soft when a
/// capability is absent.
#[derive(Debug, Default)]
pub struct Toolkit {
    pub collapse: Option<Collapse>,
}

impl Toolkit {
    pub fn with_collapse() -> Self {
        Self {
            collapse: Some(Collapse::new()),
        }
    }
}

pub type CollapseHook<Ctx> = Box<dyn FnMut(&mut Ctx, NodeId)>;

/// Subscription registry for collapse lifecycle phases.
///
/// Hooks for the same (panel, phase) run in subscription order, so a hook
/// that synchronizes a marker class always runs before a later diagnostic
/// hook for the same transition.
pub struct CollapseHooks<Ctx> {
    subs: Vec<(NodeId, CollapsePhase, CollapseHook<Ctx>)>,
}

impl<Ctx> Default for CollapseHooks<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ctx> CollapseHooks<Ctx> {
    pub fn new() -> Self {
        Self { subs: Vec::new() }
    }

    pub fn on(
        &mut self,
        panel: NodeId,
        phase: CollapsePhase,
        hook: impl FnMut(&mut Ctx, NodeId) + 'static,
    ) {
        self.subs.push((panel, phase, Box::new(hook)));
    }

    pub fn dispatch(&mut self, ctx: &mut Ctx, panel: NodeId, phase: CollapsePhase) {
        for (node, p, hook) in &mut self.subs {
            if *node == panel && *p == phase {
                hook(ctx, panel);
            }
        }
    }
}
