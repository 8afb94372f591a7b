use std::time::{Duration, Instant};

use pagedom::{Document, Node, NodeId};
use pagewire::collapse::{Collapse, CollapsePhase, PanelState, Toolkit};

fn setup(visible: bool) -> (Document, NodeId) {
    let mut doc = Document::new();
    let node = Node::new("div").id("p").class("panel-collapse");
    let node = if visible { node } else { node.hidden() };
    let id = doc.append(doc.root(), node);
    (doc, id)
}

// =============================================================================
// Registration
// =============================================================================

#[test]
fn test_register_seeds_state_from_visibility() {
    let (doc, panel) = setup(true);
    let mut collapse = Collapse::new();
    collapse.register(&doc, panel);
    assert_eq!(collapse.state(panel), Some(PanelState::Expanded));
    assert!(!collapse.is_collapsed(panel));

    let (doc, panel) = setup(false);
    let mut collapse = Collapse::new();
    collapse.register(&doc, panel);
    assert_eq!(collapse.state(panel), Some(PanelState::Collapsed));
    assert!(collapse.is_collapsed(panel));
}

#[test]
fn test_toggle_unregistered_panel_is_noop() {
    let (mut doc, panel) = setup(false);
    let mut collapse = Collapse::new();
    assert_eq!(collapse.toggle(&mut doc, panel, Instant::now()), None);
    assert!(!doc.is_visible(panel));
}

// =============================================================================
// Transitions
// =============================================================================

#[test]
fn test_expand_emits_show_then_shown() {
    let (mut doc, panel) = setup(false);
    let mut collapse = Collapse::new();
    collapse.register(&doc, panel);
    let t0 = Instant::now();

    assert_eq!(collapse.toggle(&mut doc, panel, t0), Some(CollapsePhase::Show));
    assert_eq!(collapse.state(panel), Some(PanelState::Expanding));
    // Body is on screen for the whole expand transition.
    assert!(doc.is_visible(panel));

    // Not done yet.
    assert!(collapse.update(&mut doc, t0 + Duration::from_millis(100)).is_empty());

    let completed = collapse.update(&mut doc, t0 + collapse.duration());
    assert_eq!(completed, vec![(panel, CollapsePhase::Shown)]);
    assert_eq!(collapse.state(panel), Some(PanelState::Expanded));
}

#[test]
fn test_collapse_emits_hide_then_hidden() {
    let (mut doc, panel) = setup(true);
    let mut collapse = Collapse::new();
    collapse.register(&doc, panel);
    let t0 = Instant::now();

    assert_eq!(collapse.toggle(&mut doc, panel, t0), Some(CollapsePhase::Hide));
    assert_eq!(collapse.state(panel), Some(PanelState::Collapsing));
    assert!(doc.is_visible(panel));

    let completed = collapse.update(&mut doc, t0 + collapse.duration());
    assert_eq!(completed, vec![(panel, CollapsePhase::Hidden)]);
    assert!(!doc.is_visible(panel));
}

#[test]
fn test_completed_transition_does_not_fire_again() {
    let (mut doc, panel) = setup(false);
    let mut collapse = Collapse::new();
    collapse.register(&doc, panel);
    let t0 = Instant::now();

    collapse.toggle(&mut doc, panel, t0);
    assert_eq!(collapse.update(&mut doc, t0 + collapse.duration()).len(), 1);
    assert!(collapse.update(&mut doc, t0 + 2 * collapse.duration()).is_empty());
}

#[test]
fn test_mid_transition_toggle_reverses() {
    let (mut doc, panel) = setup(false);
    let mut collapse = Collapse::with_duration(Duration::from_millis(400));
    collapse.register(&doc, panel);
    let t0 = Instant::now();

    collapse.toggle(&mut doc, panel, t0);
    // A quarter of the way open, close it again.
    let quarter = t0 + Duration::from_millis(100);
    assert_eq!(collapse.toggle(&mut doc, panel, quarter), Some(CollapsePhase::Hide));
    assert_eq!(collapse.state(panel), Some(PanelState::Collapsing));

    // Closing only has to cover the quarter that was opened.
    assert!(collapse.update(&mut doc, quarter + Duration::from_millis(50)).is_empty());
    let completed = collapse.update(&mut doc, quarter + Duration::from_millis(100));
    assert_eq!(completed, vec![(panel, CollapsePhase::Hidden)]);
    assert!(!doc.is_visible(panel));
}

// =============================================================================
// Toolkit
// =============================================================================

#[test]
fn test_toolkit_capability_presence() {
    assert!(Toolkit::default().collapse.is_none());
    assert!(Toolkit::with_collapse().collapse.is_some());
}
