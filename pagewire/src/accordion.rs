//! Accordion wiring: makes a group of collapsible panels functional and
//! observable. All failure paths are non-fatal, logged, and leave document
//! state unchanged.

use log::{debug, error, info};
use pagedom::{Document, EventKind, EventOutcome, NodeId, SimpleSelector};

use crate::collapse::CollapsePhase;
use crate::error::BehaviorError;
use crate::runtime::{PageRuntime, Request};

pub const PANEL_BODY_SELECTOR: &str = ".panel-collapse";
pub const PANEL_HEADING_CLASS: &str = "panel-heading";
pub const PANEL_TITLE_LINK_SELECTOR: &str = ".panel-title > a";

/// Marker class kept on a panel's heading link while the panel is closed.
pub const COLLAPSED_CLASS: &str = "collapsed";

pub struct AccordionController;

impl AccordionController {
    /// Wire up every collapsible panel on the page.
    ///
    /// Fail-soft: if the toolkit has no collapse capability, a diagnostic is
    /// emitted and nothing is attached.
    pub fn install(rt: &mut PageRuntime) {
        if rt.toolkit.collapse.is_none() {
            error!("[accordion] {}", BehaviorError::MissingCapability);
            return;
        }

        let panels = select(&rt.state.doc, PANEL_BODY_SELECTOR);
        for &panel in &panels {
            info!(
                "[accordion] panel found: {}",
                rt.state.doc.element_id(panel).unwrap_or("<anonymous>")
            );
            if let Some(collapse) = rt.toolkit.collapse.as_mut() {
                collapse.register(&rt.state.doc, panel);
            }
        }

        for &panel in &panels {
            rt.hooks.on(panel, CollapsePhase::Show, |state, panel| {
                debug!("[accordion] opening {:?}", state.doc.element_id(panel));
                if let Some(link) = heading_link(&state.doc, panel) {
                    state.doc.remove_class(link, COLLAPSED_CLASS);
                }
            });
            rt.hooks.on(panel, CollapsePhase::Hide, |state, panel| {
                debug!("[accordion] closing {:?}", state.doc.element_id(panel));
                if let Some(link) = heading_link(&state.doc, panel) {
                    state.doc.add_class(link, COLLAPSED_CLASS);
                }
            });
            rt.hooks.on(panel, CollapsePhase::Shown, |state, panel| {
                debug!("[accordion] open: {:?}", state.doc.element_id(panel));
            });
            rt.hooks.on(panel, CollapsePhase::Hidden, |state, panel| {
                debug!("[accordion] closed: {:?}", state.doc.element_id(panel));
            });
        }

        let links = select(&rt.state.doc, PANEL_TITLE_LINK_SELECTOR);
        for &link in &links {
            rt.dispatcher.on(link, EventKind::Click, move |state, _event| {
                match resolve_target(&state.doc, link) {
                    Ok(target) => {
                        debug!(
                            "[accordion] toggle requested for {:?}",
                            state.doc.element_id(target)
                        );
                        state.requests.push(Request::CollapseToggle(target));
                    }
                    Err(e) => error!("[accordion] click ignored: {e}"),
                }
                EventOutcome::PreventDefault
            });
        }

        info!("[accordion] initialized ({} panels)", panels.len());
    }
}

fn select(doc: &Document, selector: &str) -> Vec<NodeId> {
    doc.select(selector).unwrap_or_else(|e| {
        error!("[accordion] selector {selector:?} failed to parse: {e}");
        Vec::new()
    })
}

/// The toggle link inside the heading that precedes a panel body.
fn heading_link(doc: &Document, panel: NodeId) -> Option<NodeId> {
    let heading = doc.prev_sibling_matching(panel, &SimpleSelector::class(PANEL_HEADING_CLASS))?;
    doc.descendants_matching(heading, &SimpleSelector::tag("a"))
        .into_iter()
        .next()
}

/// Resolve a title link's `href` to the panel it toggles.
fn resolve_target(doc: &Document, link: NodeId) -> Result<NodeId, BehaviorError> {
    let href = match doc.attr(link, "href") {
        Some(href) if !href.is_empty() && href != "#" => href.to_string(),
        _ => return Err(BehaviorError::EmptyTarget),
    };
    doc.select(&href)
        .ok()
        .and_then(|matches| matches.into_iter().next())
        .ok_or(BehaviorError::TargetNotFound(href))
}
