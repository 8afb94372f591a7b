//! Navigation affordances: hover-driven submenus, the mobile menu and
//! search toggles, and the auto-advancing header slider.

use std::time::{Duration, Instant};

use log::{debug, error, info};
use pagedom::{Document, EventKind, EventOutcome, NodeId, SimpleSelector, TimerHandle};

use crate::runtime::PageRuntime;

pub const MENU_ITEM_SELECTOR: &str = ".menu-item-has-children";
pub const SUBMENU_CLASS: &str = "sub-menu";
pub const MENU_TRIGGER_SELECTOR: &str = ".menu_trigger";
pub const MENU_CONTAINER_SELECTOR: &str = "#menu_principal_container";
pub const SEARCH_TRIGGER_SELECTOR: &str = ".search_trigger";
pub const SLIDE_SELECTOR: &str = "#header_image_slider li";

/// Marker class for a hovered menu item and for the open mobile trigger.
pub const ACTIVE_CLASS: &str = "active";
/// Marker class on the menu container while the mobile menu is open.
pub const MOBILE_OPEN_CLASS: &str = "mobile-open";

pub const SUBMENU_FADE: Duration = Duration::from_millis(200);
pub const SLIDE_INTERVAL: Duration = Duration::from_millis(5000);
pub const SLIDE_FADE: Duration = Duration::from_millis(500);

/// Handle to the installed navigation behaviors.
///
/// Retains the slider's interval handle; call [`teardown`] when the slider's
/// container is removed from the page so the interval stops firing.
///
/// [`teardown`]: NavigationController::teardown
pub struct NavigationController {
    slider: Option<TimerHandle>,
}

impl NavigationController {
    pub fn install(rt: &mut PageRuntime, now: Instant) -> Self {
        // Submenu hover. Each new transition supersedes any fade already in
        // flight on the same submenu.
        let items = select(&rt.state.doc, MENU_ITEM_SELECTOR);
        for &item in &items {
            rt.dispatcher
                .on(item, EventKind::PointerEnter, move |state, _event| {
                    if let Some(submenu) = submenu_of(&state.doc, item) {
                        state
                            .fades
                            .fade_in(&mut state.doc, submenu, SUBMENU_FADE, state.now);
                    }
                    state.doc.add_class(item, ACTIVE_CLASS);
                    EventOutcome::Continue
                });
            rt.dispatcher
                .on(item, EventKind::PointerLeave, move |state, _event| {
                    if let Some(submenu) = submenu_of(&state.doc, item) {
                        state
                            .fades
                            .fade_out(&mut state.doc, submenu, SUBMENU_FADE, state.now);
                    }
                    state.doc.remove_class(item, ACTIVE_CLASS);
                    EventOutcome::Continue
                });
        }

        // Mobile menu toggle: a pure class flip on trigger and container.
        for &trigger in &select(&rt.state.doc, MENU_TRIGGER_SELECTOR) {
            rt.dispatcher
                .on(trigger, EventKind::Click, move |state, _event| {
                    state.doc.toggle_class(trigger, ACTIVE_CLASS);
                    if let Some(container) = first(&state.doc, MENU_CONTAINER_SELECTOR) {
                        state.doc.toggle_class(container, MOBILE_OPEN_CLASS);
                    }
                    EventOutcome::PreventDefault
                });
        }

        // Mobile search toggle: show/hide the trigger's sibling form.
        for &trigger in &select(&rt.state.doc, SEARCH_TRIGGER_SELECTOR) {
            rt.dispatcher
                .on(trigger, EventKind::Click, move |state, _event| {
                    for form in state
                        .doc
                        .siblings_matching(trigger, &SimpleSelector::tag("form"))
                    {
                        state.doc.toggle_visible(form);
                    }
                    EventOutcome::PreventDefault
                });
        }

        // Header slider, only when there is something to rotate through.
        let slides = select(&rt.state.doc, SLIDE_SELECTOR);
        let slider = if slides.len() > 1 {
            info!("[nav] slider active ({} slides)", slides.len());
            let mut current = 0usize;
            let handle = rt.set_interval(SLIDE_INTERVAL, now, move |state| {
                state
                    .fades
                    .fade_out(&mut state.doc, slides[current], SLIDE_FADE, state.now);
                current = (current + 1) % slides.len();
                state
                    .fades
                    .fade_in(&mut state.doc, slides[current], SLIDE_FADE, state.now);
                debug!("[nav] slide {current}");
            });
            Some(handle)
        } else {
            None
        };

        info!("[nav] initialized ({} menu items)", items.len());
        Self { slider }
    }

    pub fn slider_active(&self) -> bool {
        self.slider.is_some()
    }

    /// Stop the slider's interval. Must be called when the slider's
    /// container leaves the page; nothing else releases the timer.
    pub fn teardown(&mut self, rt: &mut PageRuntime) {
        if let Some(handle) = self.slider.take() {
            rt.cancel_interval(handle);
            debug!("[nav] slider stopped");
        }
    }
}

fn select(doc: &Document, selector: &str) -> Vec<NodeId> {
    doc.select(selector).unwrap_or_else(|e| {
        error!("[nav] selector {selector:?} failed to parse: {e}");
        Vec::new()
    })
}

fn first(doc: &Document, selector: &str) -> Option<NodeId> {
    select(doc, selector).into_iter().next()
}

fn submenu_of(doc: &Document, item: NodeId) -> Option<NodeId> {
    doc.descendants_matching(item, &SimpleSelector::class(SUBMENU_CLASS))
        .into_iter()
        .next()
}
