//! The page runtime: owns the document and every registry the behaviors
//! hang handlers on, routes input events through the handler chain, and
//! pumps timers, fades, and collapse transitions.
//!
//! Handlers receive a [`PageState`] rather than the runtime itself: they
//! live inside the runtime's registries, so anything that has to touch a
//! registry (like requesting a collapse toggle) is queued as a [`Request`]
//! and drained once dispatch returns.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use log::trace;
use pagedom::{
    DispatchResult, Document, DomEvent, EventDispatcher, FadeState, NodeId, TimerHandle, TimerId,
    Timers,
};

use crate::collapse::{CollapseHooks, Toolkit};

/// Deferred work queued by a handler during dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Ask the toolkit to toggle a collapse panel.
    CollapseToggle(NodeId),
}

/// The mutable page state handlers operate on.
pub struct PageState {
    pub doc: Document,
    pub fades: FadeState,
    /// The instant of the event or tick currently being processed.
    pub now: Instant,
    pub requests: Vec<Request>,
}

impl PageState {
    pub fn new(doc: Document, now: Instant) -> Self {
        Self {
            doc,
            fades: FadeState::new(),
            now,
            requests: Vec::new(),
        }
    }
}

type TimerCallback = Box<dyn FnMut(&mut PageState)>;

/// Single-threaded, cooperatively scheduled page runtime.
pub struct PageRuntime {
    pub state: PageState,
    pub toolkit: Toolkit,
    pub timers: Timers,
    pub dispatcher: EventDispatcher<PageState>,
    pub hooks: CollapseHooks<PageState>,
    timer_callbacks: BTreeMap<TimerId, TimerCallback>,
    navigations: Vec<String>,
}

impl PageRuntime {
    pub fn new(doc: Document, toolkit: Toolkit, now: Instant) -> Self {
        Self {
            state: PageState::new(doc, now),
            toolkit,
            timers: Timers::new(),
            dispatcher: EventDispatcher::new(),
            hooks: CollapseHooks::new(),
            timer_callbacks: BTreeMap::new(),
            navigations: Vec::new(),
        }
    }

    /// Feed one input event through the handler chain, then apply its
    /// default action unless a handler prevented it.
    pub fn emit(&mut self, event: DomEvent, now: Instant) -> DispatchResult {
        self.state.now = now;
        let result = self.dispatcher.dispatch(&mut self.state, &event);
        self.drain_requests(now);
        if !result.default_prevented {
            self.apply_default(&event);
        }
        result
    }

    /// Advance time-driven work: fades, collapse transition completions
    /// (with their `Shown`/`Hidden` hooks), and due interval callbacks.
    pub fn update(&mut self, now: Instant) {
        self.state.now = now;
        self.state.fades.update(&mut self.state.doc, now);

        if let Some(collapse) = self.toolkit.collapse.as_mut() {
            for (panel, phase) in collapse.update(&mut self.state.doc, now) {
                self.hooks.dispatch(&mut self.state, panel, phase);
            }
        }

        for id in self.timers.poll(now) {
            if let Some(callback) = self.timer_callbacks.get_mut(&id) {
                callback(&mut self.state);
            }
        }

        self.drain_requests(now);
    }

    /// Register a recurring interval with its callback. The returned handle
    /// is the only way to stop it; keep it for teardown.
    pub fn set_interval(
        &mut self,
        period: Duration,
        now: Instant,
        callback: impl FnMut(&mut PageState) + 'static,
    ) -> TimerHandle {
        let handle = self.timers.set_interval(period, now);
        self.timer_callbacks.insert(handle.id(), Box::new(callback));
        handle
    }

    pub fn cancel_interval(&mut self, handle: TimerHandle) {
        self.timers.cancel(handle);
        self.timer_callbacks.remove(&handle.id());
    }

    /// Navigations performed by unprevented link clicks, oldest first.
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    fn drain_requests(&mut self, now: Instant) {
        while !self.state.requests.is_empty() {
            let requests = std::mem::take(&mut self.state.requests);
            for request in requests {
                match request {
                    Request::CollapseToggle(panel) => {
                        let Some(collapse) = self.toolkit.collapse.as_mut() else {
                            continue;
                        };
                        if let Some(phase) = collapse.toggle(&mut self.state.doc, panel, now) {
                            self.hooks.dispatch(&mut self.state, panel, phase);
                        }
                    }
                }
            }
        }
    }

    // Default action: clicking a link navigates to its href.
    fn apply_default(&mut self, event: &DomEvent) {
        let DomEvent::Click { target } = event else {
            return;
        };
        if self.state.doc.tag(*target) != "a" {
            return;
        }
        if let Some(href) = self.state.doc.attr(*target, "href") {
            trace!("[runtime] navigating to {href:?}");
            self.navigations.push(href.to_string());
        }
    }
}
