use crate::node::NodeId;

/// Input events targeted at a document node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomEvent {
    /// Pointer click on an element.
    Click { target: NodeId },
    /// Pointer entered an element (hover start).
    PointerEnter { target: NodeId },
    /// Pointer left an element (hover end).
    PointerLeave { target: NodeId },
}

impl DomEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            DomEvent::Click { .. } => EventKind::Click,
            DomEvent::PointerEnter { .. } => EventKind::PointerEnter,
            DomEvent::PointerLeave { .. } => EventKind::PointerLeave,
        }
    }

    pub fn target(&self) -> NodeId {
        match *self {
            DomEvent::Click { target }
            | DomEvent::PointerEnter { target }
            | DomEvent::PointerLeave { target } => target,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    PointerEnter,
    PointerLeave,
}

/// What a handler decided about the event's default action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EventOutcome {
    /// Let the default action (e.g. link navigation) run.
    #[default]
    Continue,
    /// Suppress the default action.
    PreventDefault,
}

/// Result of dispatching one event through the handler chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// At least one handler ran.
    pub handled: bool,
    /// Some handler suppressed the default action.
    pub default_prevented: bool,
}

impl DispatchResult {
    pub fn is_handled(&self) -> bool {
        self.handled
    }
}

pub type EventHandler<Ctx> = Box<dyn FnMut(&mut Ctx, &DomEvent) -> EventOutcome>;

struct Subscription<Ctx> {
    node: NodeId,
    kind: EventKind,
    handler: EventHandler<Ctx>,
}

/// Subscription-ordered event dispatch.
///
/// Handlers for the same (node, kind) fire in the order they were attached,
/// so listeners that synchronize state always run before ones that merely
/// observe it. The dispatcher is generic over the context handlers mutate.
pub struct EventDispatcher<Ctx> {
    subs: Vec<Subscription<Ctx>>,
}

impl<Ctx> Default for EventDispatcher<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ctx> EventDispatcher<Ctx> {
    pub fn new() -> Self {
        Self { subs: Vec::new() }
    }

    pub fn handler_count(&self) -> usize {
        self.subs.len()
    }

    /// Attach a handler for `kind` events on `node`.
    pub fn on(
        &mut self,
        node: NodeId,
        kind: EventKind,
        handler: impl FnMut(&mut Ctx, &DomEvent) -> EventOutcome + 'static,
    ) {
        self.subs.push(Subscription {
            node,
            kind,
            handler: Box::new(handler),
        });
    }

    /// Run every matching handler in subscription order.
    pub fn dispatch(&mut self, ctx: &mut Ctx, event: &DomEvent) -> DispatchResult {
        let mut result = DispatchResult {
            handled: false,
            default_prevented: false,
        };
        for sub in &mut self.subs {
            if sub.node != event.target() || sub.kind != event.kind() {
                continue;
            }
            result.handled = true;
            if (sub.handler)(ctx, event) == EventOutcome::PreventDefault {
                result.default_prevented = true;
            }
        }
        result
    }
}
