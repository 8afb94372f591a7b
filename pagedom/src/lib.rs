pub mod animation;
pub mod event;
pub mod node;
pub mod selector;
pub mod timer;

pub use animation::{Easing, FadeDirection, FadeState};
pub use event::{DispatchResult, DomEvent, EventDispatcher, EventKind, EventOutcome};
pub use node::{Document, Node, NodeId};
pub use selector::{Combinator, Selector, SelectorError, SimpleSelector};
pub use timer::{TimerHandle, TimerId, Timers};
