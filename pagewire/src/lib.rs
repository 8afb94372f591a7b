pub mod accordion;
pub mod collapse;
pub mod error;
pub mod navigation;
pub mod runtime;

pub use accordion::AccordionController;
pub use collapse::{Collapse, CollapseHooks, CollapsePhase, PanelState, Toolkit};
pub use error::BehaviorError;
pub use navigation::NavigationController;
pub use runtime::{PageRuntime, PageState, Request};
