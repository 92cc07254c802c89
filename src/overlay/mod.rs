pub mod buttons;
pub mod controller;
pub mod events;
pub mod geometry;
pub mod scheduler;
pub mod state;
pub mod window;

pub use buttons::{
    ActionHandler, ButtonCallback, ButtonHandle, ButtonRegistry, ButtonSpec, OverlayAction,
    BUTTON_COUNT, BUTTON_SPECS,
};
pub use controller::{OverlayController, SETUP_TIMER};
pub use events::{EventSource, OverlayEvent, WindowEventKind};
pub use geometry::{ButtonMetrics, OverlayLayout, OverlayRect, Point, Size};
pub use scheduler::{FrameScheduler, ManualScheduler, Scheduler};
pub use state::OverlayLifecycle;
pub use window::{OverlayProperties, OverlayWindow};
