//! Usage module - tool-usage events and windowed reads over them.

mod event;
mod window;

pub use event::{tools, ContextSnapshot, EnergyLevel, UsageEvent};
pub use window::EventWindow;
