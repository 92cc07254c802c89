//! Keeps a floating, always-on-top control panel locked to the bounds of an
//! embedded render surface across host window transitions.

pub mod gui;
pub mod logging;
pub mod overlay;
pub mod settings;
pub mod visibility;
pub mod window_manager;
