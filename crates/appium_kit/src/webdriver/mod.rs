//! WebDriver transport for the remote automation server
//!
//! This module provides:
//! - `client`: Command transport (`CommandExecutor`, reqwest-backed `HttpExecutor`)
//! - `locator`: Lookup strategies, element references and targets
//! - `actions`: Pointer action chains for gestures

mod actions;
mod client;
mod locator;

#[cfg(test)]
pub(crate) mod mock;

pub use actions::{press_gesture, swipe_gesture, PointerActions, PointerKind};
pub use client::{Command, CommandExecutor, HttpExecutor, Method};
pub use locator::{By, Element, Target, W3C_ELEMENT_KEY};

pub(crate) use client::session_id_from;
