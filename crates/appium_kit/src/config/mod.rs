//! Configuration module for appium_kit
//!
//! This module contains:
//! - `capabilities`: Platform-tagged capability configuration
//! - `options`: Caller-supplied session options
//! - `timing`: Environment-driven defaults for timing and locations

mod capabilities;
mod options;
mod timing;

pub use capabilities::{
    Capabilities, CommonCapabilities, Platform, PlatformCapabilities, DEFAULT_AUTOMATION_NAME,
};
pub use options::SessionOptions;
pub use timing::{
    ActionTimingConfig, ConnectionConfig, SessionTimingConfig, TimingConfig, TIMING_CONFIG,
};
