//! appium_kit: convenience layer over a remote Appium session
//!
//! This library provides:
//! - Capability configuration for Android and iOS app sessions
//! - A W3C WebDriver command transport to the automation server
//! - Element lookup with a diagnostic screenshot on failure
//! - Touch gestures (tap, percentage tap, long press, swipe) as pointer action chains
//! - Timestamped screenshot saving
//!
//! # Example
//!
//! ```no_run
//! use appium_kit::{AppiumDriver, By, SessionOptions, Target};
//!
//! #[tokio::main]
//! async fn main() -> appium_kit::Result<()> {
//!     let options = SessionOptions::new()
//!         .with_app_path("/path/to/app.apk")
//!         .with_device_name("Pixel_5")
//!         .with_android_app("com.example.app", ".MainActivity");
//!
//!     let mut driver = AppiumDriver::new("android", options)?;
//!     driver.start_session("http://localhost:4723").await?;
//!
//!     driver
//!         .input_text("Hello Appium!", Target::locator(By::AccessibilityId, "searchField"))
//!         .await?;
//!     driver.tap_at_percent(0.9, 0.9).await?;
//!     driver.screenshot(Some("after_search")).await?;
//!
//!     driver.quit().await
//! }
//! ```

// Core modules
pub mod error;

// Configuration module
pub mod config;

// Remote transport
pub mod webdriver;

// Core functionality
pub mod driver;
pub mod screenshot_saver;

// Re-export commonly used types
pub use error::{AppiumError, Result};

pub use config::{
    Capabilities, CommonCapabilities, Platform, PlatformCapabilities, SessionOptions,
    TimingConfig, TIMING_CONFIG,
};

pub use webdriver::{
    By, Command, CommandExecutor, Element, HttpExecutor, Method, PointerActions, PointerKind,
    Target,
};

pub use driver::{AppiumDriver, WindowSize, ELEMENT_NOT_FOUND_TAG};

pub use screenshot_saver::ScreenshotSaver;
