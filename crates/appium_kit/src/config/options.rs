//! Caller-supplied session options

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Options used to build the capability configuration of a session.
///
/// Every field has a default, so a JSON file only needs the keys it
/// overrides. Android-only and iOS-only fields are ignored on the other
/// platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    pub app_path: String,
    pub device_name: String,
    pub udid: String,
    pub platform_version: String,
    pub no_reset: bool,
    pub full_reset: bool,
    /// Android entry point
    pub app_package: String,
    pub app_activity: String,
    /// iOS entry point
    pub bundle_id: String,
    pub wda_port: Option<u16>,
    /// Automation engine, `Flutter` when unset
    pub automation_name: Option<String>,
    pub new_command_timeout: Option<u64>,
    pub flutter_wait_timeout: Option<u64>,
    /// Additional capabilities; never override the keys above
    pub extra: BTreeMap<String, Value>,
    /// Where screenshots are written, `screenshots` when unset
    pub screenshot_dir: Option<PathBuf>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            app_path: String::new(),
            device_name: String::new(),
            udid: String::new(),
            platform_version: String::new(),
            no_reset: true,
            full_reset: false,
            app_package: String::new(),
            app_activity: String::new(),
            bundle_id: String::new(),
            wda_port: None,
            automation_name: None,
            new_command_timeout: None,
            flutter_wait_timeout: None,
            extra: BTreeMap::new(),
            screenshot_dir: None,
        }
    }
}

impl SessionOptions {
    /// Create options with all defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the path to the installable app bundle
    pub fn with_app_path(mut self, app_path: impl Into<String>) -> Self {
        self.app_path = app_path.into();
        self
    }

    /// Set the target device name
    pub fn with_device_name(mut self, device_name: impl Into<String>) -> Self {
        self.device_name = device_name.into();
        self
    }

    /// Set the target device UDID
    pub fn with_udid(mut self, udid: impl Into<String>) -> Self {
        self.udid = udid.into();
        self
    }

    /// Set the OS version
    pub fn with_platform_version(mut self, version: impl Into<String>) -> Self {
        self.platform_version = version.into();
        self
    }

    /// Set reset flags
    pub fn with_reset(mut self, no_reset: bool, full_reset: bool) -> Self {
        self.no_reset = no_reset;
        self.full_reset = full_reset;
        self
    }

    /// Set the Android package and launch activity
    pub fn with_android_app(
        mut self,
        app_package: impl Into<String>,
        app_activity: impl Into<String>,
    ) -> Self {
        self.app_package = app_package.into();
        self.app_activity = app_activity.into();
        self
    }

    /// Set the iOS bundle identifier
    pub fn with_bundle_id(mut self, bundle_id: impl Into<String>) -> Self {
        self.bundle_id = bundle_id.into();
        self
    }

    /// Set the local WebDriverAgent port
    pub fn with_wda_port(mut self, port: u16) -> Self {
        self.wda_port = Some(port);
        self
    }

    /// Set the automation engine
    pub fn with_automation_name(mut self, name: impl Into<String>) -> Self {
        self.automation_name = Some(name.into());
        self
    }

    /// Add an extra capability
    pub fn with_capability(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Set screenshot directory
    pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.screenshot_dir = Some(dir.into());
        self
    }
}
