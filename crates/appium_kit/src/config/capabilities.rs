//! Capability configuration for a remote automation session

use serde_json::{json, Map, Value};
use std::fmt;
use std::str::FromStr;

use super::options::SessionOptions;
use super::timing::TIMING_CONFIG;
use crate::error::AppiumError;
use tracing::warn;

/// Default automation engine
pub const DEFAULT_AUTOMATION_NAME: &str = "Flutter";

/// Capability names defined by the W3C WebDriver standard; all others get the
/// `appium:` vendor prefix.
const W3C_CAPABILITIES: &[&str] = &[
    "browserName",
    "browserVersion",
    "platformName",
    "acceptInsecureCerts",
    "pageLoadStrategy",
    "proxy",
    "setWindowRect",
    "timeouts",
    "strictFileInteractability",
    "unhandledPromptBehavior",
    "webSocketUrl",
];

/// Keys owned by the fixed configuration of either platform; extra
/// capabilities with these names are dropped.
const RESERVED_CAPABILITIES: &[&str] = &[
    "platformName",
    "automationName",
    "app",
    "deviceName",
    "udid",
    "platformVersion",
    "newCommandTimeout",
    "noReset",
    "fullReset",
    "flutterWaitTimeout",
    "appPackage",
    "appActivity",
    "bundleId",
    "wdaLocalPort",
];

/// Capability name without the `appium:` vendor prefix
fn bare_key(key: &str) -> &str {
    key.strip_prefix("appium:").unwrap_or(key)
}

fn is_reserved(key: &str) -> bool {
    RESERVED_CAPABILITIES.contains(&bare_key(key))
}

/// Target mobile platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Android,
    Ios,
}

impl Platform {
    /// Value sent as `platformName`
    pub fn platform_name(&self) -> &'static str {
        match self {
            Self::Android => "Android",
            Self::Ios => "iOS",
        }
    }
}

impl FromStr for Platform {
    type Err = AppiumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "android" => Ok(Self::Android),
            "ios" => Ok(Self::Ios),
            _ => Err(AppiumError::UnsupportedPlatform(s.to_string())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Android => write!(f, "android"),
            Self::Ios => write!(f, "ios"),
        }
    }
}

/// Capabilities shared by both platforms
#[derive(Debug, Clone, PartialEq)]
pub struct CommonCapabilities {
    pub platform_name: String,
    pub automation_name: String,
    pub app: String,
    pub device_name: String,
    pub udid: String,
    pub platform_version: String,
    pub new_command_timeout: u64,
    pub no_reset: bool,
    pub full_reset: bool,
    pub flutter_wait_timeout: u64,
}

/// Platform-specific app entry point
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformCapabilities {
    Android {
        app_package: String,
        app_activity: String,
    },
    Ios {
        bundle_id: String,
        wda_port: u16,
    },
}

/// Complete capability configuration, fixed once built
#[derive(Debug, Clone, PartialEq)]
pub struct Capabilities {
    pub common: CommonCapabilities,
    pub platform: PlatformCapabilities,
    pub extra: Map<String, Value>,
}

impl Capabilities {
    /// Build capabilities for `platform` from caller options
    pub fn new(platform: Platform, options: &SessionOptions) -> Self {
        let common = CommonCapabilities {
            platform_name: platform.platform_name().to_string(),
            automation_name: options
                .automation_name
                .clone()
                .unwrap_or_else(|| DEFAULT_AUTOMATION_NAME.to_string()),
            app: options.app_path.clone(),
            device_name: options.device_name.clone(),
            udid: options.udid.clone(),
            platform_version: options.platform_version.clone(),
            new_command_timeout: options
                .new_command_timeout
                .unwrap_or(TIMING_CONFIG.session.new_command_timeout),
            no_reset: options.no_reset,
            full_reset: options.full_reset,
            flutter_wait_timeout: options
                .flutter_wait_timeout
                .unwrap_or(TIMING_CONFIG.session.flutter_wait_timeout),
        };

        let platform = match platform {
            Platform::Android => PlatformCapabilities::Android {
                app_package: options.app_package.clone(),
                app_activity: options.app_activity.clone(),
            },
            Platform::Ios => PlatformCapabilities::Ios {
                bundle_id: options.bundle_id.clone(),
                wda_port: options.wda_port.unwrap_or(TIMING_CONFIG.session.wda_port),
            },
        };

        let mut extra = Map::new();
        for (key, value) in &options.extra {
            if is_reserved(key) {
                warn!("Ignoring extra capability {}: set by the session options", key);
                continue;
            }
            extra.insert(bare_key(key).to_string(), value.clone());
        }

        Self {
            common,
            platform,
            extra,
        }
    }

    /// Platform these capabilities were built for
    pub fn platform(&self) -> Platform {
        match self.platform {
            PlatformCapabilities::Android { .. } => Platform::Android,
            PlatformCapabilities::Ios { .. } => Platform::Ios,
        }
    }

    /// Flat capability map with unprefixed keys.
    ///
    /// Holds the common keys, exactly one platform's keys, and any extra
    /// capability whose bare name is not one of those.
    pub fn to_map(&self) -> Map<String, Value> {
        let c = &self.common;
        let mut map = Map::new();
        map.insert("platformName".into(), json!(c.platform_name));
        map.insert("automationName".into(), json!(c.automation_name));
        map.insert("app".into(), json!(c.app));
        map.insert("deviceName".into(), json!(c.device_name));
        map.insert("udid".into(), json!(c.udid));
        map.insert("platformVersion".into(), json!(c.platform_version));
        map.insert("newCommandTimeout".into(), json!(c.new_command_timeout));
        map.insert("noReset".into(), json!(c.no_reset));
        map.insert("fullReset".into(), json!(c.full_reset));
        map.insert("flutterWaitTimeout".into(), json!(c.flutter_wait_timeout));

        match &self.platform {
            PlatformCapabilities::Android {
                app_package,
                app_activity,
            } => {
                map.insert("appPackage".into(), json!(app_package));
                map.insert("appActivity".into(), json!(app_activity));
            }
            PlatformCapabilities::Ios {
                bundle_id,
                wda_port,
            } => {
                map.insert("bundleId".into(), json!(bundle_id));
                map.insert("wdaLocalPort".into(), json!(wda_port));
            }
        }

        for (key, value) in &self.extra {
            if !is_reserved(key) {
                map.insert(bare_key(key).to_string(), value.clone());
            }
        }

        map
    }

    /// New-session payload with vendor-prefixed keys
    pub fn to_w3c(&self) -> Value {
        let always_match: Map<String, Value> = self
            .to_map()
            .into_iter()
            .map(|(key, value)| {
                if key.contains(':') || W3C_CAPABILITIES.contains(&key.as_str()) {
                    (key, value)
                } else {
                    (format!("appium:{}", key), value)
                }
            })
            .collect();

        json!({
            "capabilities": {
                "alwaysMatch": always_match,
                "firstMatch": [{}],
            }
        })
    }
}
