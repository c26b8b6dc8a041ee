//! Default timing and location settings for driver operations

use lazy_static::lazy_static;
use std::env;

/// Timing configuration for element lookup and gestures
#[derive(Debug, Clone)]
pub struct ActionTimingConfig {
    /// Implicit wait applied before each element lookup (seconds)
    pub implicit_wait: u64,
    /// Press duration of a single tap (milliseconds)
    pub tap_duration_ms: u64,
    /// Press duration of a long press (milliseconds)
    pub long_press_duration_ms: u64,
    /// Duration of the pointer move that precedes a press (milliseconds)
    pub pointer_move_ms: u64,
    /// Duration of a swipe move (milliseconds)
    pub swipe_duration_ms: u64,
}

impl Default for ActionTimingConfig {
    fn default() -> Self {
        Self {
            implicit_wait: env::var("APPIUM_KIT_IMPLICIT_WAIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            tap_duration_ms: env::var("APPIUM_KIT_TAP_DURATION_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
            long_press_duration_ms: env::var("APPIUM_KIT_LONG_PRESS_DURATION_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            pointer_move_ms: env::var("APPIUM_KIT_POINTER_MOVE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(250),
            swipe_duration_ms: env::var("APPIUM_KIT_SWIPE_DURATION_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(800),
        }
    }
}

/// Session-level defaults sent as capabilities
#[derive(Debug, Clone)]
pub struct SessionTimingConfig {
    /// Seconds the server waits for a new command before ending the session
    pub new_command_timeout: u64,
    /// Seconds the Flutter driver waits for an element
    pub flutter_wait_timeout: u64,
    /// Local WebDriverAgent port for iOS sessions
    pub wda_port: u16,
}

impl Default for SessionTimingConfig {
    fn default() -> Self {
        Self {
            new_command_timeout: env::var("APPIUM_KIT_NEW_COMMAND_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(600),
            flutter_wait_timeout: env::var("APPIUM_KIT_FLUTTER_WAIT_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            wda_port: env::var("APPIUM_KIT_WDA_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8100),
        }
    }
}

/// Connection settings for the remote automation server
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub server_url: String,
    /// HTTP request timeout (seconds)
    pub request_timeout: u64,
    /// Directory screenshots are written to
    pub screenshot_dir: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            server_url: env::var("APPIUM_KIT_SERVER_URL")
                .unwrap_or_else(|_| "http://localhost:4723".to_string()),
            request_timeout: env::var("APPIUM_KIT_REQUEST_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(120),
            screenshot_dir: env::var("APPIUM_KIT_SCREENSHOT_DIR")
                .unwrap_or_else(|_| "screenshots".to_string()),
        }
    }
}

/// Master timing configuration
#[derive(Debug, Clone, Default)]
pub struct TimingConfig {
    pub action: ActionTimingConfig,
    pub session: SessionTimingConfig,
    pub connection: ConnectionConfig,
}

lazy_static! {
    /// Global timing configuration instance
    pub static ref TIMING_CONFIG: TimingConfig = TimingConfig::default();
}
