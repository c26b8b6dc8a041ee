//! Session wrapper around a remote Appium server

use serde::Deserialize;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::{Capabilities, Platform, SessionOptions, TIMING_CONFIG};
use crate::error::{AppiumError, Result};
use crate::screenshot_saver::ScreenshotSaver;
use crate::webdriver::{
    press_gesture, session_id_from, swipe_gesture, By, Command, CommandExecutor, Element,
    HttpExecutor, PointerActions, Target,
};

/// Screenshot tag used when an element lookup fails
pub const ELEMENT_NOT_FOUND_TAG: &str = "element_not_found";

/// Window size reported by the remote session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

/// An open remote session
struct Session {
    id: String,
    executor: Box<dyn CommandExecutor>,
    capabilities: Value,
}

impl Session {
    fn path(&self, suffix: &str) -> String {
        format!("/session/{}{}", self.id, suffix)
    }
}

/// Convenience driver for an Android or iOS app session.
///
/// Built from a platform and [`SessionOptions`]; every operation other than
/// [`AppiumDriver::start_session`] requires an open session and fails with
/// [`AppiumError::SessionNotStarted`] otherwise.
pub struct AppiumDriver {
    capabilities: Capabilities,
    screenshots: ScreenshotSaver,
    session: Option<Session>,
}

impl AppiumDriver {
    /// Create a driver for a platform given by name
    ///
    /// # Arguments
    /// * `platform` - `android` or `ios`, in any case
    /// * `options` - Session options the capabilities are built from
    ///
    /// # Returns
    /// A driver without an open session, or
    /// [`AppiumError::UnsupportedPlatform`] for any other name
    pub fn new(platform: &str, options: SessionOptions) -> Result<Self> {
        let platform: Platform = platform.parse()?;
        Ok(Self::with_platform(platform, options))
    }

    /// Create a driver for an already parsed platform
    pub fn with_platform(platform: Platform, options: SessionOptions) -> Self {
        let screenshot_dir = options
            .screenshot_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&TIMING_CONFIG.connection.screenshot_dir));

        Self {
            capabilities: Capabilities::new(platform, &options),
            screenshots: ScreenshotSaver::new(screenshot_dir),
            session: None,
        }
    }

    /// Capability configuration sent when the session starts
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    pub fn platform(&self) -> Platform {
        self.capabilities.platform()
    }

    pub fn is_started(&self) -> bool {
        self.session.is_some()
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.id.as_str())
    }

    /// Capabilities the server reported for the open session
    pub fn session_capabilities(&self) -> Option<&Value> {
        self.session.as_ref().map(|s| &s.capabilities)
    }

    /// Directory screenshots are written to
    pub fn screenshot_dir(&self) -> &std::path::Path {
        self.screenshots.dir()
    }

    /// Open a session on the server at `server_url`
    ///
    /// Connection failures are returned unchanged; there is no retry.
    ///
    /// # Arguments
    /// * `server_url` - Server base URL, e.g. `http://localhost:4723` or
    ///   `http://localhost:4723/wd/hub`
    ///
    /// # Returns
    /// The id of the new session
    pub async fn start_session(&mut self, server_url: &str) -> Result<&str> {
        let executor = HttpExecutor::new(
            server_url,
            Duration::from_secs(TIMING_CONFIG.connection.request_timeout),
        )?;
        info!("Connecting to automation server at {}", executor.base_url());
        self.start_session_with(executor).await
    }

    /// Open a session on the configured server (`http://localhost:4723`
    /// unless `APPIUM_KIT_SERVER_URL` is set)
    pub async fn start_default_session(&mut self) -> Result<&str> {
        self.start_session(&TIMING_CONFIG.connection.server_url)
            .await
    }

    /// Open a session through a caller-provided transport
    ///
    /// A session that is still open is quit first. If that fails the error
    /// is returned and no new session is requested.
    pub async fn start_session_with(
        &mut self,
        executor: impl CommandExecutor + 'static,
    ) -> Result<&str> {
        if let Some(previous) = self.session_id().map(str::to_string) {
            info!("Closing session {} before starting a new one", previous);
            self.quit().await?;
        }

        let body = executor
            .execute(Command::post("/session", self.capabilities.to_w3c()))
            .await?;
        let id = session_id_from(&body)?;
        let capabilities = body
            .get("value")
            .and_then(|v| v.get("capabilities"))
            .or_else(|| body.get("value"))
            .cloned()
            .unwrap_or(Value::Null);

        info!("Started {} session {}", self.platform(), id);

        let session = self.session.insert(Session {
            id,
            executor: Box::new(executor),
            capabilities,
        });
        Ok(&session.id)
    }

    fn session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(AppiumError::SessionNotStarted)
    }

    async fn send(&self, command: Command) -> Result<Value> {
        let session = self.session()?;
        session.executor.execute(command).await
    }

    fn path(&self, suffix: &str) -> Result<String> {
        Ok(self.session()?.path(suffix))
    }

    /// Find an element, waiting up to `timeout` for it to appear.
    ///
    /// On failure a screenshot tagged `element_not_found` is attempted and
    /// an [`AppiumError::ElementNotFound`] carrying the locator is returned.
    ///
    /// # Arguments
    /// * `by` - Locator strategy
    /// * `value` - Locator value for the strategy
    /// * `timeout` - Implicit wait set on the session before the lookup
    ///
    /// # Returns
    /// Reference to the first matching element
    pub async fn find_element(&self, by: By, value: &str, timeout: Duration) -> Result<Element> {
        let timeouts = json!({ "implicit": timeout.as_millis() as u64 });
        self.send(Command::post(self.path("/timeouts")?, timeouts))
            .await?;

        let lookup = json!({ "using": by.as_str(), "value": value });
        let result = self
            .send(Command::post(self.path("/element")?, lookup))
            .await
            .and_then(|v| {
                Element::from_value(&v).ok_or_else(|| {
                    AppiumError::InvalidResponse(format!("no element reference in {}", v))
                })
            });

        match result {
            Ok(element) => {
                debug!("Found element {} via {} '{}'", element.id(), by, value);
                Ok(element)
            }
            Err(e) => {
                warn!("Element not found: {} ({}): {}", value, by, e);
                if let Err(shot_err) = self.screenshot(Some(ELEMENT_NOT_FOUND_TAG)).await {
                    warn!("Diagnostic screenshot failed: {}", shot_err);
                }
                Err(AppiumError::ElementNotFound {
                    strategy: by.to_string(),
                    locator: value.to_string(),
                    message: e.to_string(),
                })
            }
        }
    }

    /// Find an element with the default implicit wait
    pub async fn find(&self, by: By, value: &str) -> Result<Element> {
        let timeout = Duration::from_secs(TIMING_CONFIG.action.implicit_wait);
        self.find_element(by, value, timeout).await
    }

    async fn resolve(&self, target: Target) -> Result<Element> {
        match target {
            Target::Element(element) => Ok(element),
            Target::Locator(by, value) => self.find(by, &value).await,
        }
    }

    /// Click an element or the element a locator resolves to
    ///
    /// # Arguments
    /// * `target` - An [`Element`] or a `(By, &str)` locator pair
    pub async fn click(&self, target: impl Into<Target>) -> Result<()> {
        let element = self.resolve(target.into()).await?;
        let path = self.path(&format!("/element/{}/click", element.id()))?;
        self.send(Command::post(path, json!({}))).await?;
        Ok(())
    }

    /// Clear an element's content, then type into it
    ///
    /// # Arguments
    /// * `text` - Text to type
    /// * `target` - An [`Element`] or a `(By, &str)` locator pair; a locator
    ///   is looked up with the default implicit wait
    pub async fn input_text(&self, text: &str, target: impl Into<Target>) -> Result<()> {
        let element = self.resolve(target.into()).await?;

        let clear = self.path(&format!("/element/{}/clear", element.id()))?;
        self.send(Command::post(clear, json!({}))).await?;

        let value = self.path(&format!("/element/{}/value", element.id()))?;
        let chars: Vec<String> = text.chars().map(String::from).collect();
        self.send(Command::post(value, json!({ "text": text, "value": chars })))
            .await?;
        Ok(())
    }

    /// Execute a pointer action chain as one atomic action
    pub async fn perform(&self, actions: PointerActions) -> Result<()> {
        let path = self.path("/actions")?;
        self.send(Command::post(path, actions.into_payload()))
            .await?;
        Ok(())
    }

    /// Tap at screen coordinates with a touch pointer
    ///
    /// # Arguments
    /// * `x`, `y` - Point in window pixels
    /// * `duration_ms` - Press duration, `APPIUM_KIT_TAP_DURATION_MS` when `None`
    pub async fn tap_at(&self, x: i32, y: i32, duration_ms: Option<u64>) -> Result<()> {
        let duration_ms = duration_ms.unwrap_or(TIMING_CONFIG.action.tap_duration_ms);
        debug!("Tap at ({}, {}) for {}ms", x, y, duration_ms);
        self.perform(press_gesture(
            x,
            y,
            duration_ms,
            TIMING_CONFIG.action.pointer_move_ms,
        ))
        .await
    }

    /// Tap at a position relative to the window size.
    ///
    /// Coordinates are truncated to integers; percentages are not bounds
    /// checked.
    ///
    /// # Arguments
    /// * `x_percent` - Fraction of the window width (0.9 is 90%)
    /// * `y_percent` - Fraction of the window height
    ///
    /// # Returns
    /// The tapped point in pixels
    pub async fn tap_at_percent(&self, x_percent: f64, y_percent: f64) -> Result<(i32, i32)> {
        let size = self.window_size().await?;
        let x = (size.width as f64 * x_percent) as i32;
        let y = (size.height as f64 * y_percent) as i32;
        self.tap_at(x, y, None).await?;
        Ok((x, y))
    }

    /// Press and hold at screen coordinates
    pub async fn long_press(&self, x: i32, y: i32, duration_ms: Option<u64>) -> Result<()> {
        let duration_ms = duration_ms.unwrap_or(TIMING_CONFIG.action.long_press_duration_ms);
        self.perform(press_gesture(
            x,
            y,
            duration_ms,
            TIMING_CONFIG.action.pointer_move_ms,
        ))
        .await
    }

    /// Drag from one point to another
    pub async fn swipe(
        &self,
        from: (i32, i32),
        to: (i32, i32),
        duration_ms: Option<u64>,
    ) -> Result<()> {
        let duration_ms = duration_ms.unwrap_or(TIMING_CONFIG.action.swipe_duration_ms);
        self.perform(swipe_gesture(from, to, duration_ms)).await
    }

    /// Capture the screen and save it to the screenshot directory
    ///
    /// # Arguments
    /// * `name` - Optional tag placed in the filename
    ///
    /// # Returns
    /// Path to the saved PNG file
    pub async fn screenshot(&self, name: Option<&str>) -> Result<PathBuf> {
        let path = self.path("/screenshot")?;
        let data = self.send(Command::get(path)).await?;
        let data = data.as_str().ok_or_else(|| {
            AppiumError::InvalidResponse("screenshot is not a base64 string".to_string())
        })?;
        self.screenshots.save(name, data).await
    }

    /// Current window size
    pub async fn window_size(&self) -> Result<WindowSize> {
        let path = self.path("/window/rect")?;
        let rect = self.send(Command::get(path)).await?;
        Ok(serde_json::from_value(rect)?)
    }

    /// Navigate a browser session to `url`
    pub async fn navigate(&self, url: &str) -> Result<()> {
        let path = self.path("/url")?;
        self.send(Command::post(path, json!({ "url": url })))
            .await?;
        Ok(())
    }

    /// End the session if one is open
    ///
    /// The session is dropped even when the server rejects the request, so
    /// calling again is a no-op.
    pub async fn quit(&mut self) -> Result<()> {
        let Some(session) = self.session.take() else {
            return Ok(());
        };
        session
            .executor
            .execute(Command::delete(session.path("")))
            .await?;
        info!("Closed session {}", session.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::webdriver::mock::{self, MockExecutor};
    use crate::webdriver::Method;
    use std::sync::{Arc, Mutex};
    use tempfile::{tempdir, TempDir};

    type Calls = Arc<Mutex<Vec<Command>>>;

    async fn started(executor: MockExecutor) -> (AppiumDriver, Calls, TempDir) {
        let temp_dir = tempdir().unwrap();
        let options = SessionOptions::new()
            .with_android_app("com.example.app", ".MainActivity")
            .with_screenshot_dir(temp_dir.path().join("screenshots"));
        let mut driver = AppiumDriver::new("android", options).unwrap();
        let calls = executor.calls();
        driver.start_session_with(executor).await.unwrap();
        (driver, calls, temp_dir)
    }

    fn paths(calls: &Calls) -> Vec<(Method, String)> {
        calls
            .lock()
            .unwrap()
            .iter()
            .map(|c| (c.method, c.path.clone()))
            .collect()
    }

    fn screenshot_count(driver: &AppiumDriver) -> usize {
        std::fs::read_dir(driver.screenshot_dir())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    #[test]
    fn test_new_accepts_platforms_in_any_case() {
        for platform in ["android", "Android", "ANDROID"] {
            let driver = AppiumDriver::new(platform, SessionOptions::default()).unwrap();
            assert_eq!(driver.platform(), Platform::Android);
        }
        for platform in ["ios", "iOS", "IOS"] {
            let driver = AppiumDriver::new(platform, SessionOptions::default()).unwrap();
            assert_eq!(driver.platform(), Platform::Ios);
        }
    }

    #[test]
    fn test_new_rejects_unknown_platform() {
        let err = AppiumDriver::new("symbian", SessionOptions::default())
            .err()
            .unwrap();
        assert!(matches!(err, AppiumError::UnsupportedPlatform(_)));
        assert_eq!(err.to_string(), "Unsupported platform: symbian");
    }

    #[tokio::test]
    async fn test_operations_before_start_fail() {
        let driver = AppiumDriver::new("android", SessionOptions::default()).unwrap();
        assert!(!driver.is_started());
        assert!(matches!(
            driver.window_size().await,
            Err(AppiumError::SessionNotStarted)
        ));
        assert!(matches!(
            driver.tap_at(1, 1, None).await,
            Err(AppiumError::SessionNotStarted)
        ));
        assert!(matches!(
            driver.click(Element::new("e")).await,
            Err(AppiumError::SessionNotStarted)
        ));
    }

    #[tokio::test]
    async fn test_start_session_sends_capabilities() {
        let (driver, calls, _dir) = started(MockExecutor::healthy()).await;

        assert!(driver.is_started());
        assert_eq!(driver.session_id(), Some(mock::SESSION_ID));
        assert_eq!(
            driver.session_capabilities().unwrap()["platformName"],
            "Android"
        );

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, Method::Post);
        assert_eq!(calls[0].path, "/session");
        let always = &calls[0].body.as_ref().unwrap()["capabilities"]["alwaysMatch"];
        assert_eq!(always["appium:appPackage"], "com.example.app");
        assert_eq!(always["appium:automationName"], "Flutter");
    }

    #[tokio::test]
    async fn test_start_session_propagates_transport_error() {
        let mut driver = AppiumDriver::new("ios", SessionOptions::default()).unwrap();
        let executor = MockExecutor::new(|_| {
            Err(AppiumError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )))
        });
        let err = driver.start_session_with(executor).await.unwrap_err();
        assert!(matches!(err, AppiumError::Io(_)));
        assert!(!driver.is_started());
    }

    #[tokio::test]
    async fn test_tap_at_percent_uses_window_size() {
        let (driver, calls, _dir) = started(MockExecutor::healthy()).await;

        let point = driver.tap_at_percent(0.5, 0.5).await.unwrap();
        assert_eq!(point, (100, 50));

        let calls = calls.lock().unwrap();
        let tap = calls.last().unwrap();
        assert_eq!(tap.path, mock::session_path("/actions"));
        let ticks = &tap.body.as_ref().unwrap()["actions"][0]["actions"];
        assert_eq!(ticks[0]["type"], "pointerMove");
        assert_eq!(ticks[0]["x"], 100);
        assert_eq!(ticks[0]["y"], 50);
        assert_eq!(ticks[2]["duration"], TIMING_CONFIG.action.tap_duration_ms);
    }

    #[tokio::test]
    async fn test_tap_at_percent_truncates() {
        let (driver, _calls, _dir) = started(MockExecutor::healthy()).await;
        assert_eq!(driver.tap_at_percent(0.9, 0.9).await.unwrap(), (180, 90));
        assert_eq!(driver.tap_at_percent(0.333, 0.999).await.unwrap(), (66, 99));
    }

    #[tokio::test]
    async fn test_tap_at_explicit_duration() {
        let (driver, calls, _dir) = started(MockExecutor::healthy()).await;
        driver.tap_at(10, 20, Some(300)).await.unwrap();

        let calls = calls.lock().unwrap();
        let source = &calls.last().unwrap().body.as_ref().unwrap()["actions"][0];
        assert_eq!(source["parameters"]["pointerType"], "touch");
        assert_eq!(source["actions"][1]["type"], "pointerDown");
        assert_eq!(source["actions"][2]["duration"], 300);
        assert_eq!(source["actions"][3]["type"], "pointerUp");
    }

    #[tokio::test]
    async fn test_find_element_success() {
        let (driver, calls, _dir) = started(MockExecutor::healthy()).await;

        let element = driver
            .find_element(By::AccessibilityId, "searchField", Duration::from_secs(2))
            .await
            .unwrap();
        assert_eq!(element.id(), "el-1");

        let calls = calls.lock().unwrap();
        assert_eq!(calls[1].path, mock::session_path("/timeouts"));
        assert_eq!(calls[1].body.as_ref().unwrap()["implicit"], 2000);
        assert_eq!(calls[2].path, mock::session_path("/element"));
        assert_eq!(calls[2].body.as_ref().unwrap()["using"], "accessibility id");
        assert_eq!(calls[2].body.as_ref().unwrap()["value"], "searchField");
    }

    #[tokio::test]
    async fn test_find_element_miss_takes_one_screenshot() {
        let (driver, calls, _dir) = started(MockExecutor::new(mock::missing_elements)).await;

        let err = driver
            .find_element(By::AccessibilityId, "searchField", Duration::from_secs(1))
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("searchField"));
        assert!(message.contains("accessibility id"));
        assert!(message.contains("no such element"));
        assert!(matches!(err, AppiumError::ElementNotFound { .. }));

        let screenshot_calls = paths(&calls)
            .into_iter()
            .filter(|(_, p)| p.ends_with("/screenshot"))
            .count();
        assert_eq!(screenshot_calls, 1);
        assert_eq!(screenshot_count(&driver), 1);

        let entry = std::fs::read_dir(driver.screenshot_dir())
            .unwrap()
            .next()
            .unwrap()
            .unwrap();
        assert!(entry
            .file_name()
            .to_string_lossy()
            .starts_with("screenshot_element_not_found_"));
    }

    #[tokio::test]
    async fn test_find_element_miss_when_screenshot_fails() {
        let executor = MockExecutor::new(|command| {
            if command.path.ends_with("/screenshot") {
                return Err(AppiumError::WebDriver {
                    error: "unknown error".to_string(),
                    message: "screen is secure".to_string(),
                });
            }
            mock::missing_elements(command)
        });
        let (driver, _calls, _dir) = started(executor).await;

        let err = driver.find(By::Id, "login").await.unwrap_err();
        assert!(matches!(
            err,
            AppiumError::ElementNotFound { ref locator, ref strategy, .. }
                if locator == "login" && strategy == "id"
        ));
        assert_eq!(screenshot_count(&driver), 0);
    }

    #[tokio::test]
    async fn test_click_with_locator_resolves_first() {
        let (driver, calls, _dir) = started(MockExecutor::healthy()).await;
        driver.click((By::Id, "login")).await.unwrap();

        let paths = paths(&calls);
        assert_eq!(paths.len(), 4);
        assert_eq!(paths[1].1, mock::session_path("/timeouts"));
        assert_eq!(paths[2].1, mock::session_path("/element"));
        assert_eq!(paths[3], (Method::Post, mock::session_path("/element/el-1/click")));
    }

    #[tokio::test]
    async fn test_click_with_element_skips_lookup() {
        let (driver, calls, _dir) = started(MockExecutor::healthy()).await;
        driver.click(Element::new("el-9")).await.unwrap();

        let paths = paths(&calls);
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[1].1, mock::session_path("/element/el-9/click"));
    }

    #[tokio::test]
    async fn test_click_without_target_makes_no_calls() {
        let (driver, calls, _dir) = started(MockExecutor::healthy()).await;

        let result = match Target::from_parts(None, Some(By::Id), None) {
            Ok(target) => driver.click(target).await,
            Err(e) => Err(e),
        };

        assert!(matches!(result, Err(AppiumError::MissingTarget)));
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_input_text_clears_then_types() {
        let (driver, calls, _dir) = started(MockExecutor::healthy()).await;
        driver
            .input_text("Hi!", Target::locator(By::AccessibilityId, "searchField"))
            .await
            .unwrap();

        let calls = calls.lock().unwrap();
        let n = calls.len();
        assert_eq!(calls[n - 2].path, mock::session_path("/element/el-1/clear"));
        assert_eq!(calls[n - 1].path, mock::session_path("/element/el-1/value"));
        let body = calls[n - 1].body.as_ref().unwrap();
        assert_eq!(body["text"], "Hi!");
        assert_eq!(body["value"], json!(["H", "i", "!"]));
    }

    #[tokio::test]
    async fn test_window_size() {
        let (driver, _calls, _dir) = started(MockExecutor::healthy()).await;
        assert_eq!(
            driver.window_size().await.unwrap(),
            WindowSize {
                width: 200,
                height: 100
            }
        );
    }

    #[tokio::test]
    async fn test_screenshot_twice_creates_directory_once() {
        let (driver, _calls, _dir) = started(MockExecutor::healthy()).await;
        assert!(!driver.screenshot_dir().exists());

        let first = driver.screenshot(Some("x")).await.unwrap();
        let second = driver.screenshot(Some("x")).await.unwrap();

        assert!(first.exists());
        assert!(second.exists());
        assert!(first.starts_with(driver.screenshot_dir()));
        let name = first.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("screenshot_x_"));
        assert_eq!(name.len(), "screenshot_x_YYYYMMDD_HHMMSS.png".len());
    }

    #[tokio::test]
    async fn test_navigate() {
        let (driver, calls, _dir) = started(MockExecutor::healthy()).await;
        driver.navigate("https://www.google.com").await.unwrap();

        let calls = calls.lock().unwrap();
        let last = calls.last().unwrap();
        assert_eq!(last.path, mock::session_path("/url"));
        assert_eq!(last.body.as_ref().unwrap()["url"], "https://www.google.com");
    }

    #[tokio::test]
    async fn test_swipe_and_long_press() {
        let (driver, calls, _dir) = started(MockExecutor::healthy()).await;
        driver.swipe((100, 80), (100, 10), Some(400)).await.unwrap();
        driver.long_press(5, 5, Some(1500)).await.unwrap();

        let calls = calls.lock().unwrap();
        let n = calls.len();
        let swipe = &calls[n - 2].body.as_ref().unwrap()["actions"][0]["actions"];
        assert_eq!(swipe[2]["y"], 10);
        assert_eq!(swipe[2]["duration"], 400);
        let press = &calls[n - 1].body.as_ref().unwrap()["actions"][0]["actions"];
        assert_eq!(press[2]["duration"], 1500);
    }

    #[tokio::test]
    async fn test_quit_is_idempotent() {
        let (mut driver, calls, _dir) = started(MockExecutor::healthy()).await;

        driver.quit().await.unwrap();
        driver.quit().await.unwrap();

        assert!(!driver.is_started());
        let deletes: Vec<_> = paths(&calls)
            .into_iter()
            .filter(|(m, _)| *m == Method::Delete)
            .collect();
        assert_eq!(deletes, vec![(Method::Delete, mock::session_path(""))]);
    }

    #[tokio::test]
    async fn test_restart_quits_previous_session() {
        let (mut driver, first_calls, _dir) = started(MockExecutor::healthy()).await;

        let second = MockExecutor::healthy();
        let second_calls = second.calls();
        driver.start_session_with(second).await.unwrap();

        assert_eq!(
            paths(&first_calls),
            vec![
                (Method::Post, "/session".to_string()),
                (Method::Delete, mock::session_path("")),
            ]
        );
        assert_eq!(paths(&second_calls), vec![(Method::Post, "/session".to_string())]);
        assert!(driver.is_started());

        driver.quit().await.unwrap();
        assert_eq!(paths(&second_calls).len(), 2);
        assert_eq!(paths(&first_calls).len(), 2);
    }

    #[tokio::test]
    async fn test_restart_stops_when_previous_quit_fails() {
        let failing_delete = MockExecutor::new(|command| {
            if command.method == Method::Delete {
                return Err(AppiumError::WebDriver {
                    error: "invalid session id".to_string(),
                    message: "session is gone".to_string(),
                });
            }
            mock::healthy_response(command)
        });
        let (mut driver, _calls, _dir) = started(failing_delete).await;

        let second = MockExecutor::healthy();
        let second_calls = second.calls();
        let err = driver.start_session_with(second).await.unwrap_err();

        assert!(matches!(err, AppiumError::WebDriver { .. }));
        assert!(paths(&second_calls).is_empty());
        assert!(!driver.is_started());
    }

    #[tokio::test]
    async fn test_quit_without_session() {
        let mut driver = AppiumDriver::new("ios", SessionOptions::default()).unwrap();
        driver.quit().await.unwrap();
        driver.quit().await.unwrap();
    }
}
