//! appium-kit CLI - demo runner for appium_kit sessions
//!
//! Usage:
//!     appium-kit [OPTIONS] <COMMAND>
//!
//! Environment Variables:
//!     APPIUM_KIT_SERVER_URL: Automation server URL (default: http://localhost:4723)
//!     APPIUM_KIT_PLATFORM: Target platform, android or ios (default: android)
//!     APPIUM_KIT_SCREENSHOT_DIR: Directory to save screenshots (default: screenshots)
//!     RUST_LOG: Log filter (default: info)

use anyhow::{Context, Result};
use appium_kit::{AppiumDriver, By, Platform, SessionOptions, Target};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const CHROME_PACKAGE: &str = "com.android.chrome";
const CHROME_ACTIVITY: &str = "com.google.android.apps.chrome.Main";

/// appium-kit - run a demo flow against an Appium server
#[derive(Parser, Debug)]
#[command(name = "appium-kit")]
#[command(about = "Run a demo flow against an Appium server")]
#[command(after_help = r#"Examples:
    # Run the app flow on Android with options from a JSON file
    appium-kit --config android.json app

    # Run the app flow on iOS
    appium-kit --platform ios --device-name "iPhone 15" app --bundle-id com.example.app

    # Open Chrome on an Android device and load a page
    appium-kit --device-name Pixel_3_API_30 --platform-version 11.0 browser

    # Use a legacy server base path
    appium-kit --server http://localhost:4723/wd/hub browser --keep-open
"#)]
struct Cli {
    /// Automation server URL
    #[arg(long, env = "APPIUM_KIT_SERVER_URL", default_value = "http://localhost:4723")]
    server: String,

    /// Target platform (android or ios)
    #[arg(long, env = "APPIUM_KIT_PLATFORM", default_value = "android")]
    platform: String,

    /// JSON file with session options
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Target device name
    #[arg(long)]
    device_name: Option<String>,

    /// Target device UDID
    #[arg(long)]
    udid: Option<String>,

    /// OS version of the target device
    #[arg(long)]
    platform_version: Option<String>,

    /// Path to the installable app bundle
    #[arg(long)]
    app_path: Option<String>,

    /// Directory to save screenshots
    #[arg(long, env = "APPIUM_KIT_SCREENSHOT_DIR")]
    screenshot_dir: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(short = 'q', long)]
    quiet: bool,

    #[command(subcommand)]
    command: Demo,
}

#[derive(Subcommand, Debug)]
enum Demo {
    /// Type into a search field, tap near the bottom-right corner, take a screenshot
    App {
        /// Android package
        #[arg(long)]
        app_package: Option<String>,

        /// Android launch activity
        #[arg(long)]
        app_activity: Option<String>,

        /// iOS bundle identifier
        #[arg(long)]
        bundle_id: Option<String>,

        /// Locator strategy for the search field (e.g. "accessibility id", xpath, id)
        #[arg(long, default_value = "accessibility id", allow_hyphen_values = true)]
        strategy: By,

        /// Locator of the search field
        #[arg(long, default_value = "searchField")]
        search_field: String,

        /// Text typed into the search field
        #[arg(long, default_value = "Hello Appium!")]
        text: String,
    },
    /// Open Chrome on Android and navigate to a URL
    Browser {
        /// Page to open
        #[arg(long, default_value = "https://www.google.com")]
        url: String,

        /// Leave the session open when done
        #[arg(long)]
        keep_open: bool,
    },
}

fn init_tracing(quiet: bool) {
    let default_filter = if quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}

/// Session options from the config file (if any) with CLI flags applied on top
fn load_options(args: &Cli) -> Result<SessionOptions> {
    let mut options = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("invalid session options in {}", path.display()))?
        }
        None => SessionOptions::default(),
    };

    if let Some(device_name) = &args.device_name {
        options.device_name = device_name.clone();
    }
    if let Some(udid) = &args.udid {
        options.udid = udid.clone();
    }
    if let Some(version) = &args.platform_version {
        options.platform_version = version.clone();
    }
    if let Some(app_path) = &args.app_path {
        options.app_path = app_path.clone();
    }
    if let Some(dir) = &args.screenshot_dir {
        options.screenshot_dir = Some(dir.clone());
    }

    if let Demo::App {
        app_package,
        app_activity,
        bundle_id,
        ..
    } = &args.command
    {
        if let Some(package) = app_package {
            options.app_package = package.clone();
        }
        if let Some(activity) = app_activity {
            options.app_activity = activity.clone();
        }
        if let Some(bundle_id) = bundle_id {
            options.bundle_id = bundle_id.clone();
        }
    }

    Ok(options)
}

/// Options for a Chrome session on Android
fn browser_options(options: SessionOptions) -> SessionOptions {
    options
        .with_automation_name("UiAutomator2")
        .with_android_app(CHROME_PACKAGE, CHROME_ACTIVITY)
        .with_capability("autoGrantPermissions", true)
}

async fn run_app_flow(
    driver: &AppiumDriver,
    strategy: By,
    search_field: &str,
    text: &str,
) -> Result<()> {
    let field = driver.find(strategy, search_field).await?;
    driver.input_text(text, Target::Element(field)).await?;

    let (x, y) = driver.tap_at_percent(0.9, 0.9).await?;
    info!("Tapped at ({}, {})", x, y);

    let path = driver.screenshot(Some("after_search")).await?;
    println!("Screenshot saved: {}", path.display());
    Ok(())
}

async fn run_app_demo(
    args: &Cli,
    options: SessionOptions,
    strategy: By,
    search_field: &str,
    text: &str,
) -> Result<()> {
    let mut driver = AppiumDriver::new(&args.platform, options)?;
    driver
        .start_session(&args.server)
        .await
        .with_context(|| format!("failed to start session on {}", args.server))?;

    let outcome = run_app_flow(&driver, strategy, search_field, text).await;
    let quit = driver.quit().await;

    finish(outcome, Some(quit))
}

async fn run_browser_demo(
    args: &Cli,
    options: SessionOptions,
    url: &str,
    keep_open: bool,
) -> Result<()> {
    let mut driver = AppiumDriver::with_platform(Platform::Android, browser_options(options));
    driver
        .start_session(&args.server)
        .await
        .with_context(|| format!("failed to start session on {}", args.server))?;

    let outcome = driver.navigate(url).await;
    if outcome.is_ok() {
        println!("Opened {}", url);
    }

    let quit = if keep_open {
        if let Some(id) = driver.session_id() {
            println!("Session {} left open", id);
        }
        None
    } else {
        Some(driver.quit().await)
    };

    finish(outcome.map_err(Into::into), quit)
}

/// Demo result: the flow error wins over a quit error
fn finish(
    outcome: Result<()>,
    quit: Option<std::result::Result<(), appium_kit::AppiumError>>,
) -> Result<()> {
    if let Err(e) = outcome {
        if let Some(Err(quit_err)) = quit {
            warn!("Quit also failed: {}", quit_err);
        }
        return Err(e);
    }
    if let Some(quit) = quit {
        quit.context("failed to close the session")?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.quiet);

    let options = load_options(&args)?;

    match &args.command {
        Demo::App {
            strategy,
            search_field,
            text,
            ..
        } => run_app_demo(&args, options, *strategy, search_field, text).await,
        Demo::Browser { url, keep_open } => {
            run_browser_demo(&args, options, url, *keep_open).await
        }
    }
}
