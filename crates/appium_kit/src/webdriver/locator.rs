//! Element locators and references

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::AppiumError;

/// Key under which W3C servers return element ids
pub const W3C_ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";
/// Key used by legacy JSONWP servers
const LEGACY_ELEMENT_KEY: &str = "ELEMENT";

/// Element lookup strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum By {
    #[default]
    AccessibilityId,
    Id,
    XPath,
    ClassName,
    Name,
    CssSelector,
    AndroidUiAutomator,
    IosPredicate,
    IosClassChain,
}

impl By {
    /// Strategy name sent as `using`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccessibilityId => "accessibility id",
            Self::Id => "id",
            Self::XPath => "xpath",
            Self::ClassName => "class name",
            Self::Name => "name",
            Self::CssSelector => "css selector",
            Self::AndroidUiAutomator => "-android uiautomator",
            Self::IosPredicate => "-ios predicate string",
            Self::IosClassChain => "-ios class chain",
        }
    }
}

impl fmt::Display for By {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for By {
    type Err = AppiumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let by = match s.to_lowercase().replace(['_', '-'], " ").trim() {
            "accessibility id" | "accessibility" => Self::AccessibilityId,
            "id" => Self::Id,
            "xpath" => Self::XPath,
            "class name" | "class" => Self::ClassName,
            "name" => Self::Name,
            "css selector" | "css" => Self::CssSelector,
            "android uiautomator" => Self::AndroidUiAutomator,
            "ios predicate string" | "ios predicate" => Self::IosPredicate,
            "ios class chain" => Self::IosClassChain,
            _ => return Err(AppiumError::UnknownStrategy(s.to_string())),
        };
        Ok(by)
    }
}

/// Reference to an element inside the remote session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    id: String,
}

impl Element {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Parse a `find element` result
    pub fn from_value(value: &Value) -> Option<Self> {
        value
            .get(W3C_ELEMENT_KEY)
            .or_else(|| value.get(LEGACY_ELEMENT_KEY))
            .and_then(Value::as_str)
            .map(Self::new)
    }
}

/// What an element operation acts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// An element already looked up
    Element(Element),
    /// A strategy and locator value, resolved on use
    Locator(By, String),
}

impl Target {
    pub fn locator(by: By, value: impl Into<String>) -> Self {
        Self::Locator(by, value.into())
    }

    /// Build a target from loosely supplied parts.
    ///
    /// An element wins over a locator pair. Fails with
    /// [`AppiumError::MissingTarget`] when there is neither an element nor
    /// a complete, non-empty pair.
    pub fn from_parts(
        element: Option<Element>,
        by: Option<By>,
        value: Option<&str>,
    ) -> Result<Self, AppiumError> {
        match (element, by, value) {
            (Some(element), _, _) => Ok(Self::Element(element)),
            (None, Some(by), Some(value)) if !value.is_empty() => {
                Ok(Self::Locator(by, value.to_string()))
            }
            _ => Err(AppiumError::MissingTarget),
        }
    }
}

impl From<Element> for Target {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<(By, &str)> for Target {
    fn from((by, value): (By, &str)) -> Self {
        Self::Locator(by, value.to_string())
    }
}
