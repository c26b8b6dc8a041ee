//! Pointer action chains sent through the W3C actions endpoint

use serde_json::{json, Value};

/// Kind of pointer input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Touch,
    Mouse,
    Pen,
}

impl PointerKind {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Touch => "touch",
            Self::Mouse => "mouse",
            Self::Pen => "pen",
        }
    }
}

/// Builder for the ticks of a single pointer input source.
///
/// The chain is executed as one atomic `POST /session/{id}/actions`.
#[derive(Debug, Clone)]
pub struct PointerActions {
    id: String,
    kind: PointerKind,
    ticks: Vec<Value>,
}

impl PointerActions {
    pub fn new(id: impl Into<String>, kind: PointerKind) -> Self {
        Self {
            id: id.into(),
            kind,
            ticks: Vec::new(),
        }
    }

    /// Touch pointer named `finger`
    pub fn finger() -> Self {
        Self::new("finger", PointerKind::Touch)
    }

    /// Move to viewport coordinates
    pub fn move_to(mut self, x: i32, y: i32, duration_ms: u64) -> Self {
        self.ticks.push(json!({
            "type": "pointerMove",
            "duration": duration_ms,
            "x": x,
            "y": y,
            "origin": "viewport",
        }));
        self
    }

    pub fn down(mut self) -> Self {
        self.ticks.push(json!({"type": "pointerDown", "button": 0}));
        self
    }

    pub fn up(mut self) -> Self {
        self.ticks.push(json!({"type": "pointerUp", "button": 0}));
        self
    }

    pub fn pause(mut self, duration_ms: u64) -> Self {
        self.ticks.push(json!({"type": "pause", "duration": duration_ms}));
        self
    }

    pub fn ticks(&self) -> &[Value] {
        &self.ticks
    }

    /// Request body for the actions endpoint
    pub fn into_payload(self) -> Value {
        json!({
            "actions": [{
                "type": "pointer",
                "id": self.id,
                "parameters": {"pointerType": self.kind.as_str()},
                "actions": self.ticks,
            }]
        })
    }
}

/// Move, press, hold for `press_ms`, release
pub fn press_gesture(x: i32, y: i32, press_ms: u64, move_ms: u64) -> PointerActions {
    PointerActions::finger()
        .move_to(x, y, move_ms)
        .down()
        .pause(press_ms)
        .up()
}

/// Press at `from`, drag to `to` over `duration_ms`, release
pub fn swipe_gesture(from: (i32, i32), to: (i32, i32), duration_ms: u64) -> PointerActions {
    PointerActions::finger()
        .move_to(from.0, from.1, 0)
        .down()
        .move_to(to.0, to.1, duration_ms)
        .up()
}
