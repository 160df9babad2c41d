//! Input events from the drawing surface.

use serde::{Deserialize, Serialize};

use crate::{CanvasResult, Point};

/// Phase of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchPhase {
    /// Touch started (finger down).
    Start,
    /// Touch moved (finger dragging).
    Move,
    /// Touch ended (finger up).
    End,
    /// Touch cancelled (e.g., palm rejection).
    Cancel,
}

/// A single touch point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    /// Touch identifier (for multi-touch).
    #[serde(default)]
    pub id: u32,
    /// X position in canvas coordinates.
    pub x: f32,
    /// Y position in canvas coordinates.
    pub y: f32,
    /// Pressure (0.0 to 1.0, if available).
    #[serde(default)]
    pub pressure: Option<f32>,
}

impl TouchPoint {
    /// Position of this touch in canvas coordinates.
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A touch event with one or more touch points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    /// Phase of this touch event.
    pub phase: TouchPhase,
    /// All current touch points.
    #[serde(default)]
    pub touches: Vec<TouchPoint>,
    /// Timestamp in milliseconds since canvas start.
    #[serde(default)]
    pub timestamp_ms: u64,
}

impl TouchEvent {
    /// Create a new touch event.
    #[must_use]
    pub fn new(phase: TouchPhase, touches: Vec<TouchPoint>, timestamp_ms: u64) -> Self {
        Self {
            phase,
            touches,
            timestamp_ms,
        }
    }

    /// Single-pointer event at `(x, y)`, as produced by a mouse or stylus.
    #[must_use]
    pub fn pointer(phase: TouchPhase, x: f32, y: f32) -> Self {
        Self::new(
            phase,
            vec![TouchPoint {
                id: 0,
                x,
                y,
                pressure: None,
            }],
            0,
        )
    }

    /// Get the primary (first) touch point.
    #[must_use]
    pub fn primary_touch(&self) -> Option<&TouchPoint> {
        self.touches.first()
    }

    /// Check if this is a multi-touch event.
    #[must_use]
    pub fn is_multi_touch(&self) -> bool {
        self.touches.len() > 1
    }
}

/// A recorded sequence of touch events, replayable through a
/// [`StrokeRecorder`](crate::StrokeRecorder).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GestureLog {
    /// Events in arrival order.
    pub events: Vec<TouchEvent>,
}

impl GestureLog {
    /// Parse a gesture log from a JSON array of touch events.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is not a valid event array.
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
