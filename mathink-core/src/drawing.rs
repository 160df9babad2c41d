//! Strokes and drawings - the committed user input.

use serde::{Deserialize, Serialize};

use crate::{Bounds, CanvasError, CanvasResult, Point, StrokePath};

/// Default stroke color.
pub const DEFAULT_COLOR: &str = "#000000";

/// A single freehand stroke.
///
/// Color and width are captured when the stroke starts and never change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Ordered samples along the stroke.
    pub points: Vec<Point>,
    /// Stroke color (hex, `rgb()`/`rgba()` or a CSS color name).
    pub color: String,
    /// Stroke thickness in pixels.
    pub width: f32,
}

impl Stroke {
    /// Create an empty stroke with the given style.
    #[must_use]
    pub fn new(color: impl Into<String>, width: f32) -> Self {
        Self {
            points: Vec::new(),
            color: color.into(),
            width,
        }
    }

    /// Builder-style helper that sets the points.
    #[must_use]
    pub fn with_points(mut self, points: impl IntoIterator<Item = Point>) -> Self {
        self.points = points.into_iter().collect();
        self
    }

    /// Number of recorded points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the stroke has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the stroke leaves a visible mark: two or more finite points
    /// and a positive, finite width.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
            && self.width.is_finite()
            && self.width > 0.0
            && self.points.iter().all(|p| p.x.is_finite() && p.y.is_finite())
    }

    /// Bounding box of the stroke's points.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.points)
    }

    /// Vector path for display, `None` for strokes with fewer than two points.
    #[must_use]
    pub fn to_path(&self) -> Option<StrokePath> {
        StrokePath::from_stroke(self)
    }
}

/// Drawing tools offered by the draw screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Regular pen.
    #[default]
    Pen,
    /// Thick marker.
    Thick,
}

impl Tool {
    /// Stroke width used by this tool.
    #[must_use]
    pub fn width(self) -> f32 {
        match self {
            Self::Pen => 3.0,
            Self::Thick => 6.0,
        }
    }
}

/// The full user input: an ordered sequence of committed strokes.
///
/// Deserialization goes through [`Drawing::from_strokes`], so undrawable
/// strokes never enter a drawing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Stroke>", into = "Vec<Stroke>")]
pub struct Drawing {
    strokes: Vec<Stroke>,
}

impl Drawing {
    /// Create an empty drawing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a drawing from already committed strokes.
    ///
    /// Undrawable strokes (see [`Stroke::is_drawable`]) are dropped.
    #[must_use]
    pub fn from_strokes(strokes: impl IntoIterator<Item = Stroke>) -> Self {
        Self {
            strokes: strokes.into_iter().filter(Stroke::is_drawable).collect(),
        }
    }

    /// Committed strokes in append order.
    #[must_use]
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Number of committed strokes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    /// Whether there are no committed strokes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Append a completed stroke. Returns `false` and leaves the drawing
    /// untouched if the stroke is not drawable.
    pub fn push(&mut self, stroke: Stroke) -> bool {
        if !stroke.is_drawable() {
            return false;
        }
        self.strokes.push(stroke);
        true
    }

    /// Remove the most recently committed stroke.
    pub fn pop(&mut self) -> Option<Stroke> {
        self.strokes.pop()
    }

    /// Remove every stroke.
    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    /// Bounding box over every point of every stroke.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.strokes.iter().flat_map(|s| s.points.iter()))
    }

    /// Vector paths for every committed stroke, in append order.
    #[must_use]
    pub fn paths(&self) -> Vec<StrokePath> {
        self.strokes.iter().filter_map(Stroke::to_path).collect()
    }

    /// Serialize to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> CanvasResult<String> {
        serde_json::to_string(self).map_err(CanvasError::Serialization)
    }

    /// Deserialize from JSON. Undrawable strokes are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<Vec<Stroke>> for Drawing {
    fn from(strokes: Vec<Stroke>) -> Self {
        Self::from_strokes(strokes)
    }
}

impl From<Drawing> for Vec<Stroke> {
    fn from(drawing: Drawing) -> Self {
        drawing.strokes
    }
}
