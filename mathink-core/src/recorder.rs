//! Gesture recording - turns a pointer stream into committed strokes.
//!
//! The recorder never owns the [`Drawing`]; the host passes it in for every
//! mutating call, so there is exactly one writer at a time.

use std::fmt;

use crate::drawing::DEFAULT_COLOR;
use crate::{
    CanvasError, CanvasResult, Drawing, Point, Stroke, StrokePath, Tool, TouchEvent, TouchPhase,
};

/// Maximum spacing between consecutive samples of a recorded stroke.
pub const MAX_SAMPLE_SPACING: f32 = 1.0;

/// Upper bound on samples inserted for a single move. Longer jumps are
/// spread evenly over this many samples instead of one per unit.
pub const MAX_SAMPLES_PER_MOVE: usize = 4096;

/// Callback invoked with the updated drawing after each commit.
pub type CommitCallback = Box<dyn FnMut(&Drawing) + Send>;

/// Records pointer gestures into strokes.
pub struct StrokeRecorder {
    color: String,
    width: f32,
    current: Option<Stroke>,
    on_commit: Option<CommitCallback>,
}

impl StrokeRecorder {
    /// Create a recorder with the default pen (black, width 3).
    #[must_use]
    pub fn new() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            width: Tool::default().width(),
            current: None,
            on_commit: None,
        }
    }

    /// Create a recorder with the given brush.
    ///
    /// # Errors
    ///
    /// Returns an error if the color is empty or the width is not a positive
    /// finite number.
    pub fn with_brush(color: impl Into<String>, width: f32) -> CanvasResult<Self> {
        let mut recorder = Self::new();
        recorder.set_color(color)?;
        recorder.set_width(width)?;
        Ok(recorder)
    }

    /// Register a callback that receives the drawing after every commit.
    #[must_use]
    pub fn on_commit(mut self, callback: impl FnMut(&Drawing) + Send + 'static) -> Self {
        self.on_commit = Some(Box::new(callback));
        self
    }

    /// Color for the next stroke.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Width for the next stroke.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Set the color for subsequent strokes. A stroke in progress keeps its color.
    ///
    /// # Errors
    ///
    /// Returns an error if the color string is empty.
    pub fn set_color(&mut self, color: impl Into<String>) -> CanvasResult<()> {
        let color = color.into();
        if color.trim().is_empty() {
            return Err(CanvasError::InvalidColor(color));
        }
        self.color = color;
        Ok(())
    }

    /// Set the width for subsequent strokes. A stroke in progress keeps its width.
    ///
    /// # Errors
    ///
    /// Returns an error if the width is not a positive finite number.
    pub fn set_width(&mut self, width: f32) -> CanvasResult<()> {
        if !width.is_finite() || width <= 0.0 {
            return Err(CanvasError::InvalidWidth(width));
        }
        self.width = width;
        Ok(())
    }

    /// Switch to one of the predefined tools.
    pub fn set_tool(&mut self, tool: Tool) {
        self.width = tool.width();
    }

    /// The stroke currently being drawn, if a gesture is active.
    #[must_use]
    pub fn in_progress(&self) -> Option<&Stroke> {
        self.current.as_ref()
    }

    /// Whether a gesture is active.
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.current.is_some()
    }

    /// Begin a new stroke at `point` with the current brush.
    ///
    /// An unfinished stroke from a previous gesture is discarded.
    pub fn on_gesture_start(&mut self, point: Point) {
        if self.current.is_some() {
            tracing::debug!("Gesture restarted before end, discarding stroke in progress");
        }
        let mut stroke = Stroke::new(self.color.clone(), self.width);
        stroke.points.push(point);
        self.current = Some(stroke);
    }

    /// Extend the stroke in progress to `point`.
    ///
    /// Gaps longer than [`MAX_SAMPLE_SPACING`] are filled with evenly spaced
    /// samples so consecutive points are never further apart than one unit.
    pub fn on_gesture_move(&mut self, point: Point) {
        let Some(stroke) = self.current.as_mut() else {
            return;
        };
        if let Some(&last) = stroke.points.last() {
            densify_into(&mut stroke.points, last, point);
        }
        stroke.points.push(point);
    }

    /// Finish the gesture. Commits the stroke if it has at least two points and
    /// returns whether a stroke was committed.
    pub fn on_gesture_end(&mut self, drawing: &mut Drawing) -> bool {
        let Some(stroke) = self.current.take() else {
            return false;
        };

        let points = stroke.len();
        if !drawing.push(stroke) {
            tracing::debug!("Discarding stroke with {points} point(s)");
            return false;
        }

        tracing::debug!(
            "Committed stroke with {points} points ({} total)",
            drawing.len()
        );
        if let Some(callback) = self.on_commit.as_mut() {
            callback(drawing);
        }
        true
    }

    /// Abort the gesture without committing anything.
    pub fn on_gesture_cancel(&mut self) {
        if self.current.take().is_some() {
            tracing::debug!("Gesture cancelled");
        }
    }

    /// Remove the most recently committed stroke.
    pub fn undo(&mut self, drawing: &mut Drawing) -> Option<Stroke> {
        drawing.pop()
    }

    /// Remove every committed stroke.
    pub fn clear(&mut self, drawing: &mut Drawing) {
        drawing.clear();
    }

    /// Dispatch a touch event by phase, using its primary touch point.
    ///
    /// Returns whether a stroke was committed.
    pub fn handle_touch(&mut self, drawing: &mut Drawing, event: &TouchEvent) -> bool {
        let position = event.primary_touch().map(crate::TouchPoint::position);
        match (event.phase, position) {
            (TouchPhase::Start, Some(p)) => {
                self.on_gesture_start(p);
                false
            }
            (TouchPhase::Move, Some(p)) => {
                self.on_gesture_move(p);
                false
            }
            (TouchPhase::End, _) => self.on_gesture_end(drawing),
            (TouchPhase::Cancel, _) => {
                self.on_gesture_cancel();
                false
            }
            (phase, None) => {
                tracing::debug!("Ignoring {phase:?} event without touch points");
                false
            }
        }
    }

    /// Replay a sequence of touch events, returning the number of commits.
    pub fn replay<'a>(
        &mut self,
        drawing: &mut Drawing,
        events: impl IntoIterator<Item = &'a TouchEvent>,
    ) -> usize {
        events
            .into_iter()
            .filter(|event| self.handle_touch(drawing, event))
            .count()
    }

    /// Paths for live display: every committed stroke followed by the stroke
    /// in progress.
    #[must_use]
    pub fn live_paths(&self, drawing: &Drawing) -> Vec<StrokePath> {
        let mut paths = drawing.paths();
        paths.extend(self.current.as_ref().and_then(Stroke::to_path));
        paths
    }
}

impl Default for StrokeRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StrokeRecorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrokeRecorder")
            .field("color", &self.color)
            .field("width", &self.width)
            .field("current", &self.current)
            .field("on_commit", &self.on_commit.is_some())
            .finish()
    }
}

/// Push evenly spaced samples strictly between `from` and `to`, at most
/// [`MAX_SAMPLE_SPACING`] apart unless that would exceed
/// [`MAX_SAMPLES_PER_MOVE`].
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn densify_into(points: &mut Vec<Point>, from: Point, to: Point) {
    let distance = from.distance_to(to);
    if !distance.is_finite() || distance <= MAX_SAMPLE_SPACING {
        return;
    }
    let wanted = (distance / MAX_SAMPLE_SPACING).ceil();
    if wanted > MAX_SAMPLES_PER_MOVE as f32 {
        tracing::debug!("Move of {distance} units exceeds the sample cap, spacing widened");
        let steps = MAX_SAMPLES_PER_MOVE;
        points.reserve(steps);
        for i in 1..steps {
            points.push(from.lerp(to, i as f32 / steps as f32));
        }
        return;
    }
    let steps = wanted as usize;
    points.reserve(steps);
    for i in 1..steps {
        let t = (i as f32 * MAX_SAMPLE_SPACING) / distance;
        points.push(from.lerp(to, t));
    }
}
