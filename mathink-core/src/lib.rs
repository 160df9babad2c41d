//! # Mathink Core
//!
//! Core drawing logic for handwritten equation capture.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                mathink-core                 │
//! ├─────────────────────────────────────────────┤
//! │  Data Model      │  Stroke Recorder         │
//! │  - Point         │  - Gesture start/move    │
//! │  - Stroke        │  - Unit-step densifying  │
//! │  - Drawing       │  - Commit / undo / clear │
//! ├─────────────────────────────────────────────┤
//! │  Stroke Renderer │  Equation Input          │
//! │  - Vector paths  │  - Keypad buffer         │
//! │  - SVG path data │  - Practice problems     │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod drawing;
pub mod equation;
pub mod error;
pub mod event;
pub mod geometry;
pub mod path;
pub mod practice;
pub mod recorder;

pub use drawing::{Drawing, Stroke, Tool};
pub use equation::{is_balanced, EquationBuffer, Key};
pub use error::{CanvasError, CanvasResult};
pub use event::{GestureLog, TouchEvent, TouchPhase, TouchPoint};
pub use geometry::{Bounds, Point};
pub use path::{LineCap, LineJoin, PathCommand, StrokePath};
pub use practice::{format_time, ProblemKind};
pub use recorder::StrokeRecorder;

/// Mathink core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
