//! Vector paths for live stroke display.
//!
//! A stroke's samples are discrete, so the path joins them with straight
//! segments and relies on round caps and joins to hide the corners.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::{Point, Stroke};

/// A single path drawing command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathCommand {
    /// Start a new sub-path at the point.
    MoveTo(Point),
    /// Straight segment from the current position to the point.
    LineTo(Point),
}

impl PathCommand {
    /// The point this command targets.
    #[must_use]
    pub fn point(&self) -> Point {
        match *self {
            Self::MoveTo(p) | Self::LineTo(p) => p,
        }
    }
}

/// Shape of open stroke ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    /// Flat end exactly at the endpoint.
    Butt,
    /// Semicircular end.
    #[default]
    Round,
    /// Square end extended by half the width.
    Square,
}

/// Shape of the corner where two segments meet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    /// Sharp corner.
    Miter,
    /// Rounded corner.
    #[default]
    Round,
    /// Cut-off corner.
    Bevel,
}

/// A styled vector path describing one stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokePath {
    /// Commands in drawing order; always starts with a `MoveTo`.
    pub commands: Vec<PathCommand>,
    /// Stroke color.
    pub color: String,
    /// Stroke width in pixels.
    pub width: f32,
    /// End cap style.
    pub line_cap: LineCap,
    /// Corner join style.
    pub line_join: LineJoin,
}

impl StrokePath {
    /// Build the path for a stroke. Strokes with fewer than two points render
    /// nothing.
    #[must_use]
    pub fn from_stroke(stroke: &Stroke) -> Option<Self> {
        Self::from_points(&stroke.points, &stroke.color, stroke.width)
    }

    /// Build a path from raw points and style.
    #[must_use]
    pub fn from_points(points: &[Point], color: &str, width: f32) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        if rest.is_empty() {
            return None;
        }

        let mut commands = Vec::with_capacity(points.len());
        commands.push(PathCommand::MoveTo(*first));
        commands.extend(rest.iter().copied().map(PathCommand::LineTo));

        Some(Self {
            commands,
            color: color.to_string(),
            width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
        })
    }

    /// Points visited by the path, in order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.commands.iter().map(PathCommand::point)
    }

    /// SVG path data (`"M x y L x y ..."`).
    #[must_use]
    pub fn to_svg_data(&self) -> String {
        let mut data = String::with_capacity(self.commands.len() * 12);
        for (idx, command) in self.commands.iter().enumerate() {
            if idx > 0 {
                data.push(' ');
            }
            let (op, p) = match command {
                PathCommand::MoveTo(p) => ('M', p),
                PathCommand::LineTo(p) => ('L', p),
            };
            let _ = write!(data, "{op} {} {}", p.x, p.y);
        }
        data
    }

    /// A complete SVG `<path>` element with stroke styling.
    #[must_use]
    pub fn to_svg_element(&self) -> String {
        format!(
            concat!(
                "<path d=\"{}\" stroke=\"{}\" stroke-width=\"{}\" ",
                "stroke-linecap=\"{}\" stroke-linejoin=\"{}\" fill=\"none\"/>",
            ),
            self.to_svg_data(),
            escape_attr(&self.color),
            self.width,
            cap_name(self.line_cap),
            join_name(self.line_join),
        )
    }
}

fn cap_name(cap: LineCap) -> &'static str {
    match cap {
        LineCap::Butt => "butt",
        LineCap::Round => "round",
        LineCap::Square => "square",
    }
}

fn join_name(join: LineJoin) -> &'static str {
    match join {
        LineJoin::Miter => "miter",
        LineJoin::Round => "round",
        LineJoin::Bevel => "bevel",
    }
}

fn escape_attr(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke(points: &[(f32, f32)]) -> Stroke {
        Stroke::new("#112233", 4.0).with_points(points.iter().copied().map(Point::from))
    }

    #[test]
    fn test_short_strokes_render_nothing() {
        assert!(StrokePath::from_stroke(&stroke(&[])).is_none());
        assert!(StrokePath::from_stroke(&stroke(&[(1.0, 1.0)])).is_none());
    }

    #[test]
    fn test_move_then_lines() {
        let path = StrokePath::from_stroke(&stroke(&[(0.0, 0.0), (1.0, 2.0), (3.0, 4.0)]))
            .expect("path");
        assert_eq!(
            path.commands,
            vec![
                PathCommand::MoveTo(Point::new(0.0, 0.0)),
                PathCommand::LineTo(Point::new(1.0, 2.0)),
                PathCommand::LineTo(Point::new(3.0, 4.0)),
            ]
        );
        assert_eq!(path.color, "#112233");
        assert_eq!(path.width, 4.0);
        assert_eq!(path.line_cap, LineCap::Round);
        assert_eq!(path.line_join, LineJoin::Round);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let s = stroke(&[(0.5, 0.25), (10.0, 3.0)]);
        assert_eq!(StrokePath::from_stroke(&s), StrokePath::from_stroke(&s));
    }

    #[test]
    fn test_svg_data() {
        let path = StrokePath::from_stroke(&stroke(&[(0.0, 0.0), (1.5, 2.0)])).expect("path");
        assert_eq!(path.to_svg_data(), "M 0 0 L 1.5 2");

        let element = path.to_svg_element();
        assert!(element.contains("stroke-linecap=\"round\""));
        assert!(element.contains("stroke-linejoin=\"round\""));
        assert!(element.contains("fill=\"none\""));
    }
}
