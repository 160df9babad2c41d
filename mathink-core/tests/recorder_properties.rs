//! Property tests for gesture recording.

use mathink_core::{Drawing, Point, Stroke, StrokeRecorder};
use proptest::prelude::*;

fn arb_point() -> impl Strategy<Value = Point> {
    (-500.0f32..500.0, -500.0f32..500.0).prop_map(|(x, y)| Point::new(x, y))
}

fn arb_stroke() -> impl Strategy<Value = Stroke> {
    prop::collection::vec(arb_point(), 2..6)
        .prop_map(|points| Stroke::new("#000000", 3.0).with_points(points))
}

fn arb_drawing() -> impl Strategy<Value = Drawing> {
    prop::collection::vec(arb_stroke(), 0..5).prop_map(Drawing::from_strokes)
}

proptest! {
    #[test]
    fn prop_tap_never_commits(drawing in arb_drawing(), tap in arb_point()) {
        let mut drawing = drawing;
        let before = drawing.clone();
        let mut recorder = StrokeRecorder::new();

        recorder.on_gesture_start(tap);
        let committed = recorder.on_gesture_end(&mut drawing);

        prop_assert!(!committed);
        prop_assert_eq!(drawing, before);
    }

    #[test]
    fn prop_gesture_commits_exactly_one_stroke(
        drawing in arb_drawing(),
        start in arb_point(),
        moves in prop::collection::vec(arb_point(), 1..8),
        width in 0.5f32..20.0,
        tint in 0u8..=255,
    ) {
        let mut drawing = drawing;
        let before = drawing.len();
        let color = format!("#{tint:02x}{tint:02x}{tint:02x}");
        let mut recorder = StrokeRecorder::with_brush(color.clone(), width).expect("brush");

        recorder.on_gesture_start(start);
        for p in &moves {
            recorder.on_gesture_move(*p);
        }
        prop_assert!(recorder.on_gesture_end(&mut drawing));

        prop_assert_eq!(drawing.len(), before + 1);
        let stroke = drawing.strokes().last().expect("committed stroke");
        prop_assert!(stroke.len() >= 2);
        prop_assert_eq!(&stroke.color, &color);
        prop_assert_eq!(stroke.width, width);
        prop_assert_eq!(stroke.points.first().copied(), Some(start));
        prop_assert_eq!(stroke.points.last().copied(), moves.last().copied());
    }

    #[test]
    fn prop_samples_are_at_most_one_unit_apart(
        start in arb_point(),
        moves in prop::collection::vec(arb_point(), 1..5),
    ) {
        let mut drawing = Drawing::new();
        let mut recorder = StrokeRecorder::new();
        recorder.on_gesture_start(start);
        for p in &moves {
            recorder.on_gesture_move(*p);
        }
        recorder.on_gesture_end(&mut drawing);

        let points = &drawing.strokes()[0].points;
        for pair in points.windows(2) {
            prop_assert!(pair[0].distance_to(pair[1]) <= 1.0 + 1e-3);
        }
    }

    #[test]
    fn prop_undo_removes_last(drawing in arb_drawing()) {
        let mut drawing = drawing;
        let mut recorder = StrokeRecorder::new();
        let before = drawing.clone();

        let removed = recorder.undo(&mut drawing);
        if before.is_empty() {
            prop_assert!(removed.is_none());
            prop_assert!(drawing.is_empty());
        } else {
            prop_assert_eq!(drawing.len(), before.len() - 1);
            prop_assert_eq!(removed.as_ref(), before.strokes().last());
            prop_assert_eq!(drawing.strokes(), &before.strokes()[..before.len() - 1]);
        }
    }

    #[test]
    fn prop_clear_always_empties(drawing in arb_drawing()) {
        let mut drawing = drawing;
        StrokeRecorder::new().clear(&mut drawing);
        prop_assert!(drawing.is_empty());
    }
}

#[test]
fn horizontal_move_is_sampled_monotonically() {
    let mut drawing = Drawing::new();
    let mut recorder = StrokeRecorder::new();

    recorder.on_gesture_start(Point::new(0.0, 0.0));
    recorder.on_gesture_move(Point::new(10.0, 0.0));
    recorder.on_gesture_end(&mut drawing);

    let points = &drawing.strokes()[0].points;
    // start + 9 intermediate samples + end
    assert!(points.len() >= 11);
    assert!(points.windows(2).all(|w| w[1].x > w[0].x));
    assert!(points.iter().all(|p| p.y == 0.0));
    assert_eq!(points.last().copied(), Some(Point::new(10.0, 0.0)));
}
