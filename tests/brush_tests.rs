use approx::assert_relative_eq;
use price_chart::core::{PriceScale, ScreenPoint, TimeScale, Transform, ViewProjection};
use price_chart::interaction::{BrushPhase, BrushSelection, BrushSelector};
use proptest::prelude::*;

fn view() -> ViewProjection {
    ViewProjection::new(
        TimeScale::new(0.0, 100.0, 500.0).expect("time"),
        PriceScale::new(0.0, 50.0, 250.0).expect("price"),
        Transform::IDENTITY,
    )
}

#[test]
fn selection_converts_to_both_domains() {
    let selection =
        BrushSelection::from_corners(ScreenPoint::new(100.0, 50.0), ScreenPoint::new(300.0, 200.0));
    let commit = selection.to_domains(view()).expect("commit");

    assert_relative_eq!(commit.time.min(), 20.0, epsilon = 1e-9);
    assert_relative_eq!(commit.time.max(), 60.0, epsilon = 1e-9);
    assert_relative_eq!(commit.price.min(), 10.0, epsilon = 1e-9);
    assert_relative_eq!(commit.price.max(), 40.0, epsilon = 1e-9);
}

#[test]
fn degenerate_drag_emits_no_selection() {
    let mut brush = BrushSelector::new(1.0);
    brush.begin(ScreenPoint::new(40.0, 40.0));
    assert_eq!(brush.end(ScreenPoint::new(40.5, 200.0)), None);
    assert_eq!(brush.phase(), BrushPhase::Idle);
}

#[test]
fn selection_is_cleared_after_commit() {
    let mut brush = BrushSelector::default();
    brush.begin(ScreenPoint::new(0.0, 0.0));
    brush.update(ScreenPoint::new(50.0, 50.0));
    assert!(brush.selection().is_some());

    let selection = brush.end(ScreenPoint::new(60.0, 70.0)).expect("selection");
    assert_eq!((selection.width(), selection.height()), (60.0, 70.0));
    assert!(brush.selection().is_none());
}

proptest! {
    #[test]
    fn drag_direction_does_not_change_commit(
        x0 in 0.0f64..500.0,
        y0 in 0.0f64..250.0,
        x1 in 0.0f64..500.0,
        y1 in 0.0f64..250.0
    ) {
        let a = ScreenPoint::new(x0, y0);
        let b = ScreenPoint::new(x1, y1);
        let forward = BrushSelection::from_corners(a, b).to_domains(view()).expect("forward");
        let backward = BrushSelection::from_corners(b, a).to_domains(view()).expect("backward");

        prop_assert_eq!(forward, backward);
        prop_assert!(forward.time.min() <= forward.time.max());
        prop_assert!(forward.price.min() <= forward.price.max());
    }
}
