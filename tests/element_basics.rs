use eframe_sketch::element::{Element, ElementType, factory};
use egui::pos2;

#[test]
fn test_factory_creates_the_right_variants() {
    let stroke = factory::create_stroke(pos2(3.0, 4.0), 5.0);
    assert_eq!(stroke.kind(), "stroke");
    match &stroke {
        ElementType::Stroke(s) => {
            assert_eq!(s.points(), &[pos2(3.0, 4.0)]);
            assert_eq!(s.thickness(), 5.0);
        }
        other => panic!("expected a stroke, got {:?}", other),
    }

    let sticker = factory::create_sticker(pos2(7.0, 8.0), "😀");
    assert_eq!(sticker.kind(), "sticker");
    match &sticker {
        ElementType::Sticker(s) => {
            assert_eq!(s.anchor(), pos2(7.0, 8.0));
            assert_eq!(s.glyph(), "😀");
        }
        other => panic!("expected a sticker, got {:?}", other),
    }
}

#[test]
fn test_stroke_drag_appends_points_in_order() {
    let mut stroke = factory::create_stroke(pos2(0.0, 0.0), 2.0);
    stroke.drag(pos2(1.0, 0.0));
    stroke.drag(pos2(1.0, 1.0));

    match stroke {
        ElementType::Stroke(s) => {
            assert_eq!(s.points(), &[pos2(0.0, 0.0), pos2(1.0, 0.0), pos2(1.0, 1.0)]);
        }
        other => panic!("expected a stroke, got {:?}", other),
    }
}

#[test]
fn test_stroke_keeps_duplicate_points() {
    let mut stroke = factory::create_stroke(pos2(5.0, 5.0), 2.0);
    stroke.drag(pos2(5.0, 5.0));
    stroke.drag(pos2(5.0, 5.0));

    match stroke {
        ElementType::Stroke(s) => assert_eq!(s.points().len(), 3),
        other => panic!("expected a stroke, got {:?}", other),
    }
}

#[test]
fn test_sticker_drag_replaces_the_anchor() {
    let mut sticker = factory::create_sticker(pos2(10.0, 10.0), "🎉");
    sticker.drag(pos2(50.0, 60.0));
    sticker.drag(pos2(70.0, 80.0));

    match sticker {
        ElementType::Sticker(s) => {
            // Only the last position matters; the glyph never changes.
            assert_eq!(s.anchor(), pos2(70.0, 80.0));
            assert_eq!(s.glyph(), "🎉");
        }
        other => panic!("expected a sticker, got {:?}", other),
    }
}

#[test]
fn test_elements_compare_by_value() {
    let a = factory::create_stroke(pos2(0.0, 0.0), 2.0);
    let mut b = a.clone();
    assert_eq!(a, b);

    b.drag(pos2(1.0, 1.0));
    assert_ne!(a, b);

    let sticker = factory::create_sticker(pos2(0.0, 0.0), "😀");
    assert_ne!(a, sticker);
}
