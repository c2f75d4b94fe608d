use layout::{
    Edges, FieldStyle, FieldView, FixedAdvanceMeasurer, MeasuringMirrorHost, Rectangle, Size,
};
use mention_core::{
    MeasureInput, MentionConfig, MentionController, MentionKey, MentionOption, ReflowKind,
};

const VIEWPORT: Size = Size::new(1024.0, 768.0);

fn style() -> FieldStyle {
    FieldStyle {
        font_size: 10.0,
        padding: Edges::symmetric(2.0, 4.0),
        ..FieldStyle::default()
    }
}

fn controller() -> MentionController {
    MentionController::new(
        MentionConfig::default(),
        vec![
            MentionOption::new("alice", "Alice"),
            MentionOption::new("bob", "Bob"),
        ],
    )
}

/// Run frames until a measurement lands, at most `max` frames.
fn pump(c: &mut MentionController, rect: Option<Rectangle>, max: usize) -> usize {
    let measurer = FixedAdvanceMeasurer::default();
    let style = style();
    let value = c.value().to_string();
    let field = FieldView {
        rect,
        value: &value,
        style: &style,
        scroll_left: c.buffer().scroll_x(),
    };
    let mut host = MeasuringMirrorHost::new(&measurer);
    for frame in 1..=max {
        let mut input = MeasureInput {
            field: Some(&field),
            mirror_host: &mut host,
            viewport: VIEWPORT,
        };
        if c.poll_measurement(&mut input).is_some() {
            return frame;
        }
    }
    0
}

#[test]
fn hidden_until_first_measurement() {
    let mut c = controller();
    c.handle_text_change("hello @", 7);
    assert!(c.is_open());
    assert!(!c.geometry().visible);

    let rect = Some(Rectangle::new(20.0, 40.0, 400.0, 24.0));
    assert_eq!(pump(&mut c, rect, 5), 2, "default deferral is two frames");

    let g = c.geometry();
    assert!(g.visible);
    // Trigger at byte 6: 6 chars * 5px after the 4px left padding.
    assert_eq!(g.x, 20.0 + 4.0 + 30.0);
    assert_eq!(g.y, 40.0 + 24.0 + 4.0);
    assert_eq!((g.width, g.height), (280.0, 300.0));
}

#[test]
fn anchors_on_the_trigger_not_the_cursor() {
    let mut c = controller();
    c.handle_text_change("@alice", 6);
    pump(&mut c, Some(Rectangle::new(0.0, 0.0, 400.0, 24.0)), 5);
    // The caret column is 4px in; the viewport margin wins.
    assert_eq!(c.geometry().x, 8.0);

    c.handle_text_change("@alice @b", 9);
    pump(&mut c, Some(Rectangle::new(0.0, 0.0, 400.0, 24.0)), 5);
    assert_eq!(c.geometry().x, 4.0 + 7.0 * 5.0);
}

#[test]
fn unmounted_field_aborts_without_touching_geometry() {
    let mut c = controller();
    c.handle_text_change("@", 1);
    assert_eq!(pump(&mut c, None, 5), 0);
    assert!(!c.geometry().visible);
    assert!(!c.measurement_pending(), "the aborted request is not retried by itself");

    // The next relevant event retries.
    c.reflow_hub().notify(ReflowKind::Resize);
    assert_eq!(pump(&mut c, Some(Rectangle::new(0.0, 0.0, 300.0, 24.0)), 5), 2);
    assert!(c.geometry().visible);
}

#[test]
fn closing_cancels_pending_measurement() {
    let mut c = controller();
    c.handle_text_change("@", 1);
    assert!(c.measurement_pending());
    c.handle_key_down(MentionKey::Escape);
    assert!(!c.measurement_pending());
    assert_eq!(pump(&mut c, Some(Rectangle::new(0.0, 0.0, 300.0, 24.0)), 5), 0);
    assert!(!c.geometry().visible);
}

#[test]
fn stale_ticket_is_not_applied() {
    let mut c = controller();
    c.handle_text_change("@", 1);
    c.take_due_measurement();
    let ticket = c.take_due_measurement().unwrap();

    // A keystroke lands while the measurement is in flight.
    c.handle_text_change("@a", 2);

    let measurer = FixedAdvanceMeasurer::default();
    let style = style();
    let field = FieldView {
        rect: Some(Rectangle::new(0.0, 0.0, 300.0, 24.0)),
        value: "@a",
        style: &style,
        scroll_left: 0.0,
    };
    let mut host = MeasuringMirrorHost::new(&measurer);
    let mut input = MeasureInput {
        field: Some(&field),
        mirror_host: &mut host,
        viewport: VIEWPORT,
    };
    let g = c.measure(&mut input).unwrap();
    assert!(!c.apply_measurement(ticket, g));
    assert!(!c.geometry().visible);
}

#[test]
fn remeasure_keeps_menu_visible() {
    let mut c = controller();
    let rect = Some(Rectangle::new(0.0, 0.0, 300.0, 24.0));
    c.handle_text_change("@", 1);
    pump(&mut c, rect, 5);
    assert!(c.geometry().visible);

    c.handle_text_change("@a", 2);
    assert!(c.measurement_pending());
    assert!(c.geometry().visible);
    pump(&mut c, rect, 5);
    assert!(c.geometry().visible);
}

#[test]
fn reopening_hides_again() {
    let mut c = controller();
    let rect = Some(Rectangle::new(0.0, 0.0, 300.0, 24.0));
    c.handle_text_change("@", 1);
    pump(&mut c, rect, 5);
    c.dismiss();
    assert!(!c.geometry().visible);
    c.handle_text_change("@ @", 3);
    assert!(c.is_open());
    assert!(!c.geometry().visible);
}

#[test]
fn reflow_listeners_live_only_while_open() {
    let mut c = controller();
    let hub = c.reflow_hub();
    assert_eq!(hub.listener_count(), 0);
    c.handle_text_change("@", 1);
    assert_eq!(hub.listener_count(), 1);
    c.handle_text_change("@b", 2);
    assert_eq!(hub.listener_count(), 1);
    c.handle_key_down(MentionKey::Enter);
    assert_eq!(hub.listener_count(), 0);
    drop(c);
    assert_eq!(hub.listener_count(), 0);
}

#[test]
fn scroll_while_open_requests_remeasure() {
    let mut c = controller();
    let rect = Some(Rectangle::new(0.0, 0.0, 300.0, 24.0));
    c.handle_text_change("@", 1);
    pump(&mut c, rect, 5);
    assert!(!c.measurement_pending());

    c.reflow_hub().notify(ReflowKind::Scroll);
    assert_eq!(pump(&mut c, Some(Rectangle::new(0.0, 200.0, 300.0, 24.0)), 5), 2);
    assert_eq!(c.geometry().y, 228.0);
}

#[test]
fn rendered_size_grows_the_box() {
    let mut c = controller();
    c.handle_text_change("@", 1);
    c.report_menu_size(Size::new(200.0, 420.0));
    assert_eq!(c.menu_box_size(), Size::new(280.0, 420.0));
    pump(&mut c, Some(Rectangle::new(0.0, 0.0, 300.0, 24.0)), 5);
    assert_eq!(c.geometry().height, 420.0);
}

#[test]
fn measure_while_closed_is_an_error() {
    let c = controller();
    let measurer = FixedAdvanceMeasurer::default();
    let mut host = MeasuringMirrorHost::new(&measurer);
    let mut input = MeasureInput {
        field: None,
        mirror_host: &mut host,
        viewport: VIEWPORT,
    };
    assert_eq!(c.measure(&mut input), Err(mention_core::MeasureError::Closed));
}
