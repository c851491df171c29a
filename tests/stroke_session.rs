use coloring_studio::input::InputLocation;
use coloring_studio::{
    DrawOp, InputEvent, PaintSession, PointerKind, RasterLayer, Selection, StrokeStyle,
    SurfaceGeometry, Tool, ToolWidths, CRAYONS,
};
use coloring_studio::stroke::CompositeMode;
use egui::{Color32, PointerButton, Pos2, Rect, pos2, vec2};

// A 600px container showing the 300 unit canvas, so screen = 2 × logical
fn surface() -> SurfaceGeometry {
    SurfaceGeometry::new(
        Some(Rect::from_min_size(pos2(0.0, 0.0), vec2(600.0, 600.0))),
        vec2(300.0, 300.0),
    )
}

fn location(x: f32, y: f32) -> InputLocation {
    InputLocation {
        position: pos2(x, y),
        is_on_surface: true,
    }
}

fn mouse_down(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerDown {
        location: location(x, y),
        button: PointerButton::Primary,
        kind: PointerKind::Mouse,
    }
}

fn mouse_drag(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerMove {
        location: location(x, y),
        held_buttons: vec![PointerButton::Primary],
        kind: PointerKind::Mouse,
    }
}

fn run(session: &mut PaintSession, events: &[InputEvent], style: StrokeStyle) -> Vec<DrawOp> {
    let surface = surface();
    events
        .iter()
        .filter_map(|event| session.handle(event, &surface, style))
        .collect()
}

#[test]
fn test_down_then_n_moves_gives_n_plus_one_ops() {
    let mut session = PaintSession::new();
    let style = StrokeStyle::brush(CRAYONS[0].color, 6.0);
    let mut events = vec![mouse_down(100.0, 100.0)];
    for i in 1..=5 {
        events.push(mouse_drag(100.0 + 20.0 * i as f32, 100.0 + 10.0 * i as f32));
    }

    let ops = run(&mut session, &events, style);

    assert_eq!(ops.len(), 6);
    assert!(ops[0].is_dot());
    assert_eq!(ops[0].to, pos2(50.0, 50.0));
    for pair in ops.windows(2) {
        assert_eq!(pair[1].from, pair[0].to);
        assert!(!pair[1].is_dot());
    }
    assert_eq!(session.last_point(), Some(pos2(100.0, 75.0)));
}

#[test]
fn test_moves_while_idle_draw_nothing() {
    let mut session = PaintSession::new();
    let style = StrokeStyle::brush(Color32::RED, 6.0);
    let ops = run(
        &mut session,
        &[mouse_drag(10.0, 10.0), mouse_drag(20.0, 20.0)],
        style,
    );
    assert!(ops.is_empty());
    assert!(!session.is_active());
}

#[test]
fn test_release_cancel_and_leave_end_the_stroke() {
    let style = StrokeStyle::brush(Color32::RED, 6.0);
    let endings = [
        InputEvent::PointerUp {
            location: location(900.0, 900.0),
            button: PointerButton::Primary,
        },
        InputEvent::PointerCancel,
        InputEvent::PointerLeave {
            last_known_location: location(599.0, 300.0),
        },
    ];

    for ending in endings {
        let mut session = PaintSession::new();
        let ops = run(
            &mut session,
            &[mouse_down(100.0, 100.0), ending.clone(), mouse_drag(120.0, 120.0)],
            style,
        );
        assert_eq!(ops.len(), 1, "{ending:?}");
        assert_eq!(session.last_point(), None);
    }
}

#[test]
fn test_touch_drag_needs_no_buttons() {
    let mut session = PaintSession::new();
    let style = StrokeStyle::brush(Color32::RED, 6.0);
    let ops = run(
        &mut session,
        &[
            InputEvent::PointerDown {
                location: location(100.0, 100.0),
                button: PointerButton::Primary,
                kind: PointerKind::Touch,
            },
            InputEvent::PointerMove {
                location: location(140.0, 100.0),
                held_buttons: Vec::new(),
                kind: PointerKind::Touch,
            },
        ],
        style,
    );
    assert_eq!(ops.len(), 2);
}

#[test]
fn test_eraser_is_wider_and_subtractive() {
    let widths = ToolWidths::default();
    let mut selection = Selection::default();
    let brush = widths.style_for(&selection);
    selection.set_tool(Tool::Eraser);
    let eraser = widths.style_for(&selection);

    assert_eq!(brush.width, 6.0);
    assert_eq!(eraser.width, 14.0);
    assert_eq!(brush.composite, CompositeMode::SourceOver);
    assert_eq!(eraser.composite, CompositeMode::DestinationOut);
}

#[test]
fn test_eraser_stroke_removes_brush_stroke() {
    let mut layer = RasterLayer::new(300);
    let mut session = PaintSession::new();
    let brush = StrokeStyle::brush(CRAYONS[2].color, 6.0);
    for op in run(&mut session, &[mouse_down(100.0, 200.0), mouse_drag(300.0, 200.0)], brush) {
        layer.apply(&op);
    }
    assert_eq!(layer.pixel(100, 100).map(|p| p[3]), Some(255));

    session.end();
    let eraser = StrokeStyle::eraser(14.0);
    for op in run(&mut session, &[mouse_down(80.0, 200.0), mouse_drag(320.0, 200.0)], eraser) {
        layer.apply(&op);
    }
    assert!(layer.is_blank());
}

#[test]
fn test_stroke_may_run_past_the_edge() {
    let mut session = PaintSession::new();
    let style = StrokeStyle::brush(Color32::RED, 6.0);
    let ops = run(&mut session, &[mouse_down(590.0, 300.0), mouse_drag(640.0, 300.0)], style);
    assert_eq!(ops[1].to, Pos2::new(320.0, 150.0));
}
