//! Surface creation, disposal and allocation-failure recovery.

use slate_display::{
    Display, DisplayConfig, EmptyAtlas, RasterOp, RecordingBackend, SurfaceError,
};
use slate_proto::{encode, DrawOp, PackedWord};

fn word(op: DrawOp) -> PackedWord {
    encode(&op.lower()).unwrap()
}

fn clear_word() -> PackedWord {
    word(DrawOp::Clear { r: 0, g: 0, b: 0 })
}

#[test]
fn repeated_drains_allocate_the_surface_once() {
    let mut display = Display::new(DisplayConfig::default());
    let mut backend = RecordingBackend::new();

    for _ in 0..3 {
        display.push_word(clear_word());
        display.drain(&mut backend, &EmptyAtlas).unwrap();
    }

    let creates = backend
        .ops
        .iter()
        .filter(|op| matches!(op, RasterOp::CreateSurface { .. }))
        .count();
    let background_clears = backend
        .ops
        .iter()
        .filter(|op| matches!(op, RasterOp::Clear { .. }))
        .count();
    assert_eq!(creates, 1);
    // One background clear at creation plus the three queued clears.
    assert_eq!(background_clears, 4);
}

#[test]
fn allocation_failure_surfaces_the_error_and_keeps_the_backlog() {
    let mut display = Display::new(DisplayConfig::default());
    let mut backend = RecordingBackend::new();
    backend.fail_allocations("out of texture memory");

    display.push_word(clear_word());
    display.push_word(word(DrawOp::Line {
        x1: 0,
        y1: 0,
        x2: 1,
        y2: 1,
    }));

    let err = display.drain(&mut backend, &EmptyAtlas).unwrap_err();
    assert_eq!(
        err,
        SurfaceError::Allocation {
            side: 64,
            reason: "out of texture memory".to_owned(),
        }
    );
    assert_eq!(display.pending(), 2);
    assert_eq!(display.surface(), None);
    assert_eq!(backend.take_ops(), vec![]);

    backend.allow_allocations();
    let stats = display.drain(&mut backend, &EmptyAtlas).unwrap();
    assert_eq!(stats.executed, 2);
    assert_eq!(display.pending(), 0);
    assert!(display.surface().is_some());
}

#[test]
fn disposed_display_redraws_onto_a_fresh_surface() {
    let mut display = Display::new(DisplayConfig::default());
    let mut backend = RecordingBackend::new();

    display.push_word(clear_word());
    display.drain(&mut backend, &EmptyAtlas).unwrap();
    let first = display.surface().unwrap();

    display.dispose(&mut backend);
    assert_eq!(display.surface(), None);

    display.push_word(clear_word());
    display.drain(&mut backend, &EmptyAtlas).unwrap();
    let second = display.surface().unwrap();
    assert_ne!(first, second);

    assert!(backend.ops.contains(&RasterOp::DestroySurface { surface: first }));
    let creates = backend
        .ops
        .iter()
        .filter(|op| matches!(op, RasterOp::CreateSurface { .. }))
        .count();
    assert_eq!(creates, 2);
}

#[test]
fn disposal_keeps_queued_words_and_draw_state() {
    let mut display = Display::new(DisplayConfig::default());
    let mut backend = RecordingBackend::new();

    display.push_word(word(DrawOp::SetColor {
        r: 9,
        g: 9,
        b: 9,
        a: 255,
    }));
    display.drain(&mut backend, &EmptyAtlas).unwrap();
    let colored = display.color();

    display.push_word(clear_word());
    display.dispose(&mut backend);

    assert_eq!(display.pending(), 1);
    assert_eq!(display.color(), colored);

    let stats = display.drain(&mut backend, &EmptyAtlas).unwrap();
    assert_eq!(stats.executed, 1);
}
