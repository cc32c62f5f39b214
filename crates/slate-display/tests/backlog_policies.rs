//! Bounded-backlog behavior under each overflow policy.

use slate_display::{
    BacklogPolicy, Display, DisplayConfig, EmptyAtlas, PushOutcome, RasterOp, RecordingBackend,
};
use slate_proto::{encode, DrawOp, PackedWord};

fn stroke_word(width: i32) -> PackedWord {
    encode(&DrawOp::SetStroke { width }.lower()).unwrap()
}

fn display_with(backlog: BacklogPolicy) -> Display {
    Display::new(DisplayConfig {
        backlog,
        ..DisplayConfig::default()
    })
}

/// Stroke widths the backend saw, skipping the re-applied style preamble.
fn drained_widths(display: &mut Display) -> Vec<f32> {
    let mut backend = RecordingBackend::new();
    display.drain(&mut backend, &EmptyAtlas).unwrap();
    backend
        .take_ops()
        .into_iter()
        .skip_while(|op| !matches!(op, RasterOp::SetStroke { .. }))
        .skip(1)
        .filter_map(|op| match op {
            RasterOp::SetStroke { width } => Some(width),
            _ => None,
        })
        .collect()
}

#[test]
fn unbounded_backlog_queues_everything() {
    let mut display = display_with(BacklogPolicy::Unbounded);
    for width in 0..300 {
        assert_eq!(display.push_word(stroke_word(width)), PushOutcome::Queued);
    }
    assert_eq!(display.pending(), 300);
    assert_eq!(display.dropped(), 0);
}

#[test]
fn drop_oldest_evicts_the_head_for_the_newcomer() {
    let mut display = display_with(BacklogPolicy::DropOldest { cap: 2 });

    assert_eq!(display.push_word(stroke_word(1)), PushOutcome::Queued);
    assert_eq!(display.push_word(stroke_word(2)), PushOutcome::Queued);
    assert_eq!(
        display.push_word(stroke_word(3)),
        PushOutcome::EvictedOldest
    );
    assert_eq!(display.pending(), 2);
    assert_eq!(display.dropped(), 1);

    assert_eq!(drained_widths(&mut display), vec![2.0, 3.0]);
}

#[test]
fn drop_newest_refuses_the_incoming_word() {
    let mut display = display_with(BacklogPolicy::DropNewest { cap: 2 });

    display.push_word(stroke_word(1));
    display.push_word(stroke_word(2));
    assert_eq!(
        display.push_word(stroke_word(3)),
        PushOutcome::DroppedNewest
    );
    assert_eq!(display.pending(), 2);
    assert_eq!(display.dropped(), 1);

    assert_eq!(drained_widths(&mut display), vec![1.0, 2.0]);
}

#[test]
fn reject_pushes_back_on_the_producer() {
    let mut display = display_with(BacklogPolicy::Reject { cap: 1 });

    assert!(display.push_word(stroke_word(1)).is_queued());
    let outcome = display.push_word(stroke_word(2));
    assert_eq!(outcome, PushOutcome::Rejected);
    assert!(!outcome.is_queued());
    assert_eq!(display.pending(), 1);
    assert_eq!(display.dropped(), 1);
}

#[test]
fn draining_frees_capacity_for_later_pushes() {
    let mut display = display_with(BacklogPolicy::Reject { cap: 1 });

    display.push_word(stroke_word(1));
    assert_eq!(display.push_word(stroke_word(2)), PushOutcome::Rejected);

    assert_eq!(drained_widths(&mut display), vec![1.0]);
    assert_eq!(display.push_word(stroke_word(2)), PushOutcome::Queued);
}

#[test]
fn zero_cap_configs_run_with_a_bound_of_one() {
    let mut display = display_with(BacklogPolicy::DropNewest { cap: 0 });

    assert_eq!(
        display.config().backlog,
        BacklogPolicy::DropNewest { cap: 1 }
    );
    assert_eq!(display.push_word(stroke_word(1)), PushOutcome::Queued);
    assert_eq!(display.dropped(), 0);
    assert_eq!(
        display.push_word(stroke_word(2)),
        PushOutcome::DroppedNewest
    );
    assert_eq!(display.dropped(), 1);
    assert_eq!(drained_widths(&mut display), vec![1.0]);
}
