use diamond_siege_core::{CellCoord, Lane};
use diamond_siege_system_breach::{
    parse_breach_events, BreachConfig, BreachRecord, BreachTracker,
};

fn tracker(capacity: usize) -> BreachTracker {
    BreachTracker::new(BreachConfig {
        capacity,
        midline_column: 13,
    })
}

fn seal_with(tracker: &mut BreachTracker, turn: u32, left: u32, right: u32) {
    for _ in 0..left {
        assert!(tracker.record_breach_event(CellCoord::new(2, 11), true));
    }
    for _ in 0..right {
        assert!(tracker.record_breach_event(CellCoord::new(25, 11), true));
    }
    assert!(tracker.seal_turn(turn).is_some());
}

#[test]
fn split_breaches_seal_a_balanced_record_favouring_left() {
    let mut tracker = tracker(5);
    let events = parse_breach_events(
        r#"{"events":{"breach":[[[5,8],1,3,"11",1],[[22,8],1,3,"12",1]]}}"#,
    )
    .expect("feed");

    assert_eq!(tracker.observe(&events), 2);
    let record = tracker.seal_turn(1).expect("first seal");
    assert_eq!(record, BreachRecord { left: 1, right: 1 });
    assert_eq!(tracker.history().len(), 1);
    assert!(tracker.current_bias());
    assert_eq!(tracker.lane(), Lane::Left);
}

#[test]
fn oldest_record_is_evicted_at_capacity() {
    let mut tracker = tracker(3);
    seal_with(&mut tracker, 1, 0, 9);
    seal_with(&mut tracker, 2, 2, 0);
    seal_with(&mut tracker, 3, 1, 1);
    assert!(!tracker.current_bias());

    seal_with(&mut tracker, 4, 0, 2);
    let retained: Vec<BreachRecord> = tracker.history().copied().collect();
    assert_eq!(
        retained,
        vec![
            BreachRecord { left: 2, right: 0 },
            BreachRecord { left: 1, right: 1 },
            BreachRecord { left: 0, right: 2 },
        ]
    );
    assert!(tracker.current_bias());
}

#[test]
fn each_turn_seals_once() {
    let mut tracker = tracker(3);
    assert!(tracker.record_breach_event(CellCoord::new(20, 6), true));
    assert_eq!(
        tracker.seal_turn(2),
        Some(BreachRecord { left: 0, right: 1 })
    );

    assert!(tracker.record_breach_event(CellCoord::new(20, 6), true));
    assert_eq!(tracker.seal_turn(2), None);
    assert_eq!(tracker.seal_turn(1), None);
    assert_eq!(tracker.history().len(), 1);
    assert_eq!(tracker.pending(), BreachRecord { left: 0, right: 1 });

    assert_eq!(
        tracker.seal_turn(3),
        Some(BreachRecord { left: 0, right: 1 })
    );
    assert_eq!(tracker.history().len(), 2);
}

#[test]
fn quiet_turns_still_seal_empty_records() {
    let mut tracker = tracker(2);
    seal_with(&mut tracker, 1, 0, 1);
    assert_eq!(tracker.seal_turn(2), Some(BreachRecord::default()));
    assert_eq!(tracker.seal_turn(3), Some(BreachRecord::default()));
    assert!(tracker.current_bias());
}
