//! Integration tests for the PetService → FSM → store pipeline.
//!
//! These run on the host against [`MockStore`], [`FixedClock`] and
//! [`RecordingSink`], driving time through `advance` exactly as the run
//! loop does.

use crate::mock_ports::{FixedClock, MockStore, RecordingSink};

use petsim::app::commands::PetCommand;
use petsim::app::events::PetEvent;
use petsim::app::ports::StorageError;
use petsim::app::service::PetService;
use petsim::config::SimConfig;
use petsim::error::Error;
use petsim::fsm::Phase;
use petsim::fsm::context::Needs;
use petsim::needs::{DecayIntervals, Mode, Need};
use petsim::storage::{
    KEY_AWAKE, KEY_FUN, KEY_HUNGER, KEY_LAST_ACTIVE, KEY_REALISTIC, KEY_SLEEP, PERSISTED_KEYS,
};

const T0: i64 = 1_700_000_000_000;

fn config() -> SimConfig {
    SimConfig {
        rng_seed: Some(42),
        ..Default::default()
    }
}

fn start_with(store: MockStore) -> (PetService<MockStore, FixedClock>, RecordingSink) {
    let mut svc = PetService::new(config(), store, FixedClock::at(T0)).unwrap();
    let mut sink = RecordingSink::new();
    svc.start(&mut sink).unwrap();
    (svc, sink)
}

fn away_for(ms: i64) -> MockStore {
    MockStore::new().with(KEY_LAST_ACTIVE, &(T0 - ms).to_string())
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn fresh_store_starts_default_pet_and_saves_it() {
    let (svc, sink) = start_with(MockStore::new());

    assert_eq!(svc.needs(), Needs::default());
    assert_eq!(svc.phase(), Phase::Awake);
    assert_eq!(svc.mode(), Mode::Fast);
    assert_eq!(svc.intervals(), DecayIntervals::FAST);

    assert!(matches!(sink.events.as_slice(), [PetEvent::Started(_)]));
    assert_eq!(svc.store().raw(KEY_HUNGER), Some("100.0"));
    assert_eq!(svc.store().raw(KEY_AWAKE), Some("true"));
    assert_eq!(svc.store().raw(KEY_REALISTIC), Some("false"));
    assert_eq!(svc.store().raw(KEY_LAST_ACTIVE), Some(T0.to_string().as_str()));
}

#[test]
fn restores_asleep_pet_without_rerolling_sleep() {
    let store = MockStore::new()
        .with(KEY_AWAKE, "false")
        .with(KEY_SLEEP, "40");
    let (svc, _) = start_with(store);
    assert_eq!(svc.phase(), Phase::Asleep);
    assert_eq!(svc.needs().sleep, 40.0);
}

#[test]
fn restores_exhausted_awake_pet_as_is() {
    let (svc, _) = start_with(MockStore::new().with(KEY_SLEEP, "0"));
    assert_eq!(svc.phase(), Phase::Awake);
    assert_eq!(svc.needs().sleep, 0.0);
}

#[test]
fn undecodable_value_falls_back_to_default() {
    let (svc, _) = start_with(MockStore::new().with(KEY_HUNGER, "\"lots\""));
    assert_eq!(svc.needs().hunger, 100.0);
}

#[test]
fn start_surfaces_store_failure() {
    let store = MockStore {
        fail_writes: true,
        ..Default::default()
    };
    let mut svc = PetService::new(config(), store, FixedClock::at(T0)).unwrap();
    let err = svc.start(&mut RecordingSink::new()).unwrap_err();
    assert!(matches!(err, Error::Storage(StorageError::Io(_))));
}

// ── Catch-up ──────────────────────────────────────────────────

#[test]
fn nine_seconds_away_in_fast_mode() {
    let (svc, _) = start_with(away_for(9_000));
    let needs = svc.needs();
    assert_eq!(needs.hunger, 97.0);
    assert_eq!(needs.fun, 96.0);
    assert_eq!(needs.sleep, 99.0);
    assert_eq!(svc.store().raw(KEY_LAST_ACTIVE), Some(T0.to_string().as_str()));
}

#[test]
fn realistic_mode_catches_up_with_long_intervals() {
    let (svc, _) = start_with(away_for(61_000).with(KEY_REALISTIC, "true"));
    let needs = svc.needs();
    assert_eq!(needs.hunger, 98.0);
    assert_eq!(needs.fun, 97.0);
    assert_eq!(needs.sleep, 99.0);
}

#[test]
fn catch_up_ignores_phase_and_keeps_fractions() {
    let store = away_for(3_000)
        .with(KEY_AWAKE, "false")
        .with(KEY_HUNGER, "50.5");
    let (svc, _) = start_with(store);
    assert_eq!(svc.needs().hunger, 49.5);
    assert_eq!(svc.phase(), Phase::Asleep);
}

#[test]
fn long_absence_floors_at_zero_without_transition() {
    let (svc, _) = start_with(away_for(10_000_000));
    assert_eq!(
        svc.needs(),
        Needs {
            hunger: 0.0,
            fun: 0.0,
            sleep: 0.0
        }
    );
    assert_eq!(svc.phase(), Phase::Awake);
}

#[test]
fn absurdly_old_last_active_saturates_instead_of_overflowing() {
    let (svc, _) = start_with(MockStore::new().with(KEY_LAST_ACTIVE, &i64::MIN.to_string()));
    assert_eq!(
        svc.needs(),
        Needs {
            hunger: 0.0,
            fun: 0.0,
            sleep: 0.0
        }
    );
    assert_eq!(svc.store().raw(KEY_LAST_ACTIVE), Some(T0.to_string().as_str()));
}

#[test]
fn clock_behind_last_save_applies_nothing() {
    let (svc, _) = start_with(away_for(-60_000));
    assert_eq!(svc.needs(), Needs::default());
}

#[test]
fn immediate_restart_does_not_count_absence_twice() {
    let (first, _) = start_with(away_for(9_000));
    assert_eq!(first.needs().hunger, 97.0);

    let (second, _) = start_with(first.store().clone());
    assert_eq!(second.needs().hunger, 97.0);
}

// ── Periodic ticks ────────────────────────────────────────────

#[test]
fn fast_mode_ticks_on_schedule() {
    let (mut svc, mut sink) = start_with(MockStore::new());

    assert_eq!(svc.advance(1_999, &mut sink).unwrap(), 0);
    assert_eq!(svc.advance(1_001, &mut sink).unwrap(), 2);
    assert_eq!(svc.needs().fun, 99.0);
    assert_eq!(svc.needs().hunger, 99.0);
    assert_eq!(svc.needs().sleep, 100.0);

    svc.advance(2_000, &mut sink).unwrap();
    assert_eq!(svc.needs().sleep, 99.0);
    assert_eq!(sink.updates(), 4);
}

#[test]
fn tick_on_empty_need_renders_without_writing() {
    let (mut svc, mut sink) = start_with(MockStore::new().with(KEY_HUNGER, "0"));
    let writes = svc.store().writes;
    sink.clear();

    svc.tick(Need::Hunger, &mut sink).unwrap();
    assert_eq!(svc.store().writes, writes);
    assert_eq!(sink.updates(), 1);
    assert_eq!(svc.needs().hunger, 0.0);
}

#[test]
fn sleep_tick_always_writes() {
    let (mut svc, mut sink) = start_with(MockStore::new());
    let writes = svc.store().writes;
    svc.tick(Need::Sleep, &mut sink).unwrap();
    assert!(svc.store().writes > writes);
}

#[test]
fn exhausted_pet_falls_asleep_one_tick_late() {
    let (mut svc, mut sink) = start_with(MockStore::new().with(KEY_SLEEP, "1"));

    svc.advance(5_000, &mut sink).unwrap();
    assert_eq!(svc.needs().sleep, 0.0);
    assert_eq!(svc.phase(), Phase::Awake);

    svc.advance(5_000, &mut sink).unwrap();
    assert_eq!(svc.phase(), Phase::Asleep);
    assert_eq!(sink.phase_changes(), vec![(Phase::Awake, Phase::Asleep)]);
    assert_eq!(svc.store().raw(KEY_AWAKE), Some("false"));

    // hunger ticked at 3s, 6s and 9s while awake
    assert_eq!(svc.needs().hunger, 97.0);
    svc.tick(Need::Hunger, &mut sink).unwrap();
    assert_eq!(svc.needs().hunger, 96.5);
}

#[test]
fn rested_pet_wakes_with_rolled_sleep() {
    let store = MockStore::new()
        .with(KEY_AWAKE, "false")
        .with(KEY_SLEEP, "99");
    let (mut svc, mut sink) = start_with(store);

    svc.advance(5_000, &mut sink).unwrap();
    assert_eq!(svc.phase(), Phase::Awake);
    assert_eq!(sink.phase_changes(), vec![(Phase::Asleep, Phase::Awake)]);

    let sleep = svc.needs().sleep;
    assert!((60.0..=100.0).contains(&sleep), "sleep={}", sleep);
    assert_eq!(sleep.fract(), 0.0);
    // fun ticked twice and hunger once, at the asleep rate
    assert_eq!(svc.needs().fun, 99.0);
    assert_eq!(svc.needs().hunger, 99.5);
}

// ── Care ──────────────────────────────────────────────────────

#[test]
fn feed_adds_thirty_and_caps() {
    let (mut svc, mut sink) = start_with(MockStore::new().with(KEY_HUNGER, "50"));

    svc.feed(&mut sink).unwrap();
    assert_eq!(svc.needs().hunger, 80.0);
    assert_eq!(svc.store().raw(KEY_HUNGER), Some("80.0"));

    svc.feed(&mut sink).unwrap();
    assert_eq!(svc.needs().hunger, 100.0);
}

#[test]
fn play_adds_thirty_to_fun() {
    let (mut svc, mut sink) = start_with(MockStore::new().with(KEY_FUN, "10"));
    svc.handle_command(PetCommand::Play, &mut sink).unwrap();
    assert_eq!(svc.needs().fun, 40.0);
    assert_eq!(svc.store().raw(KEY_FUN), Some("40.0"));
}

#[test]
fn care_is_ignored_while_asleep() {
    let store = MockStore::new()
        .with(KEY_AWAKE, "false")
        .with(KEY_HUNGER, "20")
        .with(KEY_FUN, "20");
    let (mut svc, mut sink) = start_with(store);
    let writes = svc.store().writes;
    sink.clear();

    svc.feed(&mut sink).unwrap();
    svc.play(&mut sink).unwrap();

    assert_eq!(svc.needs().hunger, 20.0);
    assert_eq!(svc.needs().fun, 20.0);
    assert_eq!(svc.store().writes, writes);
    assert!(sink.events.is_empty());
}

#[test]
fn saves_are_stamped_with_current_time() {
    let (mut svc, mut sink) = start_with(MockStore::new());
    svc.clock().advance(1_234);
    svc.feed(&mut sink).unwrap();
    assert_eq!(
        svc.store().raw(KEY_LAST_ACTIVE),
        Some((T0 + 1_234).to_string().as_str())
    );
}

// ── Mode ──────────────────────────────────────────────────────

#[test]
fn toggle_switches_intervals_and_keeps_needs() {
    let store = MockStore::new().with(KEY_HUNGER, "64").with(KEY_SLEEP, "12");
    let (mut svc, mut sink) = start_with(store);
    let before = svc.needs();
    sink.clear();

    svc.toggle_mode(&mut sink).unwrap();

    assert_eq!(svc.needs(), before);
    assert_eq!(svc.phase(), Phase::Awake);
    assert_eq!(svc.mode(), Mode::Realistic);
    assert_eq!(svc.intervals(), DecayIntervals::REALISTIC);
    assert_eq!(svc.scheduler().interval_of(Need::Hunger), Some(30_000));
    assert_eq!(svc.store().raw(KEY_REALISTIC), Some("true"));
    assert_eq!(svc.snapshot().toggle_label(), "Switch to Fast Mode");
    assert_eq!(
        sink.events[0],
        PetEvent::ModeChanged {
            mode: Mode::Realistic,
            intervals: DecayIntervals::REALISTIC
        }
    );

    sink.clear();
    assert_eq!(svc.advance(19_999, &mut sink).unwrap(), 0);
    assert_eq!(svc.advance(1, &mut sink).unwrap(), 1);
    assert_eq!(svc.needs().fun, before.fun - 1.0);

    svc.toggle_mode(&mut sink).unwrap();
    assert_eq!(svc.intervals(), DecayIntervals::FAST);
    assert_eq!(svc.snapshot().toggle_label(), "Switch to Realistic Mode");
}

#[test]
fn toggle_restarts_partially_elapsed_timers() {
    let (mut svc, mut sink) = start_with(MockStore::new());
    svc.advance(1_500, &mut sink).unwrap();
    svc.toggle_mode(&mut sink).unwrap();
    svc.toggle_mode(&mut sink).unwrap();

    // fun would have fired at 2s on the old timer; it restarts from zero
    assert_eq!(svc.advance(1_999, &mut sink).unwrap(), 0);
    assert_eq!(svc.advance(1, &mut sink).unwrap(), 1);
}

// ── Reset ─────────────────────────────────────────────────────

#[test]
fn reset_clears_store_and_restores_defaults() {
    let store = MockStore::new()
        .with(KEY_AWAKE, "false")
        .with(KEY_REALISTIC, "true")
        .with(KEY_HUNGER, "5");
    let (mut svc, mut sink) = start_with(store);
    sink.clear();

    svc.reset(&mut sink).unwrap();

    for key in PERSISTED_KEYS {
        assert_eq!(svc.store().raw(key), None, "{} survived reset", key);
    }
    assert_eq!(svc.store().clears, 1);
    assert_eq!(svc.needs(), Needs::default());
    assert_eq!(svc.phase(), Phase::Awake);
    assert_eq!(svc.mode(), Mode::Fast);
    assert_eq!(svc.scheduler().interval_of(Need::Sleep), Some(5_000));

    assert_eq!(sink.events.len(), 2);
    assert_eq!(sink.events[0], PetEvent::Reset);
    assert_eq!(sink.events[1], PetEvent::Updated(svc.snapshot()));
}

#[test]
fn pet_after_reset_reloads_as_default() {
    let (mut svc, mut sink) = start_with(away_for(9_000));
    svc.reset(&mut sink).unwrap();

    let (fresh, _) = start_with(svc.store().clone());
    assert_eq!(fresh.needs(), Needs::default());
    assert_eq!(fresh.mode(), Mode::Fast);
}
