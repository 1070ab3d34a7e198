//! End-to-end persistence through the real disk adapter.
//!
//! Each test opens a temp data directory, runs a session, drops it and
//! reopens the directory the way a second `petsim` invocation would.

use crate::mock_ports::{FixedClock, RecordingSink};

use petsim::adapters::disk::DiskAdapter;
use petsim::app::ports::{ConfigPort, StorePort};
use petsim::app::service::PetService;
use petsim::config::SimConfig;
use petsim::fsm::Phase;
use petsim::fsm::context::Needs;
use petsim::needs::Mode;
use petsim::storage::KEY_HUNGER;

const T0: i64 = 1_700_000_000_000;

fn session(dir: &std::path::Path, now_ms: i64) -> PetService<DiskAdapter, FixedClock> {
    let disk = DiskAdapter::open(dir).unwrap();
    let config = SimConfig {
        rng_seed: Some(5),
        ..disk.load().unwrap()
    };
    let mut svc = PetService::new(config, disk, FixedClock::at(now_ms)).unwrap();
    svc.start(&mut RecordingSink::new()).unwrap();
    svc
}

#[test]
fn state_and_absence_carry_across_runs() {
    let tmp = tempfile::tempdir().unwrap();
    let mut sink = RecordingSink::new();

    let mut first = session(tmp.path(), T0);
    first.advance(6_000, &mut sink).unwrap(); // hunger 98
    first.toggle_mode(&mut sink).unwrap();
    drop(first);

    // 65s later in realistic mode: hunger -2, fun -3, sleep -1
    let second = session(tmp.path(), T0 + 65_000);
    assert_eq!(second.mode(), Mode::Realistic);
    assert_eq!(second.needs().hunger, 96.0);
    assert_eq!(second.phase(), Phase::Awake);
}

#[test]
fn reset_leaves_a_fresh_pet_on_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let mut sink = RecordingSink::new();

    let mut first = session(tmp.path(), T0);
    first.advance(30_000, &mut sink).unwrap();
    first.reset(&mut sink).unwrap();
    assert_eq!(first.store().get(KEY_HUNGER).unwrap(), None);
    drop(first);

    let second = session(tmp.path(), T0 + 1_000_000);
    assert_eq!(second.needs(), Needs::default());
    assert_eq!(second.mode(), Mode::Fast);
}

#[test]
fn config_file_changes_care_boost() {
    let tmp = tempfile::tempdir().unwrap();
    DiskAdapter::open(tmp.path())
        .unwrap()
        .save(&SimConfig {
            care_boost: 10.0,
            ..Default::default()
        })
        .unwrap();

    let mut svc = session(tmp.path(), T0);
    let mut sink = RecordingSink::new();
    svc.advance(30_000, &mut sink).unwrap(); // hunger 90
    svc.feed(&mut sink).unwrap();
    assert_eq!(svc.needs().hunger, 100.0);
    svc.advance(60_000, &mut sink).unwrap(); // hunger 80
    svc.feed(&mut sink).unwrap();
    assert_eq!(svc.needs().hunger, 90.0);
}
