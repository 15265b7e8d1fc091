//! Timing tests for the waiting-room notifier, run on tokio's paused clock.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::time::sleep;

use super::notifier::{HISTORY_LIMIT, NotifierSettings, WaitingRoom};
use super::sound::{AlertSounder, AudioError, Chime, ChimeKind};
use crate::error::AppError;
use crate::mock;
use crate::models::{Doctor, Patient};

#[derive(Default)]
struct RecordingSounder {
    played: Mutex<Vec<ChimeKind>>,
}

impl RecordingSounder {
    fn played(&self) -> Vec<ChimeKind> {
        self.played.lock().unwrap().clone()
    }
}

impl AlertSounder for RecordingSounder {
    fn play(&self, chime: &Chime) -> Result<(), AudioError> {
        self.played.lock().unwrap().push(chime.kind);
        Ok(())
    }
}

struct FailingSounder;

impl AlertSounder for FailingSounder {
    fn play(&self, _chime: &Chime) -> Result<(), AudioError> {
        Err(AudioError::Unavailable("no output device".to_string()))
    }
}

fn settings(expiry_secs: u64) -> NotifierSettings {
    NotifierSettings {
        expiry_delay: Duration::from_secs(expiry_secs),
        ..NotifierSettings::default()
    }
}

fn patient(i: usize) -> Patient {
    let patients = mock::patients();
    patients[i % patients.len()].clone()
}

fn doctor(i: usize) -> Doctor {
    let doctors = mock::doctors();
    doctors[i % doctors.len()].clone()
}

fn room_with(settings: NotifierSettings) -> (WaitingRoom, Arc<RecordingSounder>) {
    let sounder = Arc::new(RecordingSounder::default());
    let room = WaitingRoom::new(settings, sounder.clone(), Handle::current());
    (room, sounder)
}

#[tokio::test(start_paused = true)]
async fn test_starts_empty() {
    let (room, sounder) = room_with(NotifierSettings::default());
    assert!(room.current_call().is_none());
    assert!(room.history().is_empty());
    assert!(sounder.played().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_current_call_is_head_of_history() {
    let (room, _) = room_with(NotifierSettings::default());

    let call = room.call_next_patient(patient(0), doctor(0), "Cabinet 3").unwrap();

    let current = room.current_call().unwrap();
    assert_eq!(current.patient, patient(0));
    assert_eq!(current.doctor, doctor(0));
    assert_eq!(current.cabinet_number, "Cabinet 3");
    assert_eq!(current, call);
    assert_eq!(room.history().first(), Some(&current));
}

#[tokio::test(start_paused = true)]
async fn test_history_is_bounded_and_most_recent_first() {
    let (room, _) = room_with(NotifierSettings::default());

    let mut issued = Vec::new();
    for i in 0..8 {
        let call = room.call_next_patient(patient(i), doctor(i), &format!("{}", i + 1)).unwrap();
        issued.push(call.id);

        let history = room.history();
        assert!(history.len() <= HISTORY_LIMIT);
        assert_eq!(history[0].id, call.id);
        sleep(Duration::from_secs(1)).await;
    }

    let history: Vec<_> = room.history().into_iter().map(|c| c.id).collect();
    let expected: Vec<_> = issued.iter().rev().take(HISTORY_LIMIT).copied().collect();
    assert_eq!(history, expected);

    let times: Vec<_> = room.history().into_iter().map(|c| c.timestamp).collect();
    assert!(times.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test(start_paused = true)]
async fn test_call_expires_after_delay_and_not_before() {
    let (room, _) = room_with(NotifierSettings::default());
    room.call_next_patient(patient(0), doctor(0), "1").unwrap();

    sleep(Duration::from_millis(44_900)).await;
    assert!(room.current_call().is_some());

    sleep(Duration::from_millis(200)).await;
    assert!(room.current_call().is_none());

    // Expiry clears the display, not the log.
    assert_eq!(room.history().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_superseded_timer_does_not_clear_new_call() {
    let (room, _) = room_with(NotifierSettings::default());

    room.call_next_patient(patient(0), doctor(0), "3").unwrap();
    sleep(Duration::from_secs(5)).await;
    let second = room.call_next_patient(patient(1), doctor(1), "1").unwrap();

    // Past the first call's deadline (t=45s).
    sleep(Duration::from_secs(41)).await;
    assert_eq!(room.current_call(), Some(second));

    // Past the second call's own deadline (t=50s).
    sleep(Duration::from_secs(5)).await;
    assert!(room.current_call().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_cabinet_scenario_with_thirty_second_delay() {
    let (room, _) = room_with(settings(30));

    let call_a = room.call_next_patient(patient(0), doctor(0), "Cabinet 3").unwrap();
    assert_eq!(room.current_call().as_ref(), Some(&call_a));
    assert_eq!(room.history(), vec![call_a.clone()]);

    sleep(Duration::from_secs(5)).await;
    let call_b = room.call_next_patient(patient(1), doctor(1), "Cabinet 1").unwrap();
    assert_eq!(room.current_call().as_ref(), Some(&call_b));
    assert_eq!(room.history(), vec![call_b.clone(), call_a]);

    // t = 30s, when call A's timer would have fired.
    sleep(Duration::from_millis(25_100)).await;
    assert_eq!(room.current_call(), Some(call_b));
}

#[tokio::test(start_paused = true)]
async fn test_invalid_call_leaves_state_untouched() {
    let (room, sounder) = room_with(NotifierSettings::default());
    let first = room.call_next_patient(patient(0), doctor(0), "2").unwrap();

    let err = room.call_next_patient(patient(1), doctor(1), "  ").unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    assert_eq!(room.current_call(), Some(first));
    assert_eq!(room.history().len(), 1);
    assert_eq!(sounder.played(), vec![ChimeKind::Primary]);
}

#[tokio::test(start_paused = true)]
async fn test_reads_are_idempotent() {
    let (room, _) = room_with(NotifierSettings::default());
    room.call_next_patient(patient(2), doctor(2), "2").unwrap();

    assert_eq!(room.current_call(), room.current_call());
    assert_eq!(room.history(), room.history());
}

#[tokio::test(start_paused = true)]
async fn test_chime_and_reinforcement() {
    let (room, sounder) = room_with(NotifierSettings::default());
    room.call_next_patient(patient(0), doctor(0), "1").unwrap();
    assert_eq!(sounder.played(), vec![ChimeKind::Primary]);

    sleep(Duration::from_millis(2100)).await;
    assert_eq!(sounder.played(), vec![ChimeKind::Primary, ChimeKind::Reinforcement]);
}

#[tokio::test(start_paused = true)]
async fn test_new_call_replaces_pending_reinforcement() {
    let (room, sounder) = room_with(NotifierSettings::default());
    room.call_next_patient(patient(0), doctor(0), "1").unwrap();
    sleep(Duration::from_secs(1)).await;
    room.call_next_patient(patient(1), doctor(1), "2").unwrap();

    sleep(Duration::from_secs(10)).await;
    assert_eq!(
        sounder.played(),
        vec![ChimeKind::Primary, ChimeKind::Primary, ChimeKind::Reinforcement]
    );
}

#[tokio::test(start_paused = true)]
async fn test_failing_audio_does_not_block_call() {
    let room = WaitingRoom::new(NotifierSettings::default(), Arc::new(FailingSounder), Handle::current());

    let call = room.call_next_patient(patient(0), doctor(0), "1").unwrap();
    room.play_notification_sound();
    sleep(Duration::from_secs(3)).await;

    assert_eq!(room.current_call(), Some(call));
}

#[tokio::test(start_paused = true)]
async fn test_sound_disabled_plays_nothing() {
    let (room, sounder) = room_with(NotifierSettings {
        sound_enabled: false,
        ..NotifierSettings::default()
    });
    room.call_next_patient(patient(0), doctor(0), "1").unwrap();
    sleep(Duration::from_secs(3)).await;

    assert!(sounder.played().is_empty());
    assert!(room.current_call().is_some());
}

#[tokio::test(start_paused = true)]
async fn test_snapshot_counts_down() {
    let (room, _) = room_with(NotifierSettings::default());
    room.call_next_patient(patient(0), doctor(0), "1").unwrap();

    let snapshot = room.snapshot();
    assert_eq!(snapshot.remaining, Some(Duration::from_secs(45)));
    assert_eq!(snapshot.history.len(), 1);

    sleep(Duration::from_secs(10)).await;
    let remaining = room.snapshot().remaining.unwrap();
    assert!(remaining <= Duration::from_secs(35));
    assert!(remaining >= Duration::from_millis(34_900));

    sleep(Duration::from_secs(40)).await;
    let snapshot = room.snapshot();
    assert!(snapshot.current.is_none());
    assert!(snapshot.remaining.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_clones_share_state() {
    let (room, _) = room_with(NotifierSettings::default());
    let display = room.clone();

    let call = room.call_next_patient(patient(0), doctor(0), "1").unwrap();
    assert_eq!(display.current_call(), Some(call));
}
