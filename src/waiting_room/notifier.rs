//! Call notifier: current call, bounded history, chime and timed expiry.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::call::Call;
use super::sound::{AlertSounder, Chime};
use crate::config::AppConfig;
use crate::error::Result;
use crate::models::{Doctor, Patient};

/// Number of calls kept for the "recent calls" list.
pub const HISTORY_LIMIT: usize = 5;

/// Timing and volume settings for the notifier.
#[derive(Debug, Clone)]
pub struct NotifierSettings {
    /// How long an unsuperseded call stays on the display.
    pub expiry_delay: Duration,
    /// Gap between the primary chime and its repeat.
    pub reinforce_delay: Duration,
    pub volume: f32,
    pub sound_enabled: bool,
}

impl NotifierSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            expiry_delay: config.waiting_room.expiry_delay(),
            reinforce_delay: config.waiting_room.reinforce_delay(),
            volume: config.audio.volume,
            sound_enabled: config.audio.enabled,
        }
    }
}

impl Default for NotifierSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// Current-call slot.
#[derive(Debug, Default)]
enum CallSlot {
    #[default]
    Empty,
    Announced {
        call: Call,
        expires_at: Instant,
        timer: JoinHandle<()>,
    },
}

#[derive(Debug, Default)]
struct CallState {
    slot: CallSlot,
    /// Most recent first, at most `HISTORY_LIMIT` entries.
    history: Vec<Call>,
    reinforcement: Option<JoinHandle<()>>,
}

/// Point-in-time view for the display.
#[derive(Debug, Clone, PartialEq)]
pub struct WaitingRoomSnapshot {
    pub current: Option<Call>,
    pub history: Vec<Call>,
    /// Time left before the current call is cleared.
    pub remaining: Option<Duration>,
}

struct Inner {
    state: Mutex<CallState>,
    sounder: Arc<dyn AlertSounder>,
    runtime: Handle,
    settings: NotifierSettings,
}

/// Shared handle to the waiting-room notifier.
///
/// Cloning is cheap; all clones see the same state. Timers run on the tokio
/// runtime passed to [`WaitingRoom::new`].
#[derive(Clone)]
pub struct WaitingRoom {
    inner: Arc<Inner>,
}

impl WaitingRoom {
    /// Create an empty notifier.
    pub fn new(settings: NotifierSettings, sounder: Arc<dyn AlertSounder>, runtime: Handle) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(CallState::default()),
                sounder,
                runtime,
                settings,
            }),
        }
    }

    /// Announce a patient, chime, and schedule the call to clear itself.
    ///
    /// Any call still on display is replaced and its pending expiry is aborted.
    pub fn call_next_patient(&self, patient: Patient, doctor: Doctor, cabinet_number: &str) -> Result<Call> {
        let call = Call::new(patient, doctor, cabinet_number)?;
        let expires_at = Instant::now() + self.inner.settings.expiry_delay;

        {
            let mut state = self.inner.lock();

            if let CallSlot::Announced { call: previous, timer, .. } = std::mem::take(&mut state.slot) {
                timer.abort();
                debug!("Call {} superseded by {}", previous.id, call.id);
            }

            let timer = self.spawn_expiry(call.id, expires_at);
            state.slot = CallSlot::Announced {
                call: call.clone(),
                expires_at,
                timer,
            };

            state.history.insert(0, call.clone());
            state.history.truncate(HISTORY_LIMIT);
        }

        info!(
            "Calling {} to cabinet {} for {}",
            call.patient.full_name(),
            call.cabinet_number,
            call.doctor.display_name()
        );

        self.play_notification_sound();
        Ok(call)
    }

    /// Play the primary chime now and its reinforcement shortly after.
    ///
    /// Audio failures are logged and swallowed.
    pub fn play_notification_sound(&self) {
        let settings = &self.inner.settings;
        if !settings.sound_enabled {
            debug!("Sound disabled, skipping chime");
            return;
        }

        self.inner.play(&Chime::primary().with_volume(settings.volume));

        let weak = Arc::downgrade(&self.inner);
        let delay = settings.reinforce_delay;
        let volume = settings.volume;
        let handle = self.inner.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = weak.upgrade() {
                inner.play(&Chime::reinforcement().with_volume(volume));
            }
        });

        // Only one reinforcement pending at a time.
        if let Some(previous) = self.inner.lock().reinforcement.replace(handle) {
            previous.abort();
        }
    }

    /// Call currently on display, if any.
    pub fn current_call(&self) -> Option<Call> {
        match &self.inner.lock().slot {
            CallSlot::Announced { call, .. } => Some(call.clone()),
            CallSlot::Empty => None,
        }
    }

    /// Recent calls, most recent first.
    pub fn history(&self) -> Vec<Call> {
        self.inner.lock().history.clone()
    }

    /// Current call and history read together.
    pub fn snapshot(&self) -> WaitingRoomSnapshot {
        let state = self.inner.lock();
        let (current, remaining) = match &state.slot {
            CallSlot::Announced { call, expires_at, .. } => (
                Some(call.clone()),
                Some(expires_at.saturating_duration_since(Instant::now())),
            ),
            CallSlot::Empty => (None, None),
        };
        WaitingRoomSnapshot {
            current,
            history: state.history.clone(),
            remaining,
        }
    }

    fn spawn_expiry(&self, call_id: Uuid, expires_at: Instant) -> JoinHandle<()> {
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        self.inner.runtime.spawn(async move {
            tokio::time::sleep_until(expires_at).await;
            if let Some(inner) = weak.upgrade() {
                inner.expire(call_id);
            }
        })
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, CallState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn play(&self, chime: &Chime) {
        if let Err(e) = self.sounder.play(chime) {
            warn!("Chime not played ({:?}): {}", chime.kind, e);
        }
    }

    /// Clear the slot if `call_id` is still the installed call.
    fn expire(&self, call_id: Uuid) {
        let mut state = self.lock();
        let installed = matches!(&state.slot, CallSlot::Announced { call, .. } if call.id == call_id);
        if installed {
            info!("Call {} expired, clearing display", call_id);
            state.slot = CallSlot::Empty;
        } else {
            debug!("Ignoring stale expiry for call {}", call_id);
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let CallSlot::Announced { timer, .. } = &state.slot {
            timer.abort();
        }
        if let Some(handle) = &state.reinforcement {
            handle.abort();
        }
    }
}
