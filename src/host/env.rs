use std::sync::{Arc, Mutex};

use crate::foundation::error::{LoomError, LoomResult};

/// Environment variable read by [`EnvHost`].
pub const HOST_ENV_VAR: &str = "LOOM_HOST";

/// The embedding host. Every call may fail; callers degrade instead of surfacing errors.
pub trait Host {
    /// Whether Loom runs embedded as a mini app rather than on the open web.
    fn is_mini_app(&self) -> LoomResult<bool>;

    /// Signal that the first render is on screen.
    fn ready(&self) -> LoomResult<()>;

    /// Pulse haptics for `ms` milliseconds. Unsupported hosts do nothing.
    fn vibrate(&self, ms: u32) -> LoomResult<()>;
}

/// Host described by the `LOOM_HOST` variable: `mini`/`miniapp` or `web` (the default).
#[derive(Clone, Debug, Default)]
pub struct EnvHost {
    value: Option<String>,
}

impl EnvHost {
    /// Read `LOOM_HOST` from the process environment.
    pub fn from_env() -> Self {
        Self {
            value: std::env::var(HOST_ENV_VAR).ok(),
        }
    }

    /// Host with an explicit `LOOM_HOST` value.
    pub fn with_value(value: Option<&str>) -> Self {
        Self {
            value: value.map(str::to_string),
        }
    }
}

impl Host for EnvHost {
    fn is_mini_app(&self) -> LoomResult<bool> {
        match self.value.as_deref().map(str::trim) {
            None | Some("") => Ok(false),
            Some(v) if v.eq_ignore_ascii_case("web") => Ok(false),
            Some(v) if v.eq_ignore_ascii_case("mini") || v.eq_ignore_ascii_case("miniapp") => {
                Ok(true)
            }
            Some(v) => Err(LoomError::host(format!(
                "unrecognized {HOST_ENV_VAR} value '{v}'"
            ))),
        }
    }

    fn ready(&self) -> LoomResult<()> {
        tracing::debug!("host ready");
        Ok(())
    }

    fn vibrate(&self, ms: u32) -> LoomResult<()> {
        tracing::trace!(ms, "haptics unsupported on this host");
        Ok(())
    }
}

#[derive(Debug, Default)]
struct RecordingState {
    mini_app: bool,
    fail_detect: bool,
    fail_ready: bool,
    ready_calls: usize,
    vibrations: Vec<u32>,
}

/// Host double that records lifecycle calls. Clones share the record.
#[derive(Clone, Debug, Default)]
pub struct RecordingHost {
    state: Arc<Mutex<RecordingState>>,
}

impl RecordingHost {
    /// A web host with no failures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the mini-app context.
    pub fn set_mini_app(&self, mini: bool) {
        self.lock_state().mini_app = mini;
    }

    /// Make detection fail.
    pub fn set_fail_detect(&self, fail: bool) {
        self.lock_state().fail_detect = fail;
    }

    /// Make the ready signal fail.
    pub fn set_fail_ready(&self, fail: bool) {
        self.lock_state().fail_ready = fail;
    }

    /// How many times `ready` was called, including failed calls.
    pub fn ready_calls(&self) -> usize {
        self.lock_state().ready_calls
    }

    /// Durations passed to `vibrate`, in call order.
    pub fn vibrations(&self) -> Vec<u32> {
        self.lock_state().vibrations.clone()
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, RecordingState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Host for RecordingHost {
    fn is_mini_app(&self) -> LoomResult<bool> {
        let state = self.lock_state();
        if state.fail_detect {
            return Err(LoomError::host("context query rejected"));
        }
        Ok(state.mini_app)
    }

    fn ready(&self) -> LoomResult<()> {
        let mut state = self.lock_state();
        state.ready_calls += 1;
        if state.fail_ready {
            return Err(LoomError::host("ready signal rejected"));
        }
        Ok(())
    }

    fn vibrate(&self, ms: u32) -> LoomResult<()> {
        self.lock_state().vibrations.push(ms);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/env.rs"]
mod tests;
