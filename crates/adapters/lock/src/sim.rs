//! Simulated vendor client — an in-process door lock for demos and wiring
//! without hardware.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::client::{ClientError, LockClient};

#[derive(Debug)]
struct SimState {
    locked: bool,
    battery_low: bool,
    no_response: bool,
}

/// In-process lock that starts locked and healthy.
#[derive(Debug)]
pub struct SimulatedLock {
    name: String,
    state: Mutex<SimState>,
}

impl SimulatedLock {
    /// Create a simulated lock with the given display name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Mutex::new(SimState {
                locked: true,
                battery_low: false,
                no_response: false,
            }),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SimulatedLock {
    fn default() -> Self {
        Self::new("Front Door")
    }
}

impl LockClient for SimulatedLock {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn vendor_device_id(&self) -> String {
        "ZW:00000001".to_string()
    }

    fn device_kind(&self) -> String {
        "Door Lock".to_string()
    }

    fn lock(&self) -> Result<(), ClientError> {
        self.lock_state().locked = true;
        Ok(())
    }

    fn unlock(&self) -> Result<(), ClientError> {
        self.lock_state().locked = false;
        Ok(())
    }

    fn is_locked(&self) -> Result<bool, ClientError> {
        Ok(self.lock_state().locked)
    }

    fn battery_low(&self) -> Result<bool, ClientError> {
        Ok(self.lock_state().battery_low)
    }

    fn no_response(&self) -> Result<bool, ClientError> {
        Ok(self.lock_state().no_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_start_locked_and_healthy() {
        let lock = SimulatedLock::default();
        assert_eq!(lock.name(), "Front Door");
        assert!(lock.is_locked().unwrap());
        assert!(!lock.battery_low().unwrap());
        assert!(!lock.no_response().unwrap());
    }

    #[test]
    fn should_toggle_locked_state() {
        let lock = SimulatedLock::new("Back Door");
        lock.unlock().unwrap();
        assert!(!lock.is_locked().unwrap());
        lock.lock().unwrap();
        assert!(lock.is_locked().unwrap());
    }
}
