//! Scripted vendor client shared by this crate's unit tests.

use std::sync::Mutex;

use crate::client::{ClientError, LockClient};

struct MockState {
    locked: bool,
    battery_low: bool,
    no_response: bool,
    fail_next: bool,
    lock_calls: usize,
    unlock_calls: usize,
}

/// Vendor lock double with scripted state and call counters.
pub(crate) struct MockLock {
    name: String,
    state: Mutex<MockState>,
}

impl MockLock {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            state: Mutex::new(MockState {
                locked: true,
                battery_low: false,
                no_response: false,
                fail_next: false,
                lock_calls: 0,
                unlock_calls: 0,
            }),
        }
    }

    pub(crate) fn set_locked(&self, locked: bool) {
        self.state.lock().unwrap().locked = locked;
    }

    pub(crate) fn set_battery_low(&self, battery_low: bool) {
        self.state.lock().unwrap().battery_low = battery_low;
    }

    pub(crate) fn fail_next_command(&self) {
        self.state.lock().unwrap().fail_next = true;
    }

    pub(crate) fn lock_calls(&self) -> usize {
        self.state.lock().unwrap().lock_calls
    }

    pub(crate) fn unlock_calls(&self) -> usize {
        self.state.lock().unwrap().unlock_calls
    }
}

impl LockClient for MockLock {
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
        let mut state = self.state.lock().unwrap();
        state.lock_calls += 1;
        if state.fail_next {
            state.fail_next = false;
            return Err(ClientError::Rejected);
        }
        state.locked = true;
        Ok(())
    }

    fn unlock(&self) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();
        state.unlock_calls += 1;
        if state.fail_next {
            state.fail_next = false;
            return Err(ClientError::Rejected);
        }
        state.locked = false;
        Ok(())
    }

    fn is_locked(&self) -> Result<bool, ClientError> {
        Ok(self.state.lock().unwrap().locked)
    }

    fn battery_low(&self) -> Result<bool, ClientError> {
        Ok(self.state.lock().unwrap().battery_low)
    }

    fn no_response(&self) -> Result<bool, ClientError> {
        Ok(self.state.lock().unwrap().no_response)
    }
}
