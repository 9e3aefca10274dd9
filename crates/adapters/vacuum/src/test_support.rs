//! Scripted vendor client shared by this crate's unit tests.

use std::sync::Mutex;
use std::time::Duration;

use crate::client::{BinState, ClientError, MissionState, Position, VacuumClient};

struct MockState {
    connected: bool,
    battery_level: u8,
    mission_name: Option<String>,
    mission_state: MissionState,
    bin_state: BinState,
    position: Option<Position>,
    fail_battery: bool,
    connect_delay: Duration,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            connected: false,
            battery_level: 100,
            mission_name: None,
            mission_state: MissionState::Charge,
            bin_state: BinState::Present,
            position: None,
            fail_battery: false,
            connect_delay: Duration::ZERO,
        }
    }
}

/// Vendor client double with scripted readings and a call log.
#[derive(Default)]
pub(crate) struct MockVacuum {
    state: Mutex<MockState>,
    calls: Mutex<Vec<String>>,
}

impl MockVacuum {
    /// A mock that already holds a live connection.
    pub(crate) fn connected() -> Self {
        let mock = Self::default();
        mock.state.lock().unwrap().connected = true;
        mock
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub(crate) fn set_connected(&self, connected: bool) {
        self.state.lock().unwrap().connected = connected;
    }

    pub(crate) fn set_battery_level(&self, level: u8) {
        self.state.lock().unwrap().battery_level = level;
    }

    pub(crate) fn set_mission_name(&self, name: Option<String>) {
        self.state.lock().unwrap().mission_name = name;
    }

    pub(crate) fn set_mission_state(&self, mission: MissionState) {
        self.state.lock().unwrap().mission_state = mission;
    }

    pub(crate) fn set_bin_state(&self, bin: BinState) {
        self.state.lock().unwrap().bin_state = bin;
    }

    pub(crate) fn set_position(&self, position: Option<Position>) {
        self.state.lock().unwrap().position = position;
    }

    pub(crate) fn fail_next_battery_read(&self) {
        self.state.lock().unwrap().fail_battery = true;
    }

    pub(crate) fn set_connect_delay(&self, delay: Duration) {
        self.state.lock().unwrap().connect_delay = delay;
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

impl VacuumClient for MockVacuum {
    fn connect(&self) -> Result<(), ClientError> {
        let delay = self.state.lock().unwrap().connect_delay;
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        self.state.lock().unwrap().connected = true;
        self.record("connect");
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.state.lock().unwrap().connected
    }

    fn battery_level(&self) -> Result<u8, ClientError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_battery {
            state.fail_battery = false;
            return Err(ClientError::Rejected);
        }
        Ok(state.battery_level)
    }

    fn bin_state(&self) -> Result<BinState, ClientError> {
        Ok(self.state.lock().unwrap().bin_state)
    }

    fn mission_name(&self) -> Result<Option<String>, ClientError> {
        Ok(self.state.lock().unwrap().mission_name.clone())
    }

    fn mission_state(&self) -> Result<MissionState, ClientError> {
        Ok(self.state.lock().unwrap().mission_state)
    }

    fn position(&self) -> Result<Option<Position>, ClientError> {
        Ok(self.state.lock().unwrap().position)
    }

    fn start_clean(&self) -> Result<(), ClientError> {
        self.record("start_clean");
        Ok(())
    }

    fn stop(&self) -> Result<(), ClientError> {
        self.record("stop");
        Ok(())
    }

    fn pause(&self) -> Result<(), ClientError> {
        self.record("pause");
        Ok(())
    }

    fn resume(&self) -> Result<(), ClientError> {
        self.record("resume");
        Ok(())
    }

    fn dock(&self) -> Result<(), ClientError> {
        self.record("dock");
        Ok(())
    }

    fn quick_clean(&self) -> Result<(), ClientError> {
        self.record("quick_clean");
        Ok(())
    }

    fn spot_clean(&self) -> Result<(), ClientError> {
        self.record("spot_clean");
        Ok(())
    }

    fn start_training(&self) -> Result<(), ClientError> {
        self.record("start_training");
        Ok(())
    }

    fn locate_with_beep(&self) -> Result<(), ClientError> {
        self.record("locate_with_beep");
        Ok(())
    }

    fn set_stop_on_full_bin(&self, enabled: bool) -> Result<(), ClientError> {
        self.record(format!("set_stop_on_full_bin:{enabled}"));
        Ok(())
    }

    fn set_two_passes(&self, enabled: bool) -> Result<(), ClientError> {
        self.record(format!("set_two_passes:{enabled}"));
        Ok(())
    }

    fn enable_mapping(
        &self,
        map_path: &str,
        floorplan_path: Option<&str>,
    ) -> Result<(), ClientError> {
        self.record(format!(
            "enable_mapping:{map_path}:{}",
            floorplan_path.unwrap_or("-")
        ));
        Ok(())
    }
}
