//! Simulated vendor client — an in-process robot for demos and wiring
//! without hardware.
//!
//! Implements the full [`VacuumClient`] surface over a small mission state
//! machine; commands fail with [`ClientError::NotConnected`] until
//! [`connect`](VacuumClient::connect) has been called.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::client::{BinState, ClientError, MissionState, Position, VacuumClient};

#[derive(Debug)]
struct SimState {
    connected: bool,
    battery_level: u8,
    mission_name: Option<String>,
    mission: MissionState,
    bin: BinState,
    position: Position,
    stop_on_full_bin: bool,
    two_passes: bool,
    mapping: bool,
}

impl Default for SimState {
    fn default() -> Self {
        Self {
            connected: false,
            battery_level: 100,
            mission_name: None,
            mission: MissionState::Charge,
            bin: BinState::Present,
            position: Position {
                x: 0,
                y: 0,
                theta: 0,
            },
            stop_on_full_bin: true,
            two_passes: false,
            mapping: false,
        }
    }
}

/// In-process robot that starts docked, charged, and disconnected.
#[derive(Debug, Default)]
pub struct SimulatedVacuum {
    state: Mutex<SimState>,
}

impl SimulatedVacuum {
    /// Create a fresh simulated robot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn command(
        &self,
        mission: MissionState,
        mission_name: Option<&str>,
    ) -> Result<(), ClientError> {
        let mut state = self.lock();
        if !state.connected {
            return Err(ClientError::NotConnected);
        }
        state.mission = mission;
        state.mission_name = mission_name.map(str::to_string);
        Ok(())
    }
}

impl VacuumClient for SimulatedVacuum {
    fn connect(&self) -> Result<(), ClientError> {
        self.lock().connected = true;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.lock().connected
    }

    fn battery_level(&self) -> Result<u8, ClientError> {
        let state = self.lock();
        if !state.connected {
            return Err(ClientError::NotConnected);
        }
        Ok(state.battery_level)
    }

    fn bin_state(&self) -> Result<BinState, ClientError> {
        Ok(self.lock().bin)
    }

    fn mission_name(&self) -> Result<Option<String>, ClientError> {
        Ok(self.lock().mission_name.clone())
    }

    fn mission_state(&self) -> Result<MissionState, ClientError> {
        Ok(self.lock().mission)
    }

    fn position(&self) -> Result<Option<Position>, ClientError> {
        Ok(Some(self.lock().position))
    }

    fn start_clean(&self) -> Result<(), ClientError> {
        self.command(MissionState::Run, Some("clean"))
    }

    fn stop(&self) -> Result<(), ClientError> {
        self.command(MissionState::Stop, None)
    }

    fn pause(&self) -> Result<(), ClientError> {
        let mut state = self.lock();
        if !state.connected {
            return Err(ClientError::NotConnected);
        }
        state.mission = MissionState::Pause;
        Ok(())
    }

    fn resume(&self) -> Result<(), ClientError> {
        let mut state = self.lock();
        if !state.connected {
            return Err(ClientError::NotConnected);
        }
        state.mission = MissionState::Run;
        Ok(())
    }

    fn dock(&self) -> Result<(), ClientError> {
        self.command(MissionState::ReturnHome, None)
    }

    fn quick_clean(&self) -> Result<(), ClientError> {
        self.command(MissionState::Run, Some("quick"))
    }

    fn spot_clean(&self) -> Result<(), ClientError> {
        self.command(MissionState::Run, Some("spot"))
    }

    fn start_training(&self) -> Result<(), ClientError> {
        self.command(MissionState::Run, Some("train"))
    }

    fn locate_with_beep(&self) -> Result<(), ClientError> {
        if !self.lock().connected {
            return Err(ClientError::NotConnected);
        }
        Ok(())
    }

    fn set_stop_on_full_bin(&self, enabled: bool) -> Result<(), ClientError> {
        self.lock().stop_on_full_bin = enabled;
        Ok(())
    }

    fn set_two_passes(&self, enabled: bool) -> Result<(), ClientError> {
        self.lock().two_passes = enabled;
        Ok(())
    }

    fn enable_mapping(
        &self,
        _map_path: &str,
        _floorplan_path: Option<&str>,
    ) -> Result<(), ClientError> {
        self.lock().mapping = true;
        Ok(())
    }
}
