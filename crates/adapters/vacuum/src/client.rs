//! Vendor client contract — the blocking robot-vacuum SDK surface the
//! adapter consumes.
//!
//! The wire protocol behind these calls is internal to the vendor SDK;
//! nook only ever sees this trait. All methods may block on network IO,
//! so the adapter runs them on tokio's blocking worker pool via
//! [`dispatch`] and suspends until they finish.

use std::fmt;
use std::sync::Arc;

use crate::error::VacuumError;

/// Error surfaced by a vendor client implementation.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// No live session with the robot.
    #[error("no connection to the robot")]
    NotConnected,

    /// The robot refused the command (wrong mode, fault, …).
    #[error("robot rejected the command")]
    Rejected,

    /// The underlying transport failed.
    #[error("transport failure")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// The robot's current mission phase, as reported by the vendor SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionState {
    /// Actively cleaning.
    Run,
    Stop,
    Pause,
    /// Sitting on the dock, charging.
    Charge,
    /// Driving back to the dock.
    ReturnHome,
}

impl MissionState {
    /// Whether this phase counts as "cleaning in progress".
    #[must_use]
    pub fn is_running(self) -> bool {
        matches!(self, Self::Run)
    }
}

impl fmt::Display for MissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Run => f.write_str("run"),
            Self::Stop => f.write_str("stop"),
            Self::Pause => f.write_str("pause"),
            Self::Charge => f.write_str("charge"),
            Self::ReturnHome => f.write_str("return"),
        }
    }
}

/// State of the dirt bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinState {
    Full,
    Present,
    /// The bin has been taken out of the robot.
    Missing,
}

/// Robot position in map coordinates, with heading in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub theta: i32,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.theta)
    }
}

/// Blocking vendor SDK operations for a Wi-Fi robot vacuum.
///
/// The client owns the real connection/socket lifecycle; the adapter only
/// holds a shared handle and never manages reconnects itself.
pub trait VacuumClient: Send + Sync + 'static {
    /// Establish the vendor session. Blocks until connected or failed.
    fn connect(&self) -> Result<(), ClientError>;

    /// Whether a live session (and thus fresh data) currently exists.
    fn is_connected(&self) -> bool;

    fn battery_level(&self) -> Result<u8, ClientError>;
    fn bin_state(&self) -> Result<BinState, ClientError>;
    fn mission_name(&self) -> Result<Option<String>, ClientError>;
    fn mission_state(&self) -> Result<MissionState, ClientError>;
    fn position(&self) -> Result<Option<Position>, ClientError>;

    fn start_clean(&self) -> Result<(), ClientError>;
    fn stop(&self) -> Result<(), ClientError>;
    fn pause(&self) -> Result<(), ClientError>;
    fn resume(&self) -> Result<(), ClientError>;
    /// Send the robot back to its dock.
    fn dock(&self) -> Result<(), ClientError>;
    fn quick_clean(&self) -> Result<(), ClientError>;
    fn spot_clean(&self) -> Result<(), ClientError>;
    fn start_training(&self) -> Result<(), ClientError>;
    fn locate_with_beep(&self) -> Result<(), ClientError>;

    fn set_stop_on_full_bin(&self, enabled: bool) -> Result<(), ClientError>;
    fn set_two_passes(&self, enabled: bool) -> Result<(), ClientError>;

    /// Turn on cleaning-map rendering, optionally over a floorplan image.
    fn enable_mapping(&self, map_path: &str, floorplan_path: Option<&str>)
    -> Result<(), ClientError>;
}

/// Run one blocking vendor call on the blocking worker pool and await it.
///
/// Once dispatched, the vendor call runs to completion or failure; nothing
/// here cancels it mid-flight.
pub(crate) async fn dispatch<C, F, T>(client: &Arc<C>, op: F) -> Result<T, VacuumError>
where
    C: VacuumClient,
    F: FnOnce(&C) -> Result<T, ClientError> + Send + 'static,
    T: Send + 'static,
{
    let client = Arc::clone(client);
    tokio::task::spawn_blocking(move || op(&client))
        .await
        .map_err(VacuumError::Worker)?
        .map_err(VacuumError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_mission_states_in_vendor_form() {
        assert_eq!(MissionState::Run.to_string(), "run");
        assert_eq!(MissionState::Stop.to_string(), "stop");
        assert_eq!(MissionState::Pause.to_string(), "pause");
        assert_eq!(MissionState::Charge.to_string(), "charge");
        assert_eq!(MissionState::ReturnHome.to_string(), "return");
    }

    #[test]
    fn should_count_only_run_as_running() {
        assert!(MissionState::Run.is_running());
        assert!(!MissionState::Stop.is_running());
        assert!(!MissionState::Pause.is_running());
        assert!(!MissionState::Charge.is_running());
        assert!(!MissionState::ReturnHome.is_running());
    }

    #[test]
    fn should_display_position_as_tuple() {
        let pos = Position {
            x: 10,
            y: -20,
            theta: 90,
        };
        assert_eq!(pos.to_string(), "(10, -20, 90)");
    }
}
