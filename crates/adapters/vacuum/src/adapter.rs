//! Cached-state device adapter for one robot vacuum.
//!
//! Two state-update paths exist and the second always wins on conflict:
//! every command applies an optimistic on/off update, and every
//! [`update`](RobotVacuum::update) poll overwrites the cache with
//! authoritative vendor readings.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use nook_domain::entity::{Entity, EntityState, slugify};
use nook_domain::error::NookError;
use nook_domain::id::{DeviceId, EntityId};

use crate::client::{BinState, MissionState, Position, VacuumClient, dispatch};
use crate::error::VacuumError;

/// Cached device state, only ever mutated between awaits.
#[derive(Debug, Clone, Default)]
struct Cache {
    available: bool,
    battery_level: Option<u8>,
    is_on: bool,
    mission_name: Option<String>,
    mission_state: Option<MissionState>,
    bin_state: Option<BinState>,
    position: Option<Position>,
}

/// One robot vacuum behind a shared vendor client handle.
pub struct RobotVacuum<C> {
    id: EntityId,
    device_id: DeviceId,
    name: String,
    entity_id: String,
    client: Arc<C>,
    cache: Mutex<Cache>,
}

impl<C: VacuumClient> RobotVacuum<C> {
    /// Create an adapter for a connected client.
    ///
    /// The cache starts empty and unavailable until the first poll.
    pub fn new(name: impl Into<String>, client: Arc<C>) -> Self {
        let name = name.into();
        let entity_id = format!("vacuum.{}", slugify(&name));
        Self {
            id: EntityId::new(),
            device_id: DeviceId::new(),
            name,
            entity_id,
            client,
            cache: Mutex::new(Cache::default()),
        }
    }

    /// Display name of the robot.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Host-facing entity id (`vacuum.<slug>`).
    #[must_use]
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    /// Stable internal device identity.
    #[must_use]
    pub fn device_id(&self) -> DeviceId {
        self.device_id
    }

    /// Whether the last poll saw a live connection.
    #[must_use]
    pub fn available(&self) -> bool {
        self.lock_cache().available
    }

    /// Battery level from the last poll, in percent.
    #[must_use]
    pub fn battery_level(&self) -> Option<u8> {
        self.lock_cache().battery_level
    }

    /// Whether the robot is currently considered cleaning.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.lock_cache().is_on
    }

    /// Mission phase from the last poll.
    #[must_use]
    pub fn mission_state(&self) -> Option<MissionState> {
        self.lock_cache().mission_state
    }

    /// Begin a standard cleaning mission.
    ///
    /// # Errors
    ///
    /// Propagates the vendor call failure unchanged.
    pub async fn start(&self) -> Result<(), VacuumError> {
        dispatch(&self.client, C::start_clean).await
    }

    /// Begin a standard cleaning mission and optimistically mark on.
    ///
    /// # Errors
    ///
    /// Propagates the vendor call failure unchanged.
    pub async fn turn_on(&self) -> Result<(), VacuumError> {
        dispatch(&self.client, C::start_clean).await?;
        self.lock_cache().is_on = true;
        Ok(())
    }

    /// Stop cleaning, then send the robot home.
    ///
    /// Sequential, not atomic: when stop succeeds and dock fails the robot
    /// is left stopped in place.
    ///
    /// # Errors
    ///
    /// Propagates the first vendor call failure unchanged.
    pub async fn turn_off(&self) -> Result<(), VacuumError> {
        self.stop().await?;
        self.return_to_base().await
    }

    /// Stop the current mission.
    ///
    /// # Errors
    ///
    /// Propagates the vendor call failure unchanged.
    pub async fn stop(&self) -> Result<(), VacuumError> {
        dispatch(&self.client, C::stop).await?;
        self.lock_cache().is_on = false;
        Ok(())
    }

    /// Pause the current mission.
    ///
    /// # Errors
    ///
    /// Propagates the vendor call failure unchanged.
    pub async fn pause(&self) -> Result<(), VacuumError> {
        dispatch(&self.client, C::pause).await?;
        self.lock_cache().is_on = false;
        Ok(())
    }

    /// Resume a paused or stopped mission.
    ///
    /// # Errors
    ///
    /// Propagates the vendor call failure unchanged.
    pub async fn resume(&self) -> Result<(), VacuumError> {
        dispatch(&self.client, C::resume).await?;
        self.lock_cache().is_on = true;
        Ok(())
    }

    /// Send the robot back to its dock.
    ///
    /// # Errors
    ///
    /// Propagates the vendor call failure unchanged.
    pub async fn return_to_base(&self) -> Result<(), VacuumError> {
        dispatch(&self.client, C::dock).await?;
        self.lock_cache().is_on = false;
        Ok(())
    }

    /// Begin a quick cleaning mission.
    ///
    /// # Errors
    ///
    /// Propagates the vendor call failure unchanged.
    pub async fn quick_clean(&self) -> Result<(), VacuumError> {
        dispatch(&self.client, C::quick_clean).await?;
        self.lock_cache().is_on = false;
        Ok(())
    }

    /// Begin a spot cleaning mission.
    ///
    /// # Errors
    ///
    /// Propagates the vendor call failure unchanged.
    pub async fn spot_clean(&self) -> Result<(), VacuumError> {
        dispatch(&self.client, C::spot_clean).await?;
        self.lock_cache().is_on = false;
        Ok(())
    }

    /// Begin a map-training run (explores without cleaning).
    ///
    /// # Errors
    ///
    /// Propagates the vendor call failure unchanged.
    pub async fn start_training(&self) -> Result<(), VacuumError> {
        dispatch(&self.client, C::start_training).await?;
        self.lock_cache().is_on = false;
        Ok(())
    }

    /// Make the robot beep so it can be found. Leaves the on/off flag as
    /// is — locating is not a mission change.
    ///
    /// # Errors
    ///
    /// Propagates the vendor call failure unchanged.
    pub async fn locate(&self) -> Result<(), VacuumError> {
        dispatch(&self.client, C::locate_with_beep).await
    }

    /// The physical start/pause button: running ⇒ pause; last known
    /// mission stopped or paused ⇒ resume; otherwise ⇒ start.
    ///
    /// The tie-break infers intent from cached state because the vendor
    /// SDK has no dedicated toggle call.
    ///
    /// # Errors
    ///
    /// Propagates the vendor call failure unchanged.
    pub async fn start_pause(&self) -> Result<(), VacuumError> {
        let (is_on, mission_state) = {
            let cache = self.lock_cache();
            (cache.is_on, cache.mission_state)
        };
        if is_on {
            self.pause().await
        } else if matches!(
            mission_state,
            Some(MissionState::Stop | MissionState::Pause)
        ) {
            self.resume().await
        } else {
            self.turn_on().await
        }
    }

    /// Enable or disable stopping when the bin is full.
    ///
    /// # Errors
    ///
    /// Propagates the vendor call failure unchanged.
    pub async fn set_stop_on_full_bin(&self, enabled: bool) -> Result<(), VacuumError> {
        dispatch(&self.client, move |c: &C| c.set_stop_on_full_bin(enabled)).await
    }

    /// Enable or disable cleaning every area twice.
    ///
    /// # Errors
    ///
    /// Propagates the vendor call failure unchanged.
    pub async fn set_two_passes(&self, enabled: bool) -> Result<(), VacuumError> {
        dispatch(&self.client, move |c: &C| c.set_two_passes(enabled)).await
    }

    /// Authoritative poll.
    ///
    /// With no live connection the cache is left untouched — stale data is
    /// better than fresh nulls. Otherwise every cached field is refreshed
    /// and the on/off flag recomputed from the mission state.
    ///
    /// # Errors
    ///
    /// Propagates the first vendor getter failure unchanged; the cache is
    /// only written after all getters succeeded.
    pub async fn update(&self) -> Result<(), VacuumError> {
        if !dispatch(&self.client, |c: &C| Ok(c.is_connected())).await? {
            tracing::debug!(vacuum = %self.name, "no data yet, skipping update");
            return Ok(());
        }
        let battery_level = dispatch(&self.client, C::battery_level).await?;
        let mission_name = dispatch(&self.client, C::mission_name).await?;
        let mission_state = dispatch(&self.client, C::mission_state).await?;
        let bin_state = dispatch(&self.client, C::bin_state).await?;
        let position = dispatch(&self.client, C::position).await?;

        let mut cache = self.lock_cache();
        cache.available = true;
        cache.battery_level = Some(battery_level);
        cache.is_on = mission_state.is_running();
        cache.mission_name = mission_name;
        cache.mission_state = Some(mission_state);
        cache.bin_state = Some(bin_state);
        cache.position = position;
        Ok(())
    }

    /// Build an entity snapshot from the cache.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the configured name produced an
    /// invalid entity id.
    pub fn snapshot(&self) -> Result<Entity, NookError> {
        let cache = self.lock_cache().clone();
        let state = if !cache.available {
            EntityState::Unavailable
        } else if cache.is_on {
            EntityState::On
        } else {
            EntityState::Off
        };

        let mut builder = Entity::builder()
            .id(self.id)
            .device_id(self.device_id)
            .entity_id(self.entity_id.clone())
            .friendly_name(self.name.clone())
            .state(state);
        if let Some(level) = cache.battery_level {
            builder = builder.attribute("battery_level", i64::from(level));
        }
        if let Some(bin) = cache.bin_state {
            let (bin_full, bin_present) = match bin {
                BinState::Full => (true, true),
                BinState::Present => (false, true),
                BinState::Missing => (false, false),
            };
            builder = builder
                .attribute("bin_full", bin_full)
                .attribute("bin_present", bin_present);
        }
        if let Some(mission_name) = &cache.mission_name {
            builder = builder.attribute("mission_name", mission_name.clone());
        }
        if let Some(mission_state) = cache.mission_state {
            builder = builder.attribute("mission_state", mission_state.to_string());
        }
        if let Some(position) = cache.position {
            builder = builder.attribute("position", position.to_string());
        }
        builder.build().map_err(NookError::from)
    }

    fn lock_cache(&self) -> MutexGuard<'_, Cache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use nook_domain::entity::AttributeValue;

    use crate::test_support::MockVacuum;

    fn adapter(client: &Arc<MockVacuum>) -> RobotVacuum<MockVacuum> {
        RobotVacuum::new("Robot Vacuum", Arc::clone(client))
    }

    #[tokio::test]
    async fn should_report_on_after_poll_when_mission_is_run() {
        let client = Arc::new(MockVacuum::connected());
        client.set_mission_state(MissionState::Run);
        let vacuum = adapter(&client);

        vacuum.update().await.unwrap();

        assert!(vacuum.is_on());
        assert!(vacuum.available());
    }

    #[tokio::test]
    async fn should_report_off_after_poll_for_every_other_mission() {
        for mission in [
            MissionState::Stop,
            MissionState::Pause,
            MissionState::Charge,
            MissionState::ReturnHome,
        ] {
            let client = Arc::new(MockVacuum::connected());
            client.set_mission_state(mission);
            let vacuum = adapter(&client);

            vacuum.update().await.unwrap();

            assert!(!vacuum.is_on(), "mission {mission} must poll as off");
        }
    }

    #[tokio::test]
    async fn should_override_optimistic_flag_on_poll() {
        let client = Arc::new(MockVacuum::connected());
        client.set_mission_state(MissionState::Charge);
        let vacuum = adapter(&client);

        vacuum.turn_on().await.unwrap();
        assert!(vacuum.is_on());

        // The authoritative poll wins over the optimistic command update.
        vacuum.update().await.unwrap();
        assert!(!vacuum.is_on());
    }

    #[tokio::test]
    async fn should_leave_cache_untouched_when_not_connected() {
        let client = Arc::new(MockVacuum::connected());
        client.set_mission_state(MissionState::Run);
        client.set_battery_level(63);
        let vacuum = adapter(&client);
        vacuum.update().await.unwrap();

        client.set_connected(false);
        client.set_battery_level(12);
        client.set_mission_state(MissionState::Stop);
        vacuum.update().await.unwrap();

        assert!(vacuum.available());
        assert_eq!(vacuum.battery_level(), Some(63));
        assert!(vacuum.is_on());
    }

    #[tokio::test]
    async fn should_not_mark_available_when_first_poll_has_no_connection() {
        let client = Arc::new(MockVacuum::default());
        let vacuum = adapter(&client);

        vacuum.update().await.unwrap();

        assert!(!vacuum.available());
        assert_eq!(vacuum.battery_level(), None);
        assert_eq!(vacuum.snapshot().unwrap().state, EntityState::Unavailable);
    }

    #[tokio::test]
    async fn should_invoke_stop_before_dock_on_turn_off() {
        let client = Arc::new(MockVacuum::connected());
        let vacuum = adapter(&client);

        vacuum.turn_off().await.unwrap();

        assert_eq!(client.calls(), ["stop", "dock"]);
        assert!(!vacuum.is_on());
    }

    #[tokio::test]
    async fn should_pause_on_start_pause_when_running() {
        let client = Arc::new(MockVacuum::connected());
        client.set_mission_state(MissionState::Run);
        let vacuum = adapter(&client);
        vacuum.update().await.unwrap();
        client.clear_calls();

        vacuum.start_pause().await.unwrap();

        assert_eq!(client.calls(), ["pause"]);
        assert!(!vacuum.is_on());
    }

    #[tokio::test]
    async fn should_resume_on_start_pause_when_stopped_or_paused() {
        for mission in [MissionState::Stop, MissionState::Pause] {
            let client = Arc::new(MockVacuum::connected());
            client.set_mission_state(mission);
            let vacuum = adapter(&client);
            vacuum.update().await.unwrap();
            client.clear_calls();

            vacuum.start_pause().await.unwrap();

            assert_eq!(client.calls(), ["resume"]);
            assert!(vacuum.is_on());
        }
    }

    #[tokio::test]
    async fn should_start_on_start_pause_when_mission_is_unknown() {
        let client = Arc::new(MockVacuum::connected());
        let vacuum = adapter(&client);

        // No poll has happened: no cached mission state, not on.
        vacuum.start_pause().await.unwrap();

        assert_eq!(client.calls(), ["start_clean"]);
        assert!(vacuum.is_on());
    }

    #[tokio::test]
    async fn should_start_on_start_pause_when_docked() {
        let client = Arc::new(MockVacuum::connected());
        client.set_mission_state(MissionState::Charge);
        let vacuum = adapter(&client);
        vacuum.update().await.unwrap();
        client.clear_calls();

        vacuum.start_pause().await.unwrap();

        assert_eq!(client.calls(), ["start_clean"]);
    }

    #[tokio::test]
    async fn should_apply_optimistic_flag_per_command() {
        let client = Arc::new(MockVacuum::connected());
        let vacuum = adapter(&client);

        vacuum.turn_on().await.unwrap();
        assert!(vacuum.is_on());
        vacuum.pause().await.unwrap();
        assert!(!vacuum.is_on());
        vacuum.resume().await.unwrap();
        assert!(vacuum.is_on());
        vacuum.stop().await.unwrap();
        assert!(!vacuum.is_on());
        vacuum.resume().await.unwrap();
        vacuum.return_to_base().await.unwrap();
        assert!(!vacuum.is_on());
    }

    #[tokio::test]
    async fn should_not_touch_flag_on_locate_or_plain_start() {
        let client = Arc::new(MockVacuum::connected());
        let vacuum = adapter(&client);

        vacuum.turn_on().await.unwrap();
        vacuum.locate().await.unwrap();
        assert!(vacuum.is_on());

        vacuum.start().await.unwrap();
        assert!(vacuum.is_on());
        assert_eq!(
            client.calls(),
            ["start_clean", "locate_with_beep", "start_clean"]
        );
    }

    #[tokio::test]
    async fn should_clear_flag_for_special_clean_modes() {
        let client = Arc::new(MockVacuum::connected());
        let vacuum = adapter(&client);

        for (command, expected_call) in [
            ("quick", "quick_clean"),
            ("spot", "spot_clean"),
            ("train", "start_training"),
        ] {
            vacuum.turn_on().await.unwrap();
            client.clear_calls();
            match command {
                "quick" => vacuum.quick_clean().await.unwrap(),
                "spot" => vacuum.spot_clean().await.unwrap(),
                _ => vacuum.start_training().await.unwrap(),
            }
            assert_eq!(client.calls(), [expected_call]);
            assert!(!vacuum.is_on());
        }
    }

    #[tokio::test]
    async fn should_forward_toggle_settings_with_flag() {
        let client = Arc::new(MockVacuum::connected());
        let vacuum = adapter(&client);

        vacuum.set_stop_on_full_bin(true).await.unwrap();
        vacuum.set_two_passes(false).await.unwrap();

        assert_eq!(
            client.calls(),
            ["set_stop_on_full_bin:true", "set_two_passes:false"]
        );
    }

    #[tokio::test]
    async fn should_expose_bin_and_position_attributes_in_snapshot() {
        let client = Arc::new(MockVacuum::connected());
        client.set_mission_state(MissionState::Run);
        client.set_mission_name(Some("clean".to_string()));
        client.set_battery_level(87);
        client.set_bin_state(BinState::Full);
        client.set_position(Some(Position {
            x: 10,
            y: 20,
            theta: 90,
        }));
        let vacuum = adapter(&client);
        vacuum.update().await.unwrap();

        let entity = vacuum.snapshot().unwrap();
        assert_eq!(entity.entity_id, "vacuum.robot_vacuum");
        assert_eq!(entity.state, EntityState::On);
        assert_eq!(
            entity.get_attribute("battery_level"),
            Some(&AttributeValue::Int(87))
        );
        assert_eq!(
            entity.get_attribute("bin_full"),
            Some(&AttributeValue::Bool(true))
        );
        assert_eq!(
            entity.get_attribute("bin_present"),
            Some(&AttributeValue::Bool(true))
        );
        assert_eq!(
            entity.get_attribute("mission_name"),
            Some(&AttributeValue::String("clean".to_string()))
        );
        assert_eq!(
            entity.get_attribute("mission_state"),
            Some(&AttributeValue::String("run".to_string()))
        );
        assert_eq!(
            entity.get_attribute("position"),
            Some(&AttributeValue::String("(10, 20, 90)".to_string()))
        );
    }

    #[tokio::test]
    async fn should_flag_missing_bin_as_not_present() {
        let client = Arc::new(MockVacuum::connected());
        client.set_bin_state(BinState::Missing);
        let vacuum = adapter(&client);
        vacuum.update().await.unwrap();

        let entity = vacuum.snapshot().unwrap();
        assert_eq!(
            entity.get_attribute("bin_full"),
            Some(&AttributeValue::Bool(false))
        );
        assert_eq!(
            entity.get_attribute("bin_present"),
            Some(&AttributeValue::Bool(false))
        );
    }

    #[tokio::test]
    async fn should_propagate_vendor_failure_and_keep_cache() {
        let client = Arc::new(MockVacuum::connected());
        client.set_battery_level(63);
        let vacuum = adapter(&client);
        vacuum.update().await.unwrap();

        client.fail_next_battery_read();
        client.set_battery_level(5);
        let result = vacuum.update().await;

        assert!(matches!(result, Err(VacuumError::Client(_))));
        assert_eq!(vacuum.battery_level(), Some(63));
    }
}
