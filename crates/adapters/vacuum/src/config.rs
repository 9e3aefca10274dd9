//! Vacuum integration configuration.

use serde::Deserialize;

/// Configuration for one robot vacuum.
///
/// Schema-level validation (required host, credential shape) is the
/// composition root's job; this struct only carries the values.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VacuumConfig {
    /// Display name; also drives the entity id (`vacuum.<slug>`).
    pub name: String,
    /// Host/IP of the robot on the local network.
    pub host: String,
    /// Vendor robot identifier (the "blid").
    pub username: String,
    /// Vendor password for the robot.
    pub password: String,
    /// Optional floorplan image to draw the cleaning map over.
    pub floorplan: Option<String>,
    /// Optional path where the cleaning map is rendered.
    pub map: Option<String>,
    /// Bound on the initial connect attempt, in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for VacuumConfig {
    fn default() -> Self {
        Self {
            name: "Robot Vacuum".to_string(),
            host: String::new(),
            username: String::new(),
            password: String::new(),
            floorplan: None,
            map: None,
            connect_timeout_secs: 9,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = VacuumConfig::default();
        assert_eq!(config.name, "Robot Vacuum");
        assert_eq!(config.connect_timeout_secs, 9);
        assert!(config.map.is_none());
        assert!(config.floorplan.is_none());
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let config: VacuumConfig = toml::from_str(
            "
            host = '192.168.1.17'
            username = 'blid42'
            password = 'hunter2'
            ",
        )
        .unwrap();
        assert_eq!(config.host, "192.168.1.17");
        assert_eq!(config.name, "Robot Vacuum");
        assert_eq!(config.connect_timeout_secs, 9);
    }

    #[test]
    fn should_parse_full_toml() {
        let config: VacuumConfig = toml::from_str(
            "
            name = 'Upstairs Vacuum'
            host = '10.0.0.5'
            username = 'blid'
            password = 'pw'
            floorplan = 'floorplan.png'
            map = 'map.png'
            connect_timeout_secs = 4
            ",
        )
        .unwrap();
        assert_eq!(config.name, "Upstairs Vacuum");
        assert_eq!(config.floorplan.as_deref(), Some("floorplan.png"));
        assert_eq!(config.map.as_deref(), Some("map.png"));
        assert_eq!(config.connect_timeout_secs, 4);
    }
}
