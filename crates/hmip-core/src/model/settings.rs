use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};

/// Alarm protection level of the home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProtectionMode {
    /// Perimeter (external zone) armed, occupants inside.
    Presence,
    /// Both zones armed.
    Absence,
    /// Both zones disarmed.
    Disable,
}

impl ProtectionMode {
    /// The `(internal, external)` zone activation flags for this mode.
    pub fn zones_activation(self) -> (bool, bool) {
        match self {
            Self::Presence => (false, true),
            Self::Absence => (true, true),
            Self::Disable => (false, false),
        }
    }
}

/// What a climate sensor display shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisplayMode {
    Actual,
    Setpoint,
    ActualHumidity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protection_modes_map_to_zone_flags() {
        assert_eq!(ProtectionMode::Presence.zones_activation(), (false, true));
        assert_eq!(ProtectionMode::Absence.zones_activation(), (true, true));
        assert_eq!(ProtectionMode::Disable.zones_activation(), (false, false));
    }

    #[test]
    fn display_modes_use_wire_names() {
        assert_eq!(DisplayMode::Actual.as_ref(), "ACTUAL");
        assert_eq!(DisplayMode::Setpoint.as_ref(), "SETPOINT");
        assert_eq!(DisplayMode::ActualHumidity.as_ref(), "ACTUAL_HUMIDITY");
    }

    #[test]
    fn protection_mode_parses_lowercase() {
        assert_eq!(
            "absence".parse::<ProtectionMode>().ok(),
            Some(ProtectionMode::Absence)
        );
        assert_eq!(ProtectionMode::Presence.to_string(), "presence");
    }
}
