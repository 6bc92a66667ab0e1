//! Accessory category — tells controllers which icon and UI to show.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Category advertised alongside an accessory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Other,
    Bridge,
    Fan,
    GarageDoorOpener,
    Lightbulb,
    DoorLock,
    Outlet,
    Switch,
    Thermostat,
    Sensor,
}

impl Category {
    /// Numeric code used in the `ci` discovery record.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Other => 1,
            Self::Bridge => 2,
            Self::Fan => 3,
            Self::GarageDoorOpener => 4,
            Self::Lightbulb => 5,
            Self::DoorLock => 6,
            Self::Outlet => 7,
            Self::Switch => 8,
            Self::Thermostat => 9,
            Self::Sensor => 10,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Other => "other",
            Self::Bridge => "bridge",
            Self::Fan => "fan",
            Self::GarageDoorOpener => "garage_door_opener",
            Self::Lightbulb => "lightbulb",
            Self::DoorLock => "door_lock",
            Self::Outlet => "outlet",
            Self::Switch => "switch",
            Self::Thermostat => "thermostat",
            Self::Sensor => "sensor",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "other" => Ok(Self::Other),
            "bridge" => Ok(Self::Bridge),
            "fan" => Ok(Self::Fan),
            "garage_door_opener" => Ok(Self::GarageDoorOpener),
            "lightbulb" => Ok(Self::Lightbulb),
            "door_lock" => Ok(Self::DoorLock),
            "outlet" => Ok(Self::Outlet),
            "switch" => Ok(Self::Switch),
            "thermostat" => Ok(Self::Thermostat),
            "sensor" => Ok(Self::Sensor),
            other => Err(ConfigurationError::UnknownCategory(other.to_string())),
        }
    }
}
