//! Pairing credentials — the advertised username and the setup pincode.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Username and pincode a controller needs to pair with the accessory.
///
/// Both values are validated on construction, so holding a `Credentials`
/// means the format is already correct.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCredentials")]
pub struct Credentials {
    username: String,
    pincode: String,
}

impl Credentials {
    /// Validate and wrap a username (`XX:XX:XX:XX:XX:XX`, hex) and a
    /// pincode (`DDD-DD-DDD`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidUsername`] or
    /// [`ConfigurationError::InvalidPincode`] on malformed input.
    pub fn new(
        username: impl Into<String>,
        pincode: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        let username = username.into();
        let pincode = pincode.into();
        if !is_valid_username(&username) {
            return Err(ConfigurationError::InvalidUsername(username));
        }
        if !is_valid_pincode(&pincode) {
            return Err(ConfigurationError::InvalidPincode(pincode));
        }
        Ok(Self { username, pincode })
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn pincode(&self) -> &str {
        &self.pincode
    }
}

// The pincode grants pairing access, keep it out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("pincode", &"***-**-***")
            .finish()
    }
}

#[derive(Deserialize)]
struct RawCredentials {
    username: String,
    pincode: String,
}

impl TryFrom<RawCredentials> for Credentials {
    type Error = ConfigurationError;

    fn try_from(raw: RawCredentials) -> Result<Self, Self::Error> {
        Self::new(raw.username, raw.pincode)
    }
}

fn is_valid_username(value: &str) -> bool {
    let groups: Vec<&str> = value.split(':').collect();
    groups.len() == 6
        && groups
            .iter()
            .all(|g| g.len() == 2 && g.chars().all(|c| c.is_ascii_hexdigit()))
}

fn is_valid_pincode(value: &str) -> bool {
    let groups: Vec<&str> = value.split('-').collect();
    matches!(groups.as_slice(), [a, b, c] if a.len() == 3 && b.len() == 2 && c.len() == 3)
        && groups
            .iter()
            .all(|g| g.chars().all(|c| c.is_ascii_digit()))
}
