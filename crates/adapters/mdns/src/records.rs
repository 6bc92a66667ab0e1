//! Building the DNS-SD records that announce an accessory.

use std::collections::HashMap;

use minihap_domain::accessory::Registration;

use crate::error::MdnsError;

/// Service type controllers browse for.
pub const SERVICE_TYPE: &str = "_hap._tcp.local.";

/// Longest DNS label allowed for an instance name.
const MAX_LABEL_LEN: usize = 63;

/// TXT record for a registration.
///
/// | Key | Meaning | Value |
/// |-----|---------|-------|
/// | `c#` | configuration number | `1` |
/// | `ff` | feature flags | `0` |
/// | `id` | device id | username |
/// | `md` | model name | display name |
/// | `pv` | protocol version | `1.1` |
/// | `s#` | state number | `1` |
/// | `sf` | status flags | `1` (not paired) |
/// | `ci` | category | category code |
///
/// # Errors
///
/// Returns [`MdnsError::IncompleteRegistration`] without credentials or category.
pub fn txt_records(registration: &Registration) -> Result<HashMap<String, String>, MdnsError> {
    let credentials = registration
        .credentials
        .as_ref()
        .ok_or(MdnsError::IncompleteRegistration("credentials"))?;
    let category = registration
        .category
        .ok_or(MdnsError::IncompleteRegistration("category"))?;

    Ok(HashMap::from([
        ("c#".to_string(), "1".to_string()),
        ("ff".to_string(), "0".to_string()),
        ("id".to_string(), credentials.username().to_string()),
        ("md".to_string(), registration.display_name.clone()),
        ("pv".to_string(), "1.1".to_string()),
        ("s#".to_string(), "1".to_string()),
        ("sf".to_string(), "1".to_string()),
        ("ci".to_string(), category.code().to_string()),
    ]))
}

/// Host name derived from the username, e.g. `1A2B3C4D5DFF.local.`.
#[must_use]
pub fn host_name(username: &str) -> String {
    let label: String = username.chars().filter(|c| *c != ':').collect();
    format!("{label}.local.")
}

/// Display name cut to a single DNS label, on a character boundary.
#[must_use]
pub fn instance_name(display_name: &str) -> String {
    if display_name.len() <= MAX_LABEL_LEN {
        return display_name.to_string();
    }
    let mut end = MAX_LABEL_LEN;
    while !display_name.is_char_boundary(end) {
        end -= 1;
    }
    display_name[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use minihap_domain::accessory::ServiceKind;
    use minihap_domain::category::Category;
    use minihap_domain::credentials::Credentials;

    fn registration() -> Registration {
        Registration::builder()
            .display_name("Outlet")
            .category(Category::Outlet)
            .credentials(Credentials::new("1A:2B:3C:4D:5D:FF", "031-45-154").unwrap())
            .service(ServiceKind::Outlet, "Fake Outlet")
            .build()
            .unwrap()
    }

    #[test]
    fn should_announce_username_category_and_model() {
        let txt = txt_records(&registration()).unwrap();
        assert_eq!(txt["id"], "1A:2B:3C:4D:5D:FF");
        assert_eq!(txt["ci"], "7");
        assert_eq!(txt["md"], "Outlet");
        assert_eq!(txt["sf"], "1");
        assert_eq!(txt["pv"], "1.1");
        assert_eq!(txt.len(), 8);
    }

    #[test]
    fn should_never_put_pincode_in_records() {
        let txt = txt_records(&registration()).unwrap();
        assert!(txt.values().all(|v| v != "031-45-154"));
    }

    #[test]
    fn should_fail_without_credentials() {
        let mut reg = registration();
        reg.credentials = None;
        assert!(matches!(
            txt_records(&reg),
            Err(MdnsError::IncompleteRegistration("credentials"))
        ));
    }

    #[test]
    fn should_fail_without_category() {
        let mut reg = registration();
        reg.category = None;
        assert!(matches!(
            txt_records(&reg),
            Err(MdnsError::IncompleteRegistration("category"))
        ));
    }

    #[test]
    fn should_derive_host_name_from_username() {
        assert_eq!(host_name("1A:2B:3C:4D:5D:FF"), "1A2B3C4D5DFF.local.");
    }

    #[test]
    fn should_keep_short_instance_name() {
        assert_eq!(instance_name("Outlet"), "Outlet");
    }

    #[test]
    fn should_truncate_long_instance_name_on_char_boundary() {
        let name = "é".repeat(40);
        let truncated = instance_name(&name);
        assert!(truncated.len() <= 63);
        assert_eq!(truncated.chars().count(), 31);
    }
}
