//! Accessory registration — everything a transport needs to advertise and
//! serve one accessory.
//!
//! A [`Registration`] is assembled once at startup, published once, and torn
//! down once at shutdown. Request handlers are not part of the registration;
//! they are bound at publish time through the `AccessoryHandler` port.

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::credentials::Credentials;
use crate::error::ConfigurationError;
use crate::id::AccessoryId;

/// Kind of service exposed by an accessory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    AccessoryInformation,
    Outlet,
}

impl ServiceKind {
    /// Short-form protocol type identifier.
    #[must_use]
    pub fn type_code(self) -> &'static str {
        match self {
            Self::AccessoryInformation => "3E",
            Self::Outlet => "47",
        }
    }

    /// Characteristics every service of this kind exposes.
    #[must_use]
    pub fn characteristics(self) -> &'static [CharacteristicKind] {
        match self {
            Self::AccessoryInformation => &[
                CharacteristicKind::Identify,
                CharacteristicKind::Manufacturer,
                CharacteristicKind::Model,
                CharacteristicKind::Name,
                CharacteristicKind::SerialNumber,
            ],
            Self::Outlet => &[
                CharacteristicKind::On,
                CharacteristicKind::OutletInUse,
                CharacteristicKind::Name,
            ],
        }
    }
}

/// A single readable and/or writable property of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacteristicKind {
    Identify,
    Manufacturer,
    Model,
    Name,
    SerialNumber,
    On,
    OutletInUse,
}

impl CharacteristicKind {
    /// Short-form protocol type identifier.
    #[must_use]
    pub fn type_code(self) -> &'static str {
        match self {
            Self::Identify => "14",
            Self::Manufacturer => "20",
            Self::Model => "21",
            Self::Name => "23",
            Self::SerialNumber => "30",
            Self::On => "25",
            Self::OutletInUse => "26",
        }
    }

    /// Whether a controller may write this characteristic.
    #[must_use]
    pub fn is_writable(self) -> bool {
        matches!(self, Self::Identify | Self::On)
    }
}

/// A service and the name it is shown under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub kind: ServiceKind,
    pub name: String,
}

impl ServiceDescriptor {
    #[must_use]
    pub fn new(kind: ServiceKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    #[must_use]
    pub fn characteristics(&self) -> &'static [CharacteristicKind] {
        self.kind.characteristics()
    }
}

/// Static values served by the accessory information service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessoryInformation {
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
}

/// Everything a transport needs to advertise an accessory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub id: AccessoryId,
    pub display_name: String,
    pub category: Option<Category>,
    pub credentials: Option<Credentials>,
    pub information: AccessoryInformation,
    pub services: Vec<ServiceDescriptor>,
}

impl Registration {
    /// Create a builder for constructing a [`Registration`].
    #[must_use]
    pub fn builder() -> RegistrationBuilder {
        RegistrationBuilder::default()
    }

    /// Check that the registration can be published.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] when:
    /// - `display_name` is empty ([`ConfigurationError::EmptyDisplayName`])
    /// - `credentials` is missing ([`ConfigurationError::MissingCredentials`])
    /// - `category` is missing ([`ConfigurationError::MissingCategory`])
    /// - `services` is empty ([`ConfigurationError::NoServices`])
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.display_name.trim().is_empty() {
            return Err(ConfigurationError::EmptyDisplayName);
        }
        if self.credentials.is_none() {
            return Err(ConfigurationError::MissingCredentials);
        }
        if self.category.is_none() {
            return Err(ConfigurationError::MissingCategory);
        }
        if self.services.is_empty() {
            return Err(ConfigurationError::NoServices);
        }
        Ok(())
    }

    /// Find the first service of the given kind.
    #[must_use]
    pub fn service(&self, kind: ServiceKind) -> Option<&ServiceDescriptor> {
        self.services.iter().find(|s| s.kind == kind)
    }
}

/// Step-by-step builder for [`Registration`].
///
/// The accessory information service is added automatically.
#[derive(Debug, Default)]
pub struct RegistrationBuilder {
    namespace: Option<String>,
    display_name: Option<String>,
    category: Option<Category>,
    credentials: Option<Credentials>,
    information: AccessoryInformation,
    services: Vec<ServiceDescriptor>,
}

impl RegistrationBuilder {
    /// Namespace the identifier is derived under. Defaults to the display name.
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    #[must_use]
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    #[must_use]
    pub fn manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.information.manufacturer = Some(manufacturer.into());
        self
    }

    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.information.model = Some(model.into());
        self
    }

    #[must_use]
    pub fn serial_number(mut self, serial_number: impl Into<String>) -> Self {
        self.information.serial_number = Some(serial_number.into());
        self
    }

    #[must_use]
    pub fn service(mut self, kind: ServiceKind, name: impl Into<String>) -> Self {
        self.services.push(ServiceDescriptor::new(kind, name));
        self
    }

    /// Consume the builder, validate, and return a [`Registration`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if required fields are missing or empty.
    pub fn build(self) -> Result<Registration, ConfigurationError> {
        let display_name = self.display_name.unwrap_or_default();
        let namespace = self.namespace.unwrap_or_else(|| display_name.clone());
        let mut services = Vec::with_capacity(self.services.len() + 1);
        if !self.services.is_empty() {
            services.push(ServiceDescriptor::new(
                ServiceKind::AccessoryInformation,
                display_name.clone(),
            ));
        }
        services.extend(self.services);

        let registration = Registration {
            id: AccessoryId::generate(&namespace, &display_name),
            display_name,
            category: self.category,
            credentials: self.credentials,
            information: self.information,
            services,
        };
        registration.validate()?;
        Ok(registration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials::new("1A:2B:3C:4D:5D:FF", "031-45-154").unwrap()
    }

    fn valid_registration() -> Registration {
        Registration::builder()
            .namespace("hap-nodejs:accessories")
            .display_name("Outlet")
            .category(Category::Outlet)
            .credentials(credentials())
            .manufacturer("Oltica")
            .model("Rev-1")
            .serial_number("A1S2NASF88EW")
            .service(ServiceKind::Outlet, "Fake Outlet")
            .build()
            .unwrap()
    }

    #[test]
    fn should_build_valid_registration_when_required_fields_provided() {
        let reg = valid_registration();
        assert_eq!(reg.display_name, "Outlet");
        assert_eq!(reg.category, Some(Category::Outlet));
        assert_eq!(reg.information.manufacturer.as_deref(), Some("Oltica"));
        assert_eq!(reg.information.model.as_deref(), Some("Rev-1"));
        assert_eq!(reg.information.serial_number.as_deref(), Some("A1S2NASF88EW"));
    }

    #[test]
    fn should_derive_id_from_namespace_and_name() {
        let reg = valid_registration();
        assert_eq!(
            reg.id,
            AccessoryId::generate("hap-nodejs:accessories", "Outlet")
        );
    }

    #[test]
    fn should_prepend_accessory_information_service() {
        let reg = valid_registration();
        assert_eq!(reg.services.len(), 2);
        assert_eq!(reg.services[0].kind, ServiceKind::AccessoryInformation);
        assert_eq!(reg.services[1].kind, ServiceKind::Outlet);
        assert_eq!(reg.services[1].name, "Fake Outlet");
    }

    #[test]
    fn should_find_outlet_service_with_on_characteristic() {
        let reg = valid_registration();
        let outlet = reg.service(ServiceKind::Outlet).unwrap();
        assert!(outlet.characteristics().contains(&CharacteristicKind::On));
    }

    #[test]
    fn should_return_missing_credentials_when_not_provided() {
        let result = Registration::builder()
            .display_name("Outlet")
            .category(Category::Outlet)
            .service(ServiceKind::Outlet, "Fake Outlet")
            .build();
        assert_eq!(result.unwrap_err(), ConfigurationError::MissingCredentials);
    }

    #[test]
    fn should_return_missing_category_when_not_provided() {
        let result = Registration::builder()
            .display_name("Outlet")
            .credentials(credentials())
            .service(ServiceKind::Outlet, "Fake Outlet")
            .build();
        assert_eq!(result.unwrap_err(), ConfigurationError::MissingCategory);
    }

    #[test]
    fn should_return_empty_display_name_when_blank() {
        let result = Registration::builder()
            .display_name("   ")
            .category(Category::Outlet)
            .credentials(credentials())
            .service(ServiceKind::Outlet, "Fake Outlet")
            .build();
        assert_eq!(result.unwrap_err(), ConfigurationError::EmptyDisplayName);
    }

    #[test]
    fn should_return_no_services_when_none_added() {
        let result = Registration::builder()
            .display_name("Outlet")
            .category(Category::Outlet)
            .credentials(credentials())
            .build();
        assert_eq!(result.unwrap_err(), ConfigurationError::NoServices);
    }

    #[test]
    fn should_reject_registration_whose_credentials_were_removed() {
        let mut reg = valid_registration();
        reg.credentials = None;
        assert_eq!(
            reg.validate(),
            Err(ConfigurationError::MissingCredentials)
        );
    }

    #[test]
    fn should_only_allow_writes_on_identify_and_on() {
        assert!(CharacteristicKind::On.is_writable());
        assert!(CharacteristicKind::Identify.is_writable());
        assert!(!CharacteristicKind::OutletInUse.is_writable());
        assert!(!CharacteristicKind::SerialNumber.is_writable());
    }

    #[test]
    fn should_expose_protocol_type_codes() {
        assert_eq!(ServiceKind::Outlet.type_code(), "47");
        assert_eq!(CharacteristicKind::On.type_code(), "25");
    }
}
