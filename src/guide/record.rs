use crate::GuideError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything printed in a guest guide, as assembled by the property backend.
///
/// Only `name` is required. Absent lists deserialize as empty. Optional strings
/// and list entries that are blank are treated as absent when the guide is
/// laid out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyGuideRecord {
    /// Backend identifier, used to build the guest-view link
    pub id: Option<String>,
    pub name: String,
    pub address: Option<String>,
    pub checkin: Option<String>,
    pub checkout: Option<String>,
    pub wifi: Option<Wifi>,
    pub contacts: Vec<Contact>,
    pub amenities: Vec<String>,
    pub rules: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wifi {
    pub ssid: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub name: String,
    pub phone: String,
}

impl PropertyGuideRecord {
    /// A record with just a name, everything else empty
    pub fn named<S: ToString>(name: S) -> PropertyGuideRecord {
        PropertyGuideRecord {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Result<PropertyGuideRecord, GuideError> {
        let record: PropertyGuideRecord = serde_json::from_str(json)?;
        record.validate()?;
        Ok(record)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<PropertyGuideRecord, GuideError> {
        let json = std::fs::read_to_string(path)?;
        PropertyGuideRecord::from_json(&json)
    }

    /// Checks the fields layout relies on
    pub fn validate(&self) -> Result<(), GuideError> {
        if self.name.trim().is_empty() {
            return Err(GuideError::InvalidInput(
                "property name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn address(&self) -> Option<&str> {
        non_blank(&self.address)
    }

    pub fn checkin(&self) -> Option<&str> {
        non_blank(&self.checkin)
    }

    pub fn checkout(&self) -> Option<&str> {
        non_blank(&self.checkout)
    }

    /// Contacts with at least a name or a phone number
    pub fn contacts(&self) -> impl Iterator<Item = &Contact> {
        self.contacts
            .iter()
            .filter(|c| !is_blank(&c.name) || !is_blank(&c.phone))
    }

    pub fn amenities(&self) -> impl Iterator<Item = &str> {
        non_blank_entries(&self.amenities)
    }

    pub fn rules(&self) -> impl Iterator<Item = &str> {
        non_blank_entries(&self.rules)
    }
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !is_blank(v))
}

fn non_blank_entries(values: &[String]) -> impl Iterator<Item = &str> {
    values.iter().map(String::as_str).filter(|v| !is_blank(v))
}
