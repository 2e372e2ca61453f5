//! Garment catalog entry.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Body slot a garment occupies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GarmentSlot {
    Top,
    Bottom,
    Footwear,
    Accessory,
}

impl GarmentSlot {
    /// Slots that have a reference input in the Lab sidebar.
    pub const INPUT_SLOTS: [GarmentSlot; 3] =
        [GarmentSlot::Top, GarmentSlot::Bottom, GarmentSlot::Footwear];
}

/// A single reference garment.
///
/// `id` is assigned by the caller and must be unique within a session.
/// The slot travels under the `type` key on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Garment {
    pub id: String,
    #[serde(rename = "type")]
    pub slot: GarmentSlot,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Garment {
    /// Creates a garment with no product link or name.
    pub fn new(id: impl Into<String>, slot: GarmentSlot, image_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            slot,
            image_url: image_url.into(),
            product_url: None,
            name: None,
        }
    }

    pub fn with_product_url(mut self, url: impl Into<String>) -> Self {
        self.product_url = Some(url.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_slot_serializes_under_type_key() {
        let garment = Garment::new("top-1", GarmentSlot::Top, "u1");
        let json = serde_json::to_value(&garment).unwrap();

        assert_eq!(json["type"], "top");
        assert_eq!(json["image_url"], "u1");
        assert!(json.get("product_url").is_none());
    }

    #[test]
    fn test_slot_parses_case_insensitively() {
        assert_eq!(GarmentSlot::from_str("Footwear").unwrap(), GarmentSlot::Footwear);
        assert!(GarmentSlot::from_str("hat").is_err());
        assert_eq!(GarmentSlot::Accessory.to_string(), "accessory");
    }
}
