//! Shop Profile Model

use serde::{Deserialize, Serialize};

/// Shop information entity (singleton per installation)
///
/// Stamped onto every generated bill as a value copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub shop_name: String,
    #[serde(default)]
    pub address: String,
    /// Promotional line printed at the bottom of receipts
    #[serde(default)]
    pub offer: String,
    #[serde(default)]
    pub phones: Vec<String>,
}

/// Update profile payload
///
/// No field is required. `phones` arrives as one comma-delimited string
/// (the way the profile form collects it) and is normalized on save.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub shop_name: Option<String>,
    pub address: Option<String>,
    pub offer: Option<String>,
    pub phones: Option<String>,
}

/// Clearable profile fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    ShopName,
    Address,
    Offer,
    Phones,
}
