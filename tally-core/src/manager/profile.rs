//! Shop profile operations: partial save, phone normalization, field clear

use shared::AppResult;
use shared::models::{Profile, ProfileField, ProfileUpdate};

use super::BillingManager;
use crate::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_OFFER_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};

/// Split a raw comma-delimited phone string into trimmed, non-empty entries
fn normalize_phones(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl BillingManager {
    /// Save profile fields
    ///
    /// Nothing is required; provided strings are trimmed, the phone list
    /// is split from its delimited form with empty entries dropped.
    pub fn save_profile(&mut self, payload: ProfileUpdate) -> AppResult<Profile> {
        validate_optional_text(&payload.shop_name, "shop name", MAX_NAME_LEN)?;
        validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
        validate_optional_text(&payload.offer, "offer", MAX_OFFER_LEN)?;

        let mut staged = self.state.profile.clone();
        if let Some(shop_name) = payload.shop_name {
            staged.shop_name = shop_name.trim().to_string();
        }
        if let Some(address) = payload.address {
            staged.address = address.trim().to_string();
        }
        if let Some(offer) = payload.offer {
            staged.offer = offer.trim().to_string();
        }
        if let Some(phones) = payload.phones {
            let phones = normalize_phones(&phones);
            for phone in &phones {
                validate_required_text(phone, "phone", MAX_SHORT_TEXT_LEN)?;
            }
            staged.phones = phones;
        }

        self.storage.save_profile(&staged)?;
        self.state.profile = staged;
        Ok(self.state.profile.clone())
    }

    /// Reset one profile field to its default
    pub fn clear_profile_field(&mut self, field: ProfileField) -> AppResult<()> {
        let mut staged = self.state.profile.clone();
        match field {
            ProfileField::ShopName => staged.shop_name.clear(),
            ProfileField::Address => staged.address.clear(),
            ProfileField::Offer => staged.offer.clear(),
            ProfileField::Phones => staged.phones.clear(),
        }

        self.storage.save_profile(&staged)?;
        self.state.profile = staged;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::tests::open_manager;

    #[test]
    fn test_save_profile_trims_and_normalizes_phones() {
        let (_dir, mut mgr) = open_manager();
        let profile = mgr
            .save_profile(ProfileUpdate {
                shop_name: Some("  Corner Shop  ".to_string()),
                address: Some("12 Main St".to_string()),
                offer: Some("Buy 2 get 1".to_string()),
                phones: Some(" 0300-1234567 ,, 042-111222 , ".to_string()),
            })
            .expect("save");

        assert_eq!(profile.shop_name, "Corner Shop");
        assert_eq!(profile.phones, vec!["0300-1234567", "042-111222"]);
    }

    #[test]
    fn test_save_profile_is_partial() {
        let (_dir, mut mgr) = open_manager();
        mgr.save_profile(ProfileUpdate {
            shop_name: Some("Corner Shop".to_string()),
            offer: Some("Free delivery".to_string()),
            ..Default::default()
        })
        .expect("save");

        mgr.save_profile(ProfileUpdate {
            address: Some("12 Main St".to_string()),
            ..Default::default()
        })
        .expect("save");

        let profile = mgr.profile();
        assert_eq!(profile.shop_name, "Corner Shop");
        assert_eq!(profile.offer, "Free delivery");
        assert_eq!(profile.address, "12 Main St");
    }

    #[test]
    fn test_save_profile_accepts_all_empty() {
        let (_dir, mut mgr) = open_manager();
        let profile = mgr.save_profile(ProfileUpdate::default()).expect("save");
        assert_eq!(profile, Profile::default());
    }

    #[test]
    fn test_clear_profile_field() {
        let (_dir, mut mgr) = open_manager();
        mgr.save_profile(ProfileUpdate {
            shop_name: Some("Corner Shop".to_string()),
            phones: Some("0300-1234567".to_string()),
            ..Default::default()
        })
        .expect("save");

        mgr.clear_profile_field(ProfileField::Phones).expect("clear");
        assert!(mgr.profile().phones.is_empty());
        assert_eq!(mgr.profile().shop_name, "Corner Shop");

        mgr.clear_profile_field(ProfileField::ShopName).expect("clear");
        assert!(mgr.profile().shop_name.is_empty());
    }
}
