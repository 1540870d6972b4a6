//! Singleton site settings (service area and company contact details).

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use models::site_settings::{self, SINGLETON_ID};

use crate::errors::ServiceError;
use crate::validation::{blank_to_none, Validator};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsInput {
    pub service_area_lat: f64,
    pub service_area_lng: f64,
    pub service_area_miles: i32,
    pub company_name: String,
    pub company_phone: String,
    pub company_email: String,
    #[serde(default)]
    pub company_address: Option<String>,
}

impl SettingsInput {
    pub fn validate(&self) -> Result<(), ServiceError> {
        let mut v = Validator::new();
        v.check(
            "service_area_lat",
            (-90.0..=90.0).contains(&self.service_area_lat),
            "Latitude must be between -90 and 90",
        );
        v.check(
            "service_area_lng",
            (-180.0..=180.0).contains(&self.service_area_lng),
            "Longitude must be between -180 and 180",
        );
        v.check("service_area_miles", self.service_area_miles >= 1, "Service area must be at least 1 mile");
        v.check("service_area_miles", self.service_area_miles <= 500, "Service area must be less than 500 miles");
        v.length(
            "company_name",
            self.company_name.trim(),
            1,
            100,
            "Company name is required",
            "Company name must be less than 100 characters",
        );
        v.length(
            "company_phone",
            self.company_phone.trim(),
            1,
            20,
            "Phone number is required",
            "Phone number must be less than 20 characters",
        );
        v.email("company_email", self.company_email.trim());
        if let Some(addr) = &self.company_address {
            v.max_length("company_address", addr.trim(), 500, "Address must be less than 500 characters");
        }
        v.finish()
    }
}

/// Current settings, `None` until an admin or the seeder has saved them.
pub async fn get_settings(db: &DatabaseConnection) -> Result<Option<site_settings::Model>, ServiceError> {
    Ok(site_settings::Entity::find_by_id(SINGLETON_ID.to_string()).one(db).await?)
}

/// Validate and insert or replace the singleton row.
#[instrument(skip(db, input))]
pub async fn upsert_settings(db: &DatabaseConnection, input: SettingsInput) -> Result<site_settings::Model, ServiceError> {
    input.validate()?;
    let existing = get_settings(db).await?;
    let created = existing.is_none();

    let mut am: site_settings::ActiveModel = match existing {
        Some(m) => m.into(),
        None => site_settings::ActiveModel { id: Set(SINGLETON_ID.to_string()), ..Default::default() },
    };
    am.service_area_lat = Set(input.service_area_lat);
    am.service_area_lng = Set(input.service_area_lng);
    am.service_area_miles = Set(input.service_area_miles);
    am.company_name = Set(input.company_name.trim().to_string());
    am.company_phone = Set(input.company_phone.trim().to_string());
    am.company_email = Set(input.company_email.trim().to_string());
    am.company_address = Set(blank_to_none(input.company_address));
    am.updated_at = Set(Utc::now().into());

    let saved = if created { am.insert(db).await? } else { am.update(db).await? };
    info!(event = "site_settings_saved", created, company = %saved.company_name);
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    pub(crate) fn sample() -> SettingsInput {
        SettingsInput {
            service_area_lat: 40.7128,
            service_area_lng: -74.006,
            service_area_miles: 50,
            company_name: "Hometown Services".into(),
            company_phone: "(555) 123-4567".into(),
            company_email: "info@hometownservices.net".into(),
            company_address: Some("123 Main Street".into()),
        }
    }

    #[tokio::test]
    async fn missing_then_upserted() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        assert!(get_settings(&db).await?.is_none());

        let saved = upsert_settings(&db, sample()).await?;
        assert_eq!(saved.id, SINGLETON_ID);

        let mut next = sample();
        next.service_area_miles = 75;
        next.company_address = Some(String::new());
        let saved = upsert_settings(&db, next).await?;
        assert_eq!(saved.service_area_miles, 75);
        assert_eq!(saved.company_address, None);
        assert_eq!(site_settings::Entity::find().all(&db).await?.len(), 1);
        Ok(())
    }

    #[test]
    fn bounds_are_checked() {
        let mut bad = sample();
        bad.service_area_lat = 91.0;
        bad.service_area_lng = -181.0;
        bad.service_area_miles = 0;
        bad.company_name = String::new();
        match bad.validate().unwrap_err() {
            ServiceError::InvalidFields(map) => {
                assert_eq!(map.len(), 4);
                assert_eq!(map["service_area_miles"], vec!["Service area must be at least 1 mile".to_string()]);
            }
            e => panic!("unexpected {e:?}"),
        }
        let mut edge = sample();
        edge.service_area_lat = -90.0;
        edge.service_area_miles = 500;
        assert!(edge.validate().is_ok());
    }
}
