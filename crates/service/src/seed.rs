//! Default catalog, settings and admin account for a fresh install.
//!
//! Every step upserts by natural key (slug, singleton id, username) so the
//! seeder can run on every deploy.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::{info, instrument};

use models::{category, service};

use crate::auth::repo::seaorm::SeaOrmAuthRepository;
use crate::auth::{AuthConfig, AuthService};
use crate::errors::ServiceError;
use crate::settings::{self, SettingsInput};
use crate::slug::generate_slug;

struct SeedCategory {
    name: &'static str,
    slug: &'static str,
    description: &'static str,
    services: &'static [SeedService],
}

struct SeedService {
    name: &'static str,
    description: &'static str,
    subcontracted: bool,
}

const fn svc(name: &'static str, description: &'static str, subcontracted: bool) -> SeedService {
    SeedService { name, description, subcontracted }
}

static CATALOG: &[SeedCategory] = &[
    SeedCategory {
        name: "Construction & Contracting",
        slug: "construction-contracting",
        description: "General construction services, project management, and contracting work",
        services: &[
            svc("Project Management", "Professional project oversight and coordination for residential and commercial construction projects. We handle scheduling, budgeting, and contractor coordination to ensure your project runs smoothly from start to finish.", false),
            svc("Construction Contracting", "Full-service general contracting for new construction, additions, and major renovations. Our experienced team manages all aspects of your build with attention to quality and timeline.", false),
            svc("Demolition", "Safe and efficient demolition services for interior and exterior structures. We handle permits, debris removal, and site preparation for your next project.", false),
            svc("Framing", "Professional structural framing for new construction and additions. Our skilled framers ensure your project has a solid foundation built to code.", true),
        ],
    },
    SeedCategory {
        name: "Exterior & Roofing",
        slug: "exterior-roofing",
        description: "Siding, roofing, decks, and driveway installation services",
        services: &[
            svc("Siding", "Expert siding installation and repair for vinyl, fiber cement, wood, and other materials. Protect and beautify your home with quality exterior finishes.", true),
            svc("Roofing", "Complete roofing services including new installation, replacement, and repairs. We work with asphalt shingles, metal roofing, and specialty materials.", true),
            svc("Deck Construction", "Custom deck design and construction using composite, pressure-treated lumber, or exotic hardwoods. Extend your living space with a beautiful outdoor deck.", false),
            svc("Driveway Installation", "Professional driveway installation including concrete, asphalt, and paver options. We handle grading, drainage, and finishing for lasting results.", false),
        ],
    },
    SeedCategory {
        name: "Interior Finishing",
        slug: "interior-finishing",
        description: "Flooring, cabinets, trim work, and basement finishing services",
        services: &[
            svc("Flooring", "Expert flooring installation for hardwood, laminate, tile, vinyl, and carpet. Transform your space with beautiful, durable flooring solutions.", false),
            svc("Cabinet Installation", "Professional kitchen and bathroom cabinet installation. We work with stock, semi-custom, and custom cabinetry to maximize your storage and style.", false),
            svc("Trims & Doors", "Interior trim work including baseboards, crown molding, door installation, and window casings. Add the finishing touches that make your home complete.", false),
            svc("Basement Finishing", "Complete basement finishing services including framing, drywall, flooring, and electrical. Convert unused space into functional living areas.", false),
        ],
    },
    SeedCategory {
        name: "Mechanical Systems",
        slug: "mechanical-systems",
        description: "Plumbing, electrical, and HVAC services",
        services: &[
            svc("Plumbing", "Full-service plumbing for new construction, remodels, and repairs. Our licensed plumbers handle everything from fixtures to complete system installations.", true),
            svc("Electrical", "Licensed electrical services for residential and commercial projects. From panel upgrades to complete wiring, we ensure safe, code-compliant installations.", true),
            svc("HVAC", "Heating, ventilation, and air conditioning installation and service. Keep your home comfortable year-round with efficient HVAC systems.", true),
        ],
    },
    SeedCategory {
        name: "Outdoor & Specialty",
        slug: "outdoor-specialty",
        description: "Lawn care, pool installation, and general maintenance",
        services: &[
            svc("Lawn Care", "Regular lawn maintenance including mowing, trimming, fertilization, and seasonal cleanup. Keep your property looking its best all year.", false),
            svc("Fiberglass Pool Installation", "Professional fiberglass pool installation with expert site preparation, plumbing, and finishing. Create your backyard oasis with a quality pool installation.", false),
            svc("Maintenance", "General maintenance and handyman services for residential and commercial properties. We handle repairs, upkeep, and preventive maintenance.", false),
        ],
    },
];

/// Admin account created by the seeder.
#[derive(Debug, Clone)]
pub struct SeedAdmin {
    pub username: String,
    pub password: String,
}

impl SeedAdmin {
    /// `ADMIN_USERNAME` / `ADMIN_PASSWORD`, defaulting to `admin` / `changeme123`.
    pub fn from_env() -> Self {
        Self {
            username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into()),
            password: std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "changeme123".into()),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub categories: usize,
    pub services: usize,
    pub settings_created: bool,
}

pub fn default_settings() -> SettingsInput {
    SettingsInput {
        service_area_lat: 40.7128,
        service_area_lng: -74.006,
        service_area_miles: 50,
        company_name: "Hometown Services".into(),
        company_phone: "(555) 123-4567".into(),
        company_email: "info@hometownservices.net".into(),
        company_address: Some("123 Main Street, Anytown, USA 12345".into()),
    }
}

async fn upsert_category(db: &DatabaseConnection, seed: &SeedCategory, order: i32) -> Result<category::Model, ServiceError> {
    let now = Utc::now();
    let existing = category::Entity::find()
        .filter(category::Column::Slug.eq(seed.slug))
        .one(db)
        .await?;
    let saved = match existing {
        Some(m) => {
            let mut am: category::ActiveModel = m.into();
            am.name = Set(seed.name.to_string());
            am.description = Set(Some(seed.description.to_string()));
            am.display_order = Set(order);
            am.updated_at = Set(now.into());
            am.update(db).await?
        }
        None => category::create(db, seed.name, seed.slug, Some(seed.description.to_string()), order).await?,
    };
    Ok(saved)
}

async fn upsert_service(db: &DatabaseConnection, seed: &SeedService, category_id: uuid::Uuid, order: i32) -> Result<(), ServiceError> {
    let slug = generate_slug(seed.name);
    let existing = service::Entity::find()
        .filter(service::Column::Slug.eq(slug.as_str()))
        .one(db)
        .await?;
    match existing {
        Some(m) => {
            let mut am: service::ActiveModel = m.into();
            am.name = Set(seed.name.to_string());
            am.description = Set(seed.description.to_string());
            am.is_subcontracted = Set(seed.subcontracted);
            am.category_id = Set(category_id);
            am.display_order = Set(order);
            am.updated_at = Set(Utc::now().into());
            am.update(db).await?;
        }
        None => {
            service::create(db, service::NewService {
                name: seed.name.to_string(),
                slug,
                description: seed.description.to_string(),
                image_url: None,
                is_subcontracted: seed.subcontracted,
                category_id,
                display_order: order,
            })
            .await?;
        }
    }
    Ok(())
}

/// Upsert the default catalog and admin; create settings only when missing.
#[instrument(skip(db, admin, auth), fields(admin = %admin.username))]
pub async fn seed_defaults(db: &DatabaseConnection, admin: &SeedAdmin, auth: AuthConfig) -> Result<SeedReport, ServiceError> {
    let mut report = SeedReport::default();

    for (ci, cat) in CATALOG.iter().enumerate() {
        let saved = upsert_category(db, cat, ci as i32 + 1).await?;
        report.categories += 1;
        for (si, s) in cat.services.iter().enumerate() {
            upsert_service(db, s, saved.id, si as i32 + 1).await?;
            report.services += 1;
        }
        info!(event = "seed_category", slug = %saved.slug, services = cat.services.len());
    }

    if settings::get_settings(db).await?.is_none() {
        settings::upsert_settings(db, default_settings()).await?;
        report.settings_created = true;
    }

    let auth_svc = AuthService::new(Arc::new(SeaOrmAuthRepository { db: db.clone() }), auth);
    auth_svc
        .set_password(&admin.username, &admin.password)
        .await?;

    info!(event = "seed_completed", categories = report.categories, services = report.services, settings_created = report.settings_created);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::domain::LoginInput;
    use crate::catalog::{categories, services};
    use crate::test_support::get_db;

    fn auth() -> AuthConfig {
        AuthConfig { jwt_secret: "seed-secret-seed-secret-seed-secret".into(), session_ttl_hours: 1 }
    }

    #[tokio::test]
    async fn seeding_is_idempotent() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let admin = SeedAdmin { username: "owner".into(), password: "first-pass".into() };

        let first = seed_defaults(&db, &admin, auth()).await?;
        assert_eq!(first, SeedReport { categories: 5, services: 18, settings_created: true });

        let second = seed_defaults(&db, &SeedAdmin { password: "second-pass".into(), ..admin.clone() }, auth()).await?;
        assert!(!second.settings_created);

        let cats = categories::list_categories(&db).await?;
        assert_eq!(cats.len(), 5);
        assert_eq!(cats[1].category.slug, "exterior-roofing");
        assert_eq!(cats[1].service_count, 4);
        assert_eq!(services::list_services(&db, None).await?.len(), 18);
        assert_eq!(services::get_service_by_slug(&db, "trims-doors").await?.category.slug, "interior-finishing");

        let svc = AuthService::new(Arc::new(SeaOrmAuthRepository { db: db.clone() }), auth());
        let login = |p: &str| LoginInput { username: "owner".into(), password: p.into() };
        assert!(svc.login(login("first-pass")).await.is_err());
        assert!(svc.login(login("second-pass")).await.is_ok());
        Ok(())
    }
}
