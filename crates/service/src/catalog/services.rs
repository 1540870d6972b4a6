use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use models::{category, inquiry, service};

use crate::errors::ServiceError;
use crate::ordering::{Direction, EntityKind, SiblingScope};
use crate::search::{SearchIndex, SearchOptions, SearchableService};
use crate::slug::generate_unique_slug;
use crate::validation::{blank_to_none, is_url, Validator};

/// Create/update payload for a service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInput {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_subcontracted: bool,
    pub category_id: Uuid,
    #[serde(default)]
    pub display_order: Option<i32>,
}

impl ServiceInput {
    pub fn validate(&self) -> Result<(), ServiceError> {
        let mut v = Validator::new();
        v.length("name", self.name.trim(), 1, 100, "Service name is required", "Service name must be less than 100 characters");
        v.length(
            "description",
            self.description.trim(),
            10,
            2000,
            "Description must be at least 10 characters",
            "Description must be less than 2000 characters",
        );
        if let Some(url) = self.image_url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            v.check("image_url", is_url(url), "Please enter a valid URL");
            v.max_length("image_url", url, 500, "URL must be less than 500 characters");
        }
        if let Some(order) = self.display_order {
            v.check("display_order", order >= 0, "Display order must be zero or greater");
        }
        v.finish()
    }
}

/// Category fields embedded in service responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl From<category::Model> for CategorySummary {
    fn from(c: category::Model) -> Self { Self { id: c.id, name: c.name, slug: c.slug } }
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceDetail {
    #[serde(flatten)]
    pub service: service::Model,
    pub category: CategorySummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inquiry_count: Option<u64>,
}

/// Admin view: one category and its services in display order.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryServices {
    #[serde(flatten)]
    pub category: category::Model,
    pub services: Vec<ServiceDetail>,
}

/// Result of deleting a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedService {
    pub has_inquiries: bool,
    pub inquiry_count: u64,
}

async fn slugs_except(db: &DatabaseConnection, except: Option<Uuid>) -> Result<Vec<String>, ServiceError> {
    let mut q = service::Entity::find().select_only().column(service::Column::Slug);
    if let Some(id) = except {
        q = q.filter(service::Column::Id.ne(id));
    }
    Ok(q.into_tuple::<String>().all(db).await?)
}

async fn require_category(db: &DatabaseConnection, id: Uuid) -> Result<category::Model, ServiceError> {
    category::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::Validation("Category not found".into()))
}

async fn inquiry_count(db: &DatabaseConnection, service_id: Uuid) -> Result<u64, ServiceError> {
    Ok(inquiry::Entity::find()
        .filter(inquiry::Column::ServiceId.eq(service_id))
        .count(db)
        .await?)
}

async fn detail(db: &DatabaseConnection, svc: service::Model, with_inquiries: bool) -> Result<ServiceDetail, ServiceError> {
    let category = category::Entity::find_by_id(svc.category_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Category"))?;
    let inquiry_count = if with_inquiries { Some(inquiry_count(db, svc.id).await?) } else { None };
    Ok(ServiceDetail { service: svc, category: category.into(), inquiry_count })
}

/// Public listing: by category order, then service order; optionally one category by slug.
#[instrument(skip(db))]
pub async fn list_services(db: &DatabaseConnection, category_slug: Option<&str>) -> Result<Vec<ServiceDetail>, ServiceError> {
    let mut q = service::Entity::find().find_also_related(category::Entity);
    if let Some(slug) = category_slug {
        q = q.filter(category::Column::Slug.eq(slug));
    }
    let rows = q
        .order_by_asc(category::Column::DisplayOrder)
        .order_by_asc(service::Column::DisplayOrder)
        .order_by_asc(service::Column::CreatedAt)
        .order_by_asc(service::Column::Id)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(svc, cat)| cat.map(|c| ServiceDetail { service: svc, category: c.into(), inquiry_count: None }))
        .collect())
}

/// Admin listing grouped under each category, with inquiry counts.
#[instrument(skip(db))]
pub async fn list_grouped(db: &DatabaseConnection) -> Result<Vec<CategoryServices>, ServiceError> {
    let categories = category::Entity::find()
        .order_by_asc(category::Column::DisplayOrder)
        .order_by_asc(category::Column::CreatedAt)
        .order_by_asc(category::Column::Id)
        .all(db)
        .await?;
    let services = service::Entity::find()
        .order_by_asc(service::Column::DisplayOrder)
        .order_by_asc(service::Column::CreatedAt)
        .order_by_asc(service::Column::Id)
        .all(db)
        .await?;
    let counts: HashMap<Uuid, i64> = inquiry::Entity::find()
        .select_only()
        .column(inquiry::Column::ServiceId)
        .column_as(inquiry::Column::Id.count(), "inquiry_count")
        .filter(inquiry::Column::ServiceId.is_not_null())
        .group_by(inquiry::Column::ServiceId)
        .into_tuple::<(Uuid, i64)>()
        .all(db)
        .await?
        .into_iter()
        .collect();

    let mut by_category: HashMap<Uuid, Vec<service::Model>> = HashMap::new();
    for s in services {
        by_category.entry(s.category_id).or_default().push(s);
    }

    Ok(categories
        .into_iter()
        .map(|c| {
            let summary = CategorySummary::from(c.clone());
            let services = by_category
                .remove(&c.id)
                .unwrap_or_default()
                .into_iter()
                .map(|s| {
                    let n = counts.get(&s.id).copied().unwrap_or(0).max(0) as u64;
                    ServiceDetail { service: s, category: summary.clone(), inquiry_count: Some(n) }
                })
                .collect();
            CategoryServices { category: c, services }
        })
        .collect())
}

pub async fn get_service_by_slug(db: &DatabaseConnection, slug: &str) -> Result<ServiceDetail, ServiceError> {
    let found = service::Entity::find()
        .filter(service::Column::Slug.eq(slug))
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Service"))?;
    detail(db, found, false).await
}

pub async fn get_service(db: &DatabaseConnection, id: Uuid) -> Result<ServiceDetail, ServiceError> {
    let found = service::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Service"))?;
    detail(db, found, true).await
}

#[instrument(skip(db, input), fields(name = %input.name, category_id = %input.category_id))]
pub async fn create_service(db: &DatabaseConnection, input: ServiceInput) -> Result<ServiceDetail, ServiceError> {
    input.validate()?;
    let category = require_category(db, input.category_id).await?;

    let name = input.name.trim().to_string();
    let slug = generate_unique_slug(&name, &slugs_except(db, None).await?);
    if slug.is_empty() {
        return Err(ServiceError::Validation("Service name must contain letters or digits".into()));
    }
    let order = super::ordering(db)
        .assign_initial_order(SiblingScope::ServicesIn(category.id), input.display_order)
        .await?;

    let created = service::create(db, service::NewService {
        name,
        slug,
        description: input.description.trim().to_string(),
        image_url: blank_to_none(input.image_url),
        is_subcontracted: input.is_subcontracted,
        category_id: category.id,
        display_order: order,
    })
    .await?;

    info!(event = "service_created", id = %created.id, slug = %created.slug, display_order = order);
    Ok(ServiceDetail { service: created, category: category.into(), inquiry_count: Some(0) })
}

/// Update a service. Moving it to another category without an explicit
/// order appends it to the end of the new category.
#[instrument(skip(db, input), fields(id = %id))]
pub async fn update_service(db: &DatabaseConnection, id: Uuid, input: ServiceInput) -> Result<ServiceDetail, ServiceError> {
    let existing = service::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Service"))?;
    input.validate()?;
    let category = require_category(db, input.category_id).await?;

    let name = input.name.trim().to_string();
    let slug = if name != existing.name {
        generate_unique_slug(&name, &slugs_except(db, Some(id)).await?)
    } else {
        existing.slug.clone()
    };
    if slug.is_empty() {
        return Err(ServiceError::Validation("Service name must contain letters or digits".into()));
    }

    let display_order = match input.display_order {
        Some(order) => order,
        None if category.id != existing.category_id => {
            super::ordering(db)
                .assign_initial_order(SiblingScope::ServicesIn(category.id), None)
                .await?
        }
        None => existing.display_order,
    };

    let mut am: service::ActiveModel = existing.into();
    am.name = Set(name);
    am.slug = Set(slug);
    am.description = Set(input.description.trim().to_string());
    am.image_url = Set(blank_to_none(input.image_url));
    am.is_subcontracted = Set(input.is_subcontracted);
    am.category_id = Set(category.id);
    am.display_order = Set(display_order);
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await?;

    info!(event = "service_updated", id = %updated.id, slug = %updated.slug);
    detail(db, updated, true).await
}

/// Delete a service after detaching its inquiries, in one transaction.
#[instrument(skip(db))]
pub async fn delete_service(db: &DatabaseConnection, id: Uuid) -> Result<DeletedService, ServiceError> {
    let txn = db.begin().await?;
    if service::Entity::find_by_id(id).one(&txn).await?.is_none() {
        txn.rollback().await?;
        return Err(ServiceError::not_found("Service"));
    }
    let unlinked = inquiry::unlink_service(&txn, id).await?;
    service::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    info!(event = "service_deleted", id = %id, unlinked_inquiries = unlinked);
    Ok(DeletedService { has_inquiries: unlinked > 0, inquiry_count: unlinked })
}

/// Swap a service with its neighbor inside its category.
pub async fn move_service(db: &DatabaseConnection, id: Uuid, direction: Direction) -> Result<(), ServiceError> {
    super::ordering(db).move_item(EntityKind::Service, id, direction).await?;
    Ok(())
}

/// Flat records for the search index, in public listing order.
pub async fn searchable_services(db: &DatabaseConnection) -> Result<Vec<SearchableService>, ServiceError> {
    Ok(list_services(db, None)
        .await?
        .into_iter()
        .map(|d| SearchableService {
            id: d.service.id,
            name: d.service.name,
            slug: d.service.slug,
            description: d.service.description,
            category_name: d.category.name,
            category_slug: d.category.slug,
        })
        .collect())
}

/// Build a fresh index from the current service list.
pub async fn build_search_index(db: &DatabaseConnection, opts: SearchOptions) -> Result<SearchIndex, ServiceError> {
    let records = searchable_services(db).await?;
    info!(event = "search_index_built", records = records.len());
    Ok(SearchIndex::with_options(records, opts))
}
