use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use models::{category, service};

use crate::errors::ServiceError;
use crate::ordering::{Direction, EntityKind, SiblingScope};
use crate::slug::generate_unique_slug;
use crate::validation::{blank_to_none, Validator};

/// Create/update payload for a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: Option<i32>,
}

impl CategoryInput {
    pub fn validate(&self) -> Result<(), ServiceError> {
        let mut v = Validator::new();
        let name = self.name.trim();
        v.length("name", name, 1, 100, "Category name is required", "Category name must be less than 100 characters");
        if let Some(desc) = &self.description {
            v.max_length("description", desc.trim(), 500, "Description must be less than 500 characters");
        }
        if let Some(order) = self.display_order {
            v.check("display_order", order >= 0, "Display order must be zero or greater");
        }
        v.finish()
    }
}

/// Category row plus the number of services it owns.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryWithCount {
    #[serde(flatten)]
    pub category: category::Model,
    pub service_count: u64,
}

async fn service_count(db: &DatabaseConnection, category_id: Uuid) -> Result<u64, ServiceError> {
    Ok(service::Entity::find()
        .filter(service::Column::CategoryId.eq(category_id))
        .count(db)
        .await?)
}

async fn with_count(db: &DatabaseConnection, category: category::Model) -> Result<CategoryWithCount, ServiceError> {
    let service_count = service_count(db, category.id).await?;
    Ok(CategoryWithCount { category, service_count })
}

async fn slugs_except(db: &DatabaseConnection, except: Option<Uuid>) -> Result<Vec<String>, ServiceError> {
    let mut q = category::Entity::find().select_only().column(category::Column::Slug);
    if let Some(id) = except {
        q = q.filter(category::Column::Id.ne(id));
    }
    Ok(q.into_tuple::<String>().all(db).await?)
}

/// All categories ascending by display order, with service counts.
#[instrument(skip(db))]
pub async fn list_categories(db: &DatabaseConnection) -> Result<Vec<CategoryWithCount>, ServiceError> {
    let categories = category::Entity::find()
        .order_by_asc(category::Column::DisplayOrder)
        .order_by_asc(category::Column::CreatedAt)
        .order_by_asc(category::Column::Id)
        .all(db)
        .await?;

    let counts: HashMap<Uuid, i64> = service::Entity::find()
        .select_only()
        .column(service::Column::CategoryId)
        .column_as(service::Column::Id.count(), "service_count")
        .group_by(service::Column::CategoryId)
        .into_tuple::<(Uuid, i64)>()
        .all(db)
        .await?
        .into_iter()
        .collect();

    Ok(categories
        .into_iter()
        .map(|c| {
            let service_count = counts.get(&c.id).copied().unwrap_or(0).max(0) as u64;
            CategoryWithCount { category: c, service_count }
        })
        .collect())
}

pub async fn get_category(db: &DatabaseConnection, id: Uuid) -> Result<CategoryWithCount, ServiceError> {
    let found = category::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Category"))?;
    with_count(db, found).await
}

/// Create a category with a unique slug and an initial display order.
#[instrument(skip(db, input), fields(name = %input.name))]
pub async fn create_category(db: &DatabaseConnection, input: CategoryInput) -> Result<CategoryWithCount, ServiceError> {
    input.validate()?;
    let name = input.name.trim().to_string();
    let slug = generate_unique_slug(&name, &slugs_except(db, None).await?);
    if slug.is_empty() {
        return Err(ServiceError::Validation("Category name must contain letters or digits".into()));
    }
    let order = super::ordering(db)
        .assign_initial_order(SiblingScope::Categories, input.display_order)
        .await?;

    let created = category::create(db, &name, &slug, blank_to_none(input.description), order).await?;
    info!(event = "category_created", id = %created.id, slug = %created.slug, display_order = order);
    Ok(CategoryWithCount { category: created, service_count: 0 })
}

/// Update a category. The slug only changes when the name does.
#[instrument(skip(db, input), fields(id = %id))]
pub async fn update_category(db: &DatabaseConnection, id: Uuid, input: CategoryInput) -> Result<CategoryWithCount, ServiceError> {
    let existing = category::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Category"))?;
    input.validate()?;

    let name = input.name.trim().to_string();
    let slug = if name != existing.name {
        generate_unique_slug(&name, &slugs_except(db, Some(id)).await?)
    } else {
        existing.slug.clone()
    };
    if slug.is_empty() {
        return Err(ServiceError::Validation("Category name must contain letters or digits".into()));
    }
    let display_order = input.display_order.unwrap_or(existing.display_order);

    let mut am: category::ActiveModel = existing.into();
    am.name = Set(name);
    am.slug = Set(slug);
    am.description = Set(blank_to_none(input.description));
    am.display_order = Set(display_order);
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await?;

    info!(event = "category_updated", id = %updated.id, slug = %updated.slug);
    with_count(db, updated).await
}

/// Delete a category. Refused while it owns services or when it is the last one.
#[instrument(skip(db))]
pub async fn delete_category(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let existing = category::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Category"))?;

    let owned = service_count(db, id).await?;
    if owned > 0 {
        return Err(ServiceError::Conflict(format!(
            "Cannot delete category with {owned} service(s). Please reassign or delete the services first."
        )));
    }
    if category::Entity::find().count(db).await? <= 1 {
        return Err(ServiceError::Conflict(
            "Cannot delete the last category. At least one category must exist.".into(),
        ));
    }

    category::Entity::delete_by_id(existing.id).exec(db).await?;
    info!(event = "category_deleted", id = %id, slug = %existing.slug);
    Ok(())
}

/// Swap a category with its neighbor.
pub async fn move_category(db: &DatabaseConnection, id: Uuid, direction: Direction) -> Result<(), ServiceError> {
    super::ordering(db).move_item(EntityKind::Category, id, direction).await?;
    Ok(())
}
