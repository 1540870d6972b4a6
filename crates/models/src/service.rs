use sea_orm::{entity::prelude::*, Set, ConnectionTrait, ActiveModelTrait};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{category, errors, inquiry};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub image_url: Option<String>,
    pub is_subcontracted: bool,
    pub category_id: Uuid,
    pub display_order: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Category, Inquiries }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Category => Entity::belongs_to(category::Entity)
                .from(Column::CategoryId)
                .to(category::Column::Id)
                .into(),
            Relation::Inquiries => Entity::has_many(inquiry::Entity).into(),
        }
    }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef { Relation::Category.def() }
}

impl Related<inquiry::Entity> for Entity {
    fn to() -> RelationDef { Relation::Inquiries.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Fields of a new service row.
#[derive(Debug, Clone)]
pub struct NewService {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image_url: Option<String>,
    pub is_subcontracted: bool,
    pub category_id: Uuid,
    pub display_order: i32,
}

pub async fn create<C: ConnectionTrait>(db: &C, input: NewService) -> Result<Model, errors::ModelError> {
    if input.name.trim().is_empty() { return Err(errors::ModelError::Validation("service name required".into())); }
    if input.slug.is_empty() { return Err(errors::ModelError::Validation("service slug required".into())); }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        slug: Set(input.slug),
        description: Set(input.description),
        image_url: Set(input.image_url),
        is_subcontracted: Set(input.is_subcontracted),
        category_id: Set(input.category_id),
        display_order: Set(input.display_order),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
