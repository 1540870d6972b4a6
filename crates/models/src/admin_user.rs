use sea_orm::{entity::prelude::*, Set, ConnectionTrait, ActiveModelTrait, QueryFilter};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "admin_user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_username(username: &str) -> Result<(), errors::ModelError> {
    if username.trim().is_empty() { return Err(errors::ModelError::Validation("username required".into())); }
    if username.chars().count() > 50 { return Err(errors::ModelError::Validation("username must be less than 50 characters".into())); }
    Ok(())
}

pub async fn find_by_username<C: ConnectionTrait>(db: &C, username: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::Username.eq(username.to_string()))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Insert the user, or replace the password hash of an existing one.
pub async fn upsert_password<C: ConnectionTrait>(db: &C, username: &str, password_hash: String) -> Result<Model, errors::ModelError> {
    validate_username(username)?;
    if password_hash.trim().is_empty() {
        return Err(errors::ModelError::Validation("password hash required".into()));
    }
    if let Some(existing) = find_by_username(db, username).await? {
        let mut am: ActiveModel = existing.into();
        am.password_hash = Set(password_hash);
        return am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()));
    }
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(username.to_string()),
        password_hash: Set(password_hash),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
