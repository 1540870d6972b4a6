use std::fmt;
use std::str::FromStr;

use sea_orm::{entity::prelude::*, sea_query::Expr, Set, ConnectionTrait, ActiveModelTrait};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, service};

/// Workflow state of a contact inquiry in the admin inbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "UPPERCASE")]
pub enum InquiryStatus {
    #[sea_orm(string_value = "NEW")]
    New,
    #[sea_orm(string_value = "READ")]
    Read,
    #[sea_orm(string_value = "RESPONDED")]
    Responded,
    #[sea_orm(string_value = "ARCHIVED")]
    Archived,
}

impl InquiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryStatus::New => "NEW",
            InquiryStatus::Read => "READ",
            InquiryStatus::Responded => "RESPONDED",
            InquiryStatus::Archived => "ARCHIVED",
        }
    }
}

impl fmt::Display for InquiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for InquiryStatus {
    type Err = errors::ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW" => Ok(InquiryStatus::New),
            "READ" => Ok(InquiryStatus::Read),
            "RESPONDED" => Ok(InquiryStatus::Responded),
            "ARCHIVED" => Ok(InquiryStatus::Archived),
            other => Err(errors::ModelError::Validation(format!("invalid inquiry status: {other}"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contact_inquiry")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub service_id: Option<Uuid>,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub status: InquiryStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Service }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Service => Entity::belongs_to(service::Entity)
                .from(Column::ServiceId)
                .to(service::Column::Id)
                .into(),
        }
    }
}

impl Related<service::Entity> for Entity {
    fn to() -> RelationDef { Relation::Service.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    name: &str,
    email: &str,
    phone: Option<String>,
    service_id: Option<Uuid>,
    message: &str,
) -> Result<Model, errors::ModelError> {
    if !email.contains('@') { return Err(errors::ModelError::Validation("invalid email".into())); }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        phone: Set(phone),
        service_id: Set(service_id),
        message: Set(message.to_string()),
        status: Set(InquiryStatus::New),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Detach every inquiry from `service_id`. Returns the number of rows touched.
pub async fn unlink_service<C: ConnectionTrait>(db: &C, service_id: Uuid) -> Result<u64, errors::ModelError> {
    let res = Entity::update_many()
        .col_expr(Column::ServiceId, Expr::value(Option::<Uuid>::None))
        .filter(Column::ServiceId.eq(service_id))
        .exec(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected)
}
