//! Contact inquiries: public submission and the admin inbox.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use models::inquiry::{self, InquiryStatus};
use models::service;

use crate::errors::ServiceError;
use crate::pagination::{PageMeta, Pagination};
use crate::validation::{blank_to_none, is_phone, Validator};

/// Contact form payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InquiryInput {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Accepts an empty string for "no service selected".
    #[serde(default)]
    pub service_id: Option<String>,
    pub message: String,
}

impl InquiryInput {
    /// Validate and return the parsed service id, if any.
    pub fn validate(&self) -> Result<Option<Uuid>, ServiceError> {
        let mut v = Validator::new();
        v.length("name", self.name.trim(), 2, 100, "Name must be at least 2 characters", "Name must be less than 100 characters");
        v.email("email", self.email.trim());
        if let Some(phone) = &self.phone {
            v.max_length("phone", phone, 20, "Phone number must be less than 20 characters");
            v.check("phone", is_phone(phone), "Please enter a valid phone number");
        }
        v.length(
            "message",
            self.message.trim(),
            10,
            2000,
            "Message must be at least 10 characters",
            "Message must be less than 2000 characters",
        );

        let service_id = match self.service_id.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => {
                let parsed = Uuid::parse_str(raw).ok();
                v.check("service_id", parsed.is_some(), "Invalid service");
                parsed
            }
            None => None,
        };
        v.finish()?;
        Ok(service_id)
    }
}

/// Inquiry row plus the linked service's name.
#[derive(Debug, Clone, Serialize)]
pub struct InquiryView {
    #[serde(flatten)]
    pub inquiry: inquiry::Model,
    pub service: Option<LinkedService>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedService {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InquiryPage {
    pub inquiries: Vec<InquiryView>,
    pub pagination: PageMeta,
}

fn view(row: (inquiry::Model, Option<service::Model>)) -> InquiryView {
    let (inquiry, svc) = row;
    InquiryView { inquiry, service: svc.map(|s| LinkedService { id: s.id, name: s.name }) }
}

/// Validate and store a new inquiry with status `NEW`.
#[instrument(skip(db, input))]
pub async fn create_inquiry(db: &DatabaseConnection, input: InquiryInput) -> Result<inquiry::Model, ServiceError> {
    let service_id = input.validate()?;
    if let Some(id) = service_id {
        if service::Entity::find_by_id(id).one(db).await?.is_none() {
            return Err(ServiceError::Validation("Invalid service selected".into()));
        }
    }

    let created = inquiry::create(
        db,
        input.name.trim(),
        input.email.trim(),
        blank_to_none(input.phone),
        service_id,
        input.message.trim(),
    )
    .await?;
    info!(event = "inquiry_created", id = %created.id, service_id = ?created.service_id);
    Ok(created)
}

/// Newest first, optionally filtered by status.
#[instrument(skip(db))]
pub async fn list_inquiries(
    db: &DatabaseConnection,
    status: Option<InquiryStatus>,
    opts: Pagination,
) -> Result<InquiryPage, ServiceError> {
    let (page_idx, limit) = opts.normalize();
    let mut q = inquiry::Entity::find();
    if let Some(status) = status {
        q = q.filter(inquiry::Column::Status.eq(status));
    }
    let total = q.clone().count(db).await?;
    let rows = q
        .find_also_related(service::Entity)
        .order_by_desc(inquiry::Column::CreatedAt)
        .order_by_desc(inquiry::Column::Id)
        .paginate(db, limit)
        .fetch_page(page_idx)
        .await?;

    Ok(InquiryPage { inquiries: rows.into_iter().map(view).collect(), pagination: PageMeta::new(opts, total) })
}

pub async fn get_inquiry(db: &DatabaseConnection, id: Uuid) -> Result<InquiryView, ServiceError> {
    inquiry::Entity::find_by_id(id)
        .find_also_related(service::Entity)
        .one(db)
        .await?
        .map(view)
        .ok_or_else(|| ServiceError::not_found("Inquiry"))
}

#[instrument(skip(db))]
pub async fn update_status(db: &DatabaseConnection, id: Uuid, status: InquiryStatus) -> Result<inquiry::Model, ServiceError> {
    let existing = inquiry::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Inquiry"))?;
    let previous = existing.status;
    let mut am: inquiry::ActiveModel = existing.into();
    am.status = Set(status);
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await?;
    info!(event = "inquiry_status_changed", id = %id, from = %previous, to = %status);
    Ok(updated)
}

#[instrument(skip(db))]
pub async fn delete_inquiry(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let res = inquiry::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("Inquiry"));
    }
    info!(event = "inquiry_deleted", id = %id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn form(name: &str) -> InquiryInput {
        InquiryInput {
            name: name.into(),
            email: "homeowner@example.com".into(),
            phone: Some("(555) 010-2000".into()),
            service_id: Some(String::new()),
            message: "Please call me about a quote.".into(),
        }
    }

    #[test]
    fn validation_messages() {
        let bad = InquiryInput {
            name: "A".into(),
            email: "nope".into(),
            phone: Some("call me maybe".into()),
            service_id: Some("not-a-uuid".into()),
            message: "short".into(),
        };
        match bad.validate().unwrap_err() {
            ServiceError::InvalidFields(map) => {
                assert_eq!(map["name"], vec!["Name must be at least 2 characters".to_string()]);
                assert_eq!(map["email"], vec!["Please enter a valid email address".to_string()]);
                assert_eq!(map["phone"], vec!["Please enter a valid phone number".to_string()]);
                assert_eq!(map["service_id"], vec!["Invalid service".to_string()]);
                assert_eq!(map["message"], vec!["Message must be at least 10 characters".to_string()]);
            }
            e => panic!("unexpected {e:?}"),
        }
        assert_eq!(form("Jo").validate().unwrap(), None);
    }

    #[tokio::test]
    async fn create_and_paginate() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        for i in 0..12 {
            create_inquiry(&db, form(&format!("Person {i}"))).await?;
        }
        let first = list_inquiries(&db, None, Pagination::new(Some(1), Some(5))).await?;
        assert_eq!(first.inquiries.len(), 5);
        assert_eq!(first.pagination, PageMeta { page: 1, limit: 5, total: 12, total_pages: 3 });

        let last = list_inquiries(&db, None, Pagination::new(Some(3), Some(5))).await?;
        assert_eq!(last.inquiries.len(), 2);

        let newest = &first.inquiries[0].inquiry;
        let oldest = &last.inquiries[1].inquiry;
        assert!(newest.created_at >= oldest.created_at);
        assert_eq!(first.inquiries[0].service, None);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_service_is_rejected() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let mut input = form("Sam");
        input.service_id = Some(Uuid::new_v4().to_string());
        let err = create_inquiry(&db, input).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref m) if m == "Invalid service selected"));
        Ok(())
    }

    #[tokio::test]
    async fn status_filter_update_and_delete() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = create_inquiry(&db, form("Ann")).await?;
        let b = create_inquiry(&db, form("Bob")).await?;
        assert_eq!(a.status, InquiryStatus::New);

        let updated = update_status(&db, a.id, InquiryStatus::Responded).await?;
        assert_eq!(updated.status, InquiryStatus::Responded);

        let responded = list_inquiries(&db, Some(InquiryStatus::Responded), Pagination::default()).await?;
        assert_eq!(responded.pagination.total, 1);
        assert_eq!(responded.inquiries[0].inquiry.id, a.id);
        let new = list_inquiries(&db, Some(InquiryStatus::New), Pagination::default()).await?;
        assert_eq!(new.inquiries[0].inquiry.id, b.id);

        delete_inquiry(&db, b.id).await?;
        assert!(matches!(get_inquiry(&db, b.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(delete_inquiry(&db, b.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(update_status(&db, b.id, InquiryStatus::Read).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
