use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};
use tracing::warn;
use uuid::Uuid;

use models::{category, service};

use crate::ordering::domain::{EntityKind, OrderedItem, SiblingScope};
use crate::ordering::errors::OrderingError;
use crate::ordering::repository::OrderingRepository;

pub struct SeaOrmOrderingRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmOrderingRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn category_item(m: category::Model) -> OrderedItem {
    OrderedItem { id: m.id, scope: SiblingScope::Categories, display_order: m.display_order }
}

fn service_item(m: service::Model) -> OrderedItem {
    OrderedItem { id: m.id, scope: SiblingScope::ServicesIn(m.category_id), display_order: m.display_order }
}

/// Set one row's display order; returns the number of rows matched.
async fn set_order<C: ConnectionTrait>(db: &C, kind: EntityKind, id: Uuid, value: i32) -> Result<u64, sea_orm::DbErr> {
    let now: sea_orm::prelude::DateTimeWithTimeZone = Utc::now().into();
    let res = match kind {
        EntityKind::Category => {
            category::Entity::update_many()
                .col_expr(category::Column::DisplayOrder, Expr::value(value))
                .col_expr(category::Column::UpdatedAt, Expr::value(now))
                .filter(category::Column::Id.eq(id))
                .exec(db)
                .await?
        }
        EntityKind::Service => {
            service::Entity::update_many()
                .col_expr(service::Column::DisplayOrder, Expr::value(value))
                .col_expr(service::Column::UpdatedAt, Expr::value(now))
                .filter(service::Column::Id.eq(id))
                .exec(db)
                .await?
        }
    };
    Ok(res.rows_affected)
}

#[async_trait::async_trait]
impl OrderingRepository for SeaOrmOrderingRepository {
    async fn find(&self, kind: EntityKind, id: Uuid) -> Result<Option<OrderedItem>, OrderingError> {
        let found = match kind {
            EntityKind::Category => category::Entity::find_by_id(id).one(&self.db).await?.map(category_item),
            EntityKind::Service => service::Entity::find_by_id(id).one(&self.db).await?.map(service_item),
        };
        Ok(found)
    }

    async fn siblings(&self, scope: SiblingScope) -> Result<Vec<OrderedItem>, OrderingError> {
        let items = match scope {
            SiblingScope::Categories => category::Entity::find()
                .order_by_asc(category::Column::DisplayOrder)
                .order_by_asc(category::Column::CreatedAt)
                .order_by_asc(category::Column::Id)
                .all(&self.db)
                .await?
                .into_iter()
                .map(category_item)
                .collect(),
            SiblingScope::ServicesIn(category_id) => service::Entity::find()
                .filter(service::Column::CategoryId.eq(category_id))
                .order_by_asc(service::Column::DisplayOrder)
                .order_by_asc(service::Column::CreatedAt)
                .order_by_asc(service::Column::Id)
                .all(&self.db)
                .await?
                .into_iter()
                .map(service_item)
                .collect(),
        };
        Ok(items)
    }

    async fn swap_orders(&self, a: &OrderedItem, b: &OrderedItem) -> Result<(), OrderingError> {
        let kind = a.kind();
        let txn = self.db.begin().await.map_err(|e| OrderingError::Transaction(e.to_string()))?;

        let first = set_order(&txn, kind, a.id, b.display_order).await;
        let second = match first {
            Ok(1) => set_order(&txn, kind, b.id, a.display_order).await,
            other => other,
        };

        match second {
            Ok(1) => txn.commit().await.map_err(|e| OrderingError::Transaction(e.to_string())),
            Ok(rows) => {
                warn!(event = "reorder_row_missing", kind = %kind, a = %a.id, b = %b.id, rows, "rolling back swap");
                txn.rollback().await.map_err(|e| OrderingError::Transaction(e.to_string()))?;
                Err(OrderingError::NotFound(kind))
            }
            Err(e) => {
                txn.rollback().await.map_err(|e| OrderingError::Transaction(e.to_string()))?;
                Err(OrderingError::Transaction(e.to_string()))
            }
        }
    }

    async fn max_order(&self, scope: SiblingScope) -> Result<Option<i32>, OrderingError> {
        let max = match scope {
            SiblingScope::Categories => category::Entity::find()
                .select_only()
                .column_as(category::Column::DisplayOrder.max(), "max_order")
                .into_tuple::<Option<i32>>()
                .one(&self.db)
                .await?,
            SiblingScope::ServicesIn(category_id) => service::Entity::find()
                .select_only()
                .column_as(service::Column::DisplayOrder.max(), "max_order")
                .filter(service::Column::CategoryId.eq(category_id))
                .into_tuple::<Option<i32>>()
                .one(&self.db)
                .await?,
        };
        Ok(max.flatten())
    }
}
