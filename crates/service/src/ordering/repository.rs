use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{EntityKind, OrderedItem, SiblingScope};
use super::errors::OrderingError;

/// Store access needed by the ordering rules.
#[async_trait]
pub trait OrderingRepository: Send + Sync {
    async fn find(&self, kind: EntityKind, id: Uuid) -> Result<Option<OrderedItem>, OrderingError>;

    /// Every row of `scope`, ascending by display order, ties by insertion order.
    async fn siblings(&self, scope: SiblingScope) -> Result<Vec<OrderedItem>, OrderingError>;

    /// Exchange the display orders of `a` and `b` in one transaction.
    /// Either both rows change or neither does.
    async fn swap_orders(&self, a: &OrderedItem, b: &OrderedItem) -> Result<(), OrderingError>;

    async fn max_order(&self, scope: SiblingScope) -> Result<Option<i32>, OrderingError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockOrderingRepository {
        // insertion order doubles as the tie breaker
        rows: Mutex<Vec<OrderedItem>>,
        swaps: Mutex<Vec<(Uuid, Uuid)>>,
        vanish_on_swap: Mutex<Option<Uuid>>,
    }

    impl MockOrderingRepository {
        pub fn insert(&self, scope: SiblingScope, display_order: i32) -> Uuid {
            let id = Uuid::new_v4();
            self.rows.lock().unwrap().push(OrderedItem { id, scope, display_order });
            id
        }

        pub fn order_of(&self, id: Uuid) -> Option<i32> {
            self.rows.lock().unwrap().iter().find(|r| r.id == id).map(|r| r.display_order)
        }

        pub fn snapshot(&self) -> Vec<OrderedItem> { self.rows.lock().unwrap().clone() }

        pub fn swaps(&self) -> Vec<(Uuid, Uuid)> { self.swaps.lock().unwrap().clone() }

        /// Simulate `id` being deleted by someone else right before the next swap.
        pub fn vanish_on_next_swap(&self, id: Uuid) { *self.vanish_on_swap.lock().unwrap() = Some(id); }
    }

    #[async_trait]
    impl OrderingRepository for MockOrderingRepository {
        async fn find(&self, kind: EntityKind, id: Uuid) -> Result<Option<OrderedItem>, OrderingError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().find(|r| r.id == id && r.kind() == kind).cloned())
        }

        async fn siblings(&self, scope: SiblingScope) -> Result<Vec<OrderedItem>, OrderingError> {
            let rows = self.rows.lock().unwrap();
            let mut out: Vec<OrderedItem> = rows.iter().filter(|r| r.scope == scope).cloned().collect();
            // stable sort keeps insertion order among equal values
            out.sort_by_key(|r| r.display_order);
            Ok(out)
        }

        async fn swap_orders(&self, a: &OrderedItem, b: &OrderedItem) -> Result<(), OrderingError> {
            let mut rows = self.rows.lock().unwrap();
            if let Some(gone) = self.vanish_on_swap.lock().unwrap().take() {
                rows.retain(|r| r.id != gone);
            }
            let ia = rows.iter().position(|r| r.id == a.id);
            let ib = rows.iter().position(|r| r.id == b.id);
            let (Some(ia), Some(ib)) = (ia, ib) else {
                return Err(OrderingError::NotFound(a.kind()));
            };
            rows[ia].display_order = b.display_order;
            rows[ib].display_order = a.display_order;
            self.swaps.lock().unwrap().push((a.id, b.id));
            Ok(())
        }

        async fn max_order(&self, scope: SiblingScope) -> Result<Option<i32>, OrderingError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().filter(|r| r.scope == scope).map(|r| r.display_order).max())
        }
    }
}
