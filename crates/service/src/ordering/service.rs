use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::domain::{Direction, EntityKind, SiblingScope};
use super::errors::OrderingError;
use super::repository::OrderingRepository;

/// Reordering rules independent of web framework and store.
pub struct OrderingService<R: OrderingRepository> {
    repo: Arc<R>,
}

impl<R: OrderingRepository> Clone for OrderingService<R> {
    fn clone(&self) -> Self { Self { repo: self.repo.clone() } }
}

impl<R: OrderingRepository> OrderingService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Swap a row with its neighbor one position up or down.
    ///
    /// Only the two rows change; the multiset of display orders in the scope
    /// is preserved.
    ///
    /// # Examples
    /// ```
    /// use service::ordering::{Direction, EntityKind, OrderingService, SiblingScope};
    /// use service::ordering::repository::mock::MockOrderingRepository;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockOrderingRepository::default());
    /// let a = repo.insert(SiblingScope::Categories, 1);
    /// let b = repo.insert(SiblingScope::Categories, 2);
    /// let svc = OrderingService::new(repo.clone());
    /// tokio_test::block_on(svc.move_item(EntityKind::Category, b, Direction::Up)).unwrap();
    /// assert_eq!(repo.order_of(a), Some(2));
    /// assert_eq!(repo.order_of(b), Some(1));
    /// ```
    #[instrument(skip(self), fields(kind = %kind, id = %id, direction = %direction))]
    pub async fn move_item(&self, kind: EntityKind, id: Uuid, direction: Direction) -> Result<(), OrderingError> {
        let item = self.repo.find(kind, id).await?.ok_or(OrderingError::NotFound(kind))?;
        let siblings = self.repo.siblings(item.scope).await?;

        let index = siblings
            .iter()
            .position(|s| s.id == item.id)
            .ok_or(OrderingError::NotFound(kind))?;

        let neighbor = match direction {
            Direction::Up if index > 0 => index - 1,
            Direction::Down if index + 1 < siblings.len() => index + 1,
            _ => return Err(OrderingError::AlreadyAtBoundary { kind, direction }),
        };

        let current = &siblings[index];
        let other = &siblings[neighbor];
        debug!(neighbor = %other.id, from = current.display_order, to = other.display_order, "swapping display order");
        self.repo.swap_orders(current, other).await?;

        info!(event = "item_reordered", kind = %kind, id = %id, direction = %direction, neighbor = %other.id);
        Ok(())
    }

    /// Same as [`move_item`](Self::move_item) but takes the raw direction token.
    pub async fn move_item_str(&self, kind: EntityKind, id: Uuid, direction: &str) -> Result<(), OrderingError> {
        let direction: Direction = direction.parse()?;
        self.move_item(kind, id, direction).await
    }

    /// Display order for a new row in `scope`.
    ///
    /// An explicit nonzero value is used as given. Otherwise the row goes
    /// after the current maximum, or gets 1 in an empty scope. Existing rows
    /// are never renumbered.
    #[instrument(skip(self))]
    pub async fn assign_initial_order(&self, scope: SiblingScope, explicit: Option<i32>) -> Result<i32, OrderingError> {
        if let Some(value) = explicit.filter(|v| *v != 0) {
            return Ok(value);
        }
        let max = self.repo.max_order(scope).await?;
        Ok(max.map_or(1, |m| m.saturating_add(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::repository::mock::MockOrderingRepository;

    fn setup(orders: &[i32]) -> (Arc<MockOrderingRepository>, OrderingService<MockOrderingRepository>, Vec<Uuid>) {
        let repo = Arc::new(MockOrderingRepository::default());
        let ids = orders.iter().map(|o| repo.insert(SiblingScope::Categories, *o)).collect();
        (repo.clone(), OrderingService::new(repo), ids)
    }

    #[tokio::test]
    async fn move_up_swaps_with_previous() {
        let (repo, svc, ids) = setup(&[1, 2, 3]);
        svc.move_item(EntityKind::Category, ids[2], Direction::Up).await.unwrap();
        assert_eq!(repo.order_of(ids[0]), Some(1));
        assert_eq!(repo.order_of(ids[1]), Some(3));
        assert_eq!(repo.order_of(ids[2]), Some(2));
    }

    #[tokio::test]
    async fn boundary_moves_are_rejected() {
        let (repo, svc, ids) = setup(&[1, 2, 3]);
        let err = svc.move_item(EntityKind::Category, ids[0], Direction::Up).await.unwrap_err();
        assert!(matches!(err, OrderingError::AlreadyAtBoundary { direction: Direction::Up, .. }));
        assert_eq!(err.to_string(), "Category is already at the top");

        let err = svc.move_item(EntityKind::Category, ids[2], Direction::Down).await.unwrap_err();
        assert_eq!(err.to_string(), "Category is already at the bottom");
        assert!(repo.swaps().is_empty());
    }

    #[tokio::test]
    async fn single_item_cannot_move_either_way() {
        let (_repo, svc, ids) = setup(&[5]);
        for dir in [Direction::Up, Direction::Down] {
            let err = svc.move_item(EntityKind::Category, ids[0], dir).await.unwrap_err();
            assert_eq!(err.code(), 2003);
        }
    }

    #[tokio::test]
    async fn up_then_down_restores_orders() {
        let (repo, svc, ids) = setup(&[10, 20, 30, 40]);
        let before = repo.snapshot();
        svc.move_item(EntityKind::Category, ids[2], Direction::Up).await.unwrap();
        svc.move_item(EntityKind::Category, ids[2], Direction::Down).await.unwrap();
        assert_eq!(repo.snapshot(), before);
    }

    #[tokio::test]
    async fn swap_touches_only_the_two_rows() {
        let (repo, svc, ids) = setup(&[1, 4, 9, 16, 25]);
        let before = repo.snapshot();
        svc.move_item(EntityKind::Category, ids[1], Direction::Down).await.unwrap();
        let after = repo.snapshot();

        let changed: Vec<Uuid> = before
            .iter()
            .zip(after.iter())
            .filter(|(b, a)| b.display_order != a.display_order)
            .map(|(b, _)| b.id)
            .collect();
        assert_eq!(changed, vec![ids[1], ids[2]]);

        let mut multiset_before: Vec<i32> = before.iter().map(|r| r.display_order).collect();
        let mut multiset_after: Vec<i32> = after.iter().map(|r| r.display_order).collect();
        multiset_before.sort();
        multiset_after.sort();
        assert_eq!(multiset_before, multiset_after);
    }

    #[tokio::test]
    async fn unknown_or_wrong_kind_is_not_found() {
        let (_repo, svc, ids) = setup(&[1, 2]);
        let err = svc.move_item(EntityKind::Category, Uuid::new_v4(), Direction::Up).await.unwrap_err();
        assert!(matches!(err, OrderingError::NotFound(EntityKind::Category)));

        let err = svc.move_item(EntityKind::Service, ids[1], Direction::Up).await.unwrap_err();
        assert_eq!(err.to_string(), "Service not found");
    }

    #[tokio::test]
    async fn neighbor_vanishing_mid_move_is_not_found() {
        let (repo, svc, ids) = setup(&[1, 2]);
        repo.vanish_on_next_swap(ids[0]);
        let err = svc.move_item(EntityKind::Category, ids[1], Direction::Up).await.unwrap_err();
        assert!(matches!(err, OrderingError::NotFound(_)));
        assert_eq!(repo.order_of(ids[1]), Some(2));
    }

    #[tokio::test]
    async fn siblings_are_scoped_by_category() {
        let repo = Arc::new(MockOrderingRepository::default());
        let (c1, c2) = (Uuid::new_v4(), Uuid::new_v4());
        let a = repo.insert(SiblingScope::ServicesIn(c1), 1);
        let other = repo.insert(SiblingScope::ServicesIn(c2), 0);
        let svc = OrderingService::new(repo.clone());

        let err = svc.move_item(EntityKind::Service, a, Direction::Up).await.unwrap_err();
        assert!(matches!(err, OrderingError::AlreadyAtBoundary { kind: EntityKind::Service, .. }));
        assert_eq!(repo.order_of(other), Some(0));
    }

    #[tokio::test]
    async fn ties_keep_insertion_order() {
        let (repo, svc, ids) = setup(&[1, 1, 1]);
        // second of three equal values moves to the front of the tie group
        svc.move_item(EntityKind::Category, ids[1], Direction::Up).await.unwrap();
        assert_eq!(repo.swaps(), vec![(ids[1], ids[0])]);
        assert_eq!(repo.order_of(ids[0]), Some(1));
    }

    #[tokio::test]
    async fn direction_tokens() {
        let (_repo, svc, ids) = setup(&[1, 2]);
        svc.move_item_str(EntityKind::Category, ids[1], "up").await.unwrap();
        let err = svc.move_item_str(EntityKind::Category, ids[1], "sideways").await.unwrap_err();
        assert!(matches!(err, OrderingError::InvalidDirection(ref t) if t == "sideways"));
        assert_eq!(err.to_string(), "Invalid direction");
        assert!("UP".parse::<Direction>().is_err());
    }

    #[tokio::test]
    async fn initial_order_rules() {
        let repo = Arc::new(MockOrderingRepository::default());
        let svc = OrderingService::new(repo.clone());
        let scope = SiblingScope::ServicesIn(Uuid::new_v4());

        assert_eq!(svc.assign_initial_order(scope, None).await.unwrap(), 1);
        assert_eq!(svc.assign_initial_order(scope, Some(0)).await.unwrap(), 1);

        repo.insert(scope, 3);
        repo.insert(scope, 7);
        assert_eq!(svc.assign_initial_order(scope, None).await.unwrap(), 8);
        assert_eq!(svc.assign_initial_order(scope, Some(0)).await.unwrap(), 8);
        assert_eq!(svc.assign_initial_order(scope, Some(4)).await.unwrap(), 4);
        // other scopes are not consulted
        assert_eq!(svc.assign_initial_order(SiblingScope::Categories, None).await.unwrap(), 1);
    }
}
