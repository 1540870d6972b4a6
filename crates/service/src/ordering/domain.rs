use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::OrderingError;

/// Which table an orderable row lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Category,
    Service,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Category => "category",
            EntityKind::Service => "service",
        }
    }

    /// Capitalized form used in user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Category => "Category",
            EntityKind::Service => "Service",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Move direction relative to the ascending display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    /// Word used in boundary messages ("already at the top").
    pub fn boundary(&self) -> &'static str {
        match self {
            Direction::Up => "top",
            Direction::Down => "bottom",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Direction {
    type Err = OrderingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(OrderingError::InvalidDirection(other.to_string())),
        }
    }
}

/// Set of rows whose display orders are compared with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiblingScope {
    /// All categories.
    Categories,
    /// Services of one category.
    ServicesIn(Uuid),
}

impl SiblingScope {
    pub fn kind(&self) -> EntityKind {
        match self {
            SiblingScope::Categories => EntityKind::Category,
            SiblingScope::ServicesIn(_) => EntityKind::Service,
        }
    }
}

/// The ordering view of a category or service row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedItem {
    pub id: Uuid,
    pub scope: SiblingScope,
    pub display_order: i32,
}

impl OrderedItem {
    pub fn kind(&self) -> EntityKind { self.scope.kind() }
}
