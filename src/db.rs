use std::collections::{BTreeMap, HashMap};

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::auth::repo_types::User;
use crate::dishes::repo_types::Dish;

/// In-memory tables backing the reference backend.
#[derive(Debug, Default)]
pub struct Tables {
    pub users: BTreeMap<i64, User>,
    pub dishes: BTreeMap<i64, Dish>,
    /// live session id -> user id
    pub sessions: HashMap<Uuid, i64>,
    next_user_id: i64,
    next_dish_id: i64,
}

impl Tables {
    pub(crate) fn next_user_id(&mut self) -> i64 {
        self.next_user_id += 1;
        self.next_user_id
    }

    pub(crate) fn next_dish_id(&mut self) -> i64 {
        self.next_dish_id += 1;
        self.next_dish_id
    }
}

#[derive(Debug, Default)]
pub struct Db {
    tables: RwLock<Tables>,
}

impl Db {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().await
    }
}
