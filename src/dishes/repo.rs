use time::OffsetDateTime;

use crate::db::Db;
use crate::dishes::{dto::UpdateDishBody, repo_types::Dish, services::NewDish};

impl Dish {
    /// Dishes owned by `user_id`, in insertion order.
    pub async fn list_by_user(db: &Db, user_id: i64) -> Vec<Dish> {
        db.read()
            .await
            .dishes
            .values()
            .filter(|d| d.user_id == user_id)
            .cloned()
            .collect()
    }

    pub async fn create(db: &Db, user_id: i64, new: NewDish) -> Dish {
        let mut tables = db.write().await;
        let dish = Dish {
            id: tables.next_dish_id(),
            user_id,
            name: new.name,
            description: new.description,
            quick_prep: new.quick_prep,
            prep_time: new.prep_time,
            cook_time: new.cook_time,
            image_url: new.image_url,
            steps: new.steps,
            calories: new.calories,
            created_at: OffsetDateTime::now_utc(),
        };
        tables.dishes.insert(dish.id, dish.clone());
        dish
    }

    /// A dish is only visible to its owner.
    pub async fn find_for_user(db: &Db, user_id: i64, id: i64) -> Option<Dish> {
        db.read()
            .await
            .dishes
            .get(&id)
            .filter(|d| d.user_id == user_id)
            .cloned()
    }

    /// Merges `patch` over the stored dish. `None` when the dish is missing or
    /// owned by someone else.
    pub async fn update_owned(
        db: &Db,
        user_id: i64,
        id: i64,
        patch: UpdateDishBody,
    ) -> Option<Dish> {
        let mut tables = db.write().await;
        let dish = tables
            .dishes
            .get_mut(&id)
            .filter(|d| d.user_id == user_id)?;

        if let Some(v) = patch.name {
            dish.name = v;
        }
        if let Some(v) = patch.description {
            dish.description = v;
        }
        if let Some(v) = patch.quick_prep {
            dish.quick_prep = v;
        }
        if let Some(v) = patch.prep_time {
            dish.prep_time = v;
        }
        if let Some(v) = patch.cook_time {
            dish.cook_time = v;
        }
        if let Some(v) = patch.image_url {
            dish.image_url = Some(v);
        }
        if let Some(v) = patch.steps {
            dish.steps = v;
        }
        if let Some(v) = patch.calories {
            dish.calories = Some(v);
        }
        Some(dish.clone())
    }

    pub async fn delete_owned(db: &Db, user_id: i64, id: i64) -> bool {
        let mut tables = db.write().await;
        match tables.dishes.get(&id) {
            Some(d) if d.user_id == user_id => tables.dishes.remove(&id).is_some(),
            _ => false,
        }
    }
}
