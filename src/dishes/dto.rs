use serde::{Deserialize, Serialize};

use crate::dishes::repo_types::Dish;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDishBody {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub quick_prep: Option<bool>,
    pub prep_time: Option<i64>,
    pub cook_time: Option<i64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub steps: Option<Vec<String>>,
    #[serde(default)]
    pub calories: Option<i64>,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDishBody {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quick_prep: Option<bool>,
    pub prep_time: Option<i64>,
    pub cook_time: Option<i64>,
    pub image_url: Option<String>,
    pub steps: Option<Vec<String>>,
    pub calories: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct DishResponse {
    pub dish: Dish,
}

#[derive(Debug, Serialize)]
pub struct DishesListResponse {
    pub dishes: Vec<Dish>,
}
