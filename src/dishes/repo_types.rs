use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: String,
    pub quick_prep: bool,
    pub prep_time: i64,
    pub cook_time: i64,
    pub image_url: Option<String>,
    pub steps: Vec<String>,
    pub calories: Option<i64>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
