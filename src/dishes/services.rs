use crate::dishes::dto::{CreateDishBody, UpdateDishBody};
use crate::error::ApiError;

/// Dish fields accepted for insertion, defaults applied.
#[derive(Debug, Clone)]
pub struct NewDish {
    pub name: String,
    pub description: String,
    pub quick_prep: bool,
    pub prep_time: i64,
    pub cook_time: i64,
    pub image_url: Option<String>,
    pub steps: Vec<String>,
    pub calories: Option<i64>,
}

fn check_times(prep: Option<i64>, cook: Option<i64>) -> Result<(), ApiError> {
    if prep.is_some_and(|t| t < 0) || cook.is_some_and(|t| t < 0) {
        return Err(ApiError::bad_request("Invalid time values"));
    }
    Ok(())
}

fn check_calories(calories: Option<i64>) -> Result<(), ApiError> {
    if calories.is_some_and(|c| c < 0) {
        return Err(ApiError::bad_request("Invalid calories"));
    }
    Ok(())
}

impl TryFrom<CreateDishBody> for NewDish {
    type Error = ApiError;

    fn try_from(body: CreateDishBody) -> Result<Self, Self::Error> {
        let (Some(name), Some(description), Some(prep_time), Some(cook_time)) =
            (body.name, body.description, body.prep_time, body.cook_time)
        else {
            return Err(ApiError::missing_fields());
        };
        if name.trim().is_empty() || description.trim().is_empty() {
            return Err(ApiError::missing_fields());
        }
        check_times(Some(prep_time), Some(cook_time))?;
        check_calories(body.calories)?;

        Ok(NewDish {
            name,
            description,
            quick_prep: body.quick_prep.unwrap_or(false),
            prep_time,
            cook_time,
            image_url: body.image_url,
            steps: body.steps.unwrap_or_default(),
            calories: body.calories,
        })
    }
}

pub fn validate_update(body: &UpdateDishBody) -> Result<(), ApiError> {
    let blank = |v: &Option<String>| v.as_deref().is_some_and(|s| s.trim().is_empty());
    if blank(&body.name) || blank(&body.description) {
        return Err(ApiError::missing_fields());
    }
    check_times(body.prep_time, body.cook_time)?;
    check_calories(body.calories)
}
