use reqwest::StatusCode;
use serde_json::Value;
use tracing::{info, instrument};

use crate::harness::client::{endpoints, ApiClient};
use crate::harness::dto::{
    CreateDishRequest, DishEnvelope, DishRecord, DishesEnvelope, SessionHandle, UpdateDishRequest,
};
use crate::harness::error::{HarnessError, Result};

fn missing(operation: &'static str, field: &'static str) -> HarnessError {
    HarnessError::MissingField { operation, field }
}

fn check_id(operation: &'static str, expected: i64, dish: &DishRecord) -> Result<()> {
    if dish.id != expected {
        return Err(HarnessError::Mismatch {
            operation,
            field: "id",
            expected: expected.to_string(),
            actual: dish.id.to_string(),
        });
    }
    Ok(())
}

impl ApiClient {
    /// The caller's dishes, in the order the server returns them.
    #[instrument(skip(self, session))]
    pub async fn list_dishes(&self, session: &SessionHandle) -> Result<Vec<DishRecord>> {
        const OP: &str = "list dishes";
        let response = self
            .get(endpoints::DISHES, Some(session))
            .await?
            .expect_status(OP, StatusCode::OK)?;
        response
            .decode::<DishesEnvelope>("dishes list")?
            .dishes
            .ok_or_else(|| missing(OP, "dishes"))
    }

    #[instrument(skip(self, dish, session), fields(name = %dish.name))]
    pub async fn create_dish(
        &self,
        dish: &CreateDishRequest,
        session: &SessionHandle,
    ) -> Result<DishRecord> {
        const OP: &str = "create dish";
        let response = self
            .post(endpoints::DISHES, Some(session), Some(dish))
            .await?
            .expect_status(OP, StatusCode::OK)?;
        let created = response
            .decode::<DishEnvelope>("dish")?
            .dish
            .ok_or_else(|| missing(OP, "dish"))?;
        if created.name != dish.name {
            return Err(HarnessError::Mismatch {
                operation: OP,
                field: "name",
                expected: dish.name.clone(),
                actual: created.name,
            });
        }
        info!(dish_id = created.id, "dish created");
        Ok(created)
    }

    #[instrument(skip(self, session))]
    pub async fn get_dish(&self, id: i64, session: &SessionHandle) -> Result<DishRecord> {
        const OP: &str = "get dish";
        let response = self
            .get(&endpoints::dish_by_id(id), Some(session))
            .await?
            .expect_status(OP, StatusCode::OK)?;
        let dish = response
            .decode::<DishEnvelope>("dish")?
            .dish
            .ok_or_else(|| missing(OP, "dish"))?;
        check_id(OP, id, &dish)?;
        Ok(dish)
    }

    /// Sends a partial update; fields left `None` keep their stored value.
    #[instrument(skip(self, update, session))]
    pub async fn update_dish(
        &self,
        id: i64,
        update: &UpdateDishRequest,
        session: &SessionHandle,
    ) -> Result<DishRecord> {
        const OP: &str = "update dish";
        let response = self
            .put(&endpoints::dish_by_id(id), Some(session), update)
            .await?
            .expect_status(OP, StatusCode::OK)?;
        let dish = response
            .decode::<DishEnvelope>("dish")?
            .dish
            .ok_or_else(|| missing(OP, "dish"))?;
        check_id(OP, id, &dish)?;
        info!(dish_id = id, "dish updated");
        Ok(dish)
    }

    /// Deletes the dish. The body must carry `success: true`.
    #[instrument(skip(self, session))]
    pub async fn delete_dish(&self, id: i64, session: &SessionHandle) -> Result<()> {
        const OP: &str = "delete dish";
        let response = self
            .delete(&endpoints::dish_by_id(id), Some(session))
            .await?
            .expect_status(OP, StatusCode::OK)?;
        match response.body.get("success").and_then(Value::as_bool) {
            Some(true) => {
                info!(dish_id = id, "dish deleted");
                Ok(())
            }
            Some(false) => Err(HarnessError::Mismatch {
                operation: OP,
                field: "success",
                expected: "true".into(),
                actual: "false".into(),
            }),
            None => Err(missing(OP, "success")),
        }
    }
}
