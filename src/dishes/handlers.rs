use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{dto::SuccessResponse, extractors::AuthUser},
    dishes::{
        dto::{CreateDishBody, DishResponse, DishesListResponse, UpdateDishBody},
        extractors::DishId,
        repo_types::Dish,
        services::{validate_update, NewDish},
    },
    error::{parse_body, ApiError},
    state::AppState,
};

pub fn dish_routes() -> Router<AppState> {
    Router::new()
        .route("/dishes", get(list_dishes).post(create_dish))
        .route(
            "/dishes/:id",
            get(get_dish).put(update_dish).delete(delete_dish),
        )
}

fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Platillo no encontrado")
}

fn forbidden() -> ApiError {
    ApiError::new(
        StatusCode::FORBIDDEN,
        "No autorizado para modificar este platillo",
    )
}

#[instrument(skip(state, auth), fields(user_id = auth.user_id))]
pub async fn list_dishes(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Json<DishesListResponse> {
    let dishes = Dish::list_by_user(&state.db, auth.user_id).await;
    Json(DishesListResponse { dishes })
}

#[instrument(skip(state, auth, payload), fields(user_id = auth.user_id))]
pub async fn create_dish(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<DishResponse>, ApiError> {
    let new = NewDish::try_from(parse_body::<CreateDishBody>(payload)?).map_err(|e| {
        warn!(reason = %e.message, "dish rejected");
        e
    })?;
    let dish = Dish::create(&state.db, auth.user_id, new).await;
    info!(dish_id = dish.id, "dish created");
    Ok(Json(DishResponse { dish }))
}

#[instrument(skip(state, auth), fields(user_id = auth.user_id))]
pub async fn get_dish(
    State(state): State<AppState>,
    auth: AuthUser,
    DishId(id): DishId,
) -> Result<Json<DishResponse>, ApiError> {
    let dish = Dish::find_for_user(&state.db, auth.user_id, id)
        .await
        .ok_or_else(not_found)?;
    Ok(Json(DishResponse { dish }))
}

#[instrument(skip(state, auth, payload), fields(user_id = auth.user_id))]
pub async fn update_dish(
    State(state): State<AppState>,
    auth: AuthUser,
    DishId(id): DishId,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<DishResponse>, ApiError> {
    let patch = parse_body::<UpdateDishBody>(payload)?;
    validate_update(&patch)?;
    let dish = Dish::update_owned(&state.db, auth.user_id, id, patch)
        .await
        .ok_or_else(|| {
            warn!(dish_id = id, "update of foreign or missing dish");
            forbidden()
        })?;
    info!(dish_id = id, "dish updated");
    Ok(Json(DishResponse { dish }))
}

#[instrument(skip(state, auth), fields(user_id = auth.user_id))]
pub async fn delete_dish(
    State(state): State<AppState>,
    auth: AuthUser,
    DishId(id): DishId,
) -> Result<Json<SuccessResponse>, ApiError> {
    if !Dish::delete_owned(&state.db, auth.user_id, id).await {
        warn!(dish_id = id, "delete of foreign or missing dish");
        return Err(forbidden());
    }
    info!(dish_id = id, "dish deleted");
    Ok(Json(SuccessResponse { success: true }))
}
