//! Helpers for driving the dish API from tests: fixture generation, the
//! register/login/logout lifecycle, dish CRUD with response checks, and
//! structural validators.

pub mod client;
pub mod dishes;
pub mod dto;
pub mod error;
pub mod fixtures;
pub mod session;
pub mod status;
pub mod validate;

pub use client::{endpoints, ApiClient, ApiResponse, ResponseCookie};
pub use dto::{
    CreateDishRequest, DishRecord, LoginRequest, RegisterUserRequest, SessionHandle,
    TestUserContext, UpdateDishRequest, UserRecord,
};
pub use error::{HarnessError, Result};
pub use fixtures::{generate_unique_dish_data, generate_unique_user_data};
pub use session::{extract_session, LoginOutcome};
pub use status::expect_status_in;
pub use validate::{validate_dish_structure, validate_error_response, validate_user_structure};
