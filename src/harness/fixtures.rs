//! Test input data: generated unique fixtures plus a few canned payloads.

use rand::Rng;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::harness::dto::{CreateDishRequest, RegisterUserRequest, UpdateDishRequest};

pub const FIXTURE_PASSWORD: &str = "Test1234!";
pub const FIXTURE_NATIONALITY: &str = "México";
pub const EMAIL_DOMAIN: &str = "example.com";
const PHONE_PREFIX: &str = "+52155";

/// First `len` hex chars of a v4 UUID.
fn unique_token(len: usize) -> String {
    let mut token = Uuid::new_v4().simple().to_string();
    token.truncate(len);
    token
}

/// Registration data with an email no other call in this process will get.
pub fn generate_unique_user_data() -> RegisterUserRequest {
    let token = unique_token(8);
    let suffix: u32 = rand::thread_rng().gen_range(0..10_000_000);
    RegisterUserRequest {
        first_name: "Test".into(),
        last_name: format!("User{}", token),
        email: format!("test.user.{}@{}", token, EMAIL_DOMAIN),
        nationality: FIXTURE_NATIONALITY.into(),
        phone: format!("{}{:07}", PHONE_PREFIX, suffix),
        password: FIXTURE_PASSWORD.into(),
    }
}

pub fn generate_unique_dish_data() -> CreateDishRequest {
    let token = unique_token(6);
    let mut rng = rand::thread_rng();
    CreateDishRequest {
        name: format!("Test Dish {}", token),
        description: format!("Test dish description {}", token),
        quick_prep: Some(rng.gen_bool(0.5)),
        prep_time: rng.gen_range(5..=35),
        cook_time: rng.gen_range(10..=70),
        image_url: Some(format!("https://{}/image-{}.jpg", EMAIL_DOMAIN, token)),
        steps: Some(vec![
            format!("Step 1: Prepare the ingredients for {}", token),
            "Step 2: Cook following the instructions".into(),
            "Step 3: Serve and enjoy".into(),
        ]),
        calories: Some(rng.gen_range(100..=600)),
    }
}

/// Fixed user fields around a caller-chosen email.
pub fn valid_user_data(email: &str) -> RegisterUserRequest {
    RegisterUserRequest {
        first_name: "Juan".into(),
        last_name: "Pérez".into(),
        email: email.into(),
        nationality: FIXTURE_NATIONALITY.into(),
        phone: "+521234567890".into(),
        password: FIXTURE_PASSWORD.into(),
    }
}

/// A dish with every optional field set.
pub fn valid_dish_data() -> CreateDishRequest {
    CreateDishRequest {
        name: "Fish Tacos".into(),
        description: "Fresh fish tacos with avocado".into(),
        quick_prep: Some(false),
        prep_time: 20,
        cook_time: 15,
        image_url: Some("https://example.com/fish-tacos.jpg".into()),
        steps: Some(vec![
            "Marinate the fish with lime and spices".into(),
            "Warm the tortillas".into(),
            "Grill the fish".into(),
            "Serve with avocado and salsa".into(),
        ]),
        calories: Some(320),
    }
}

/// Only the required dish fields.
pub fn minimal_dish_data(name: &str) -> CreateDishRequest {
    CreateDishRequest {
        name: name.into(),
        description: "Basic description".into(),
        quick_prep: None,
        prep_time: 10,
        cook_time: 15,
        image_url: None,
        steps: None,
        calories: None,
    }
}

pub fn multiple_dishes_data() -> Vec<CreateDishRequest> {
    vec![
        CreateDishRequest {
            name: "Caesar Salad".into(),
            description: "Classic salad with chicken and caesar dressing".into(),
            quick_prep: Some(true),
            prep_time: 10,
            cook_time: 5,
            image_url: None,
            steps: Some(vec![
                "Wash the lettuce".into(),
                "Cook the chicken".into(),
                "Toss everything".into(),
            ]),
            calories: Some(280),
        },
        CreateDishRequest {
            name: "Pasta Carbonara".into(),
            description: "Italian pasta with egg, cheese and pancetta".into(),
            quick_prep: Some(false),
            prep_time: 15,
            cook_time: 20,
            image_url: Some("https://example.com/carbonara.jpg".into()),
            steps: Some(vec![
                "Boil water for the pasta".into(),
                "Cook the pancetta".into(),
                "Mix egg with cheese".into(),
                "Combine everything".into(),
            ]),
            calories: Some(520),
        },
        CreateDishRequest {
            name: "Green Smoothie".into(),
            description: "Healthy shake with spinach and fruit".into(),
            quick_prep: Some(true),
            prep_time: 5,
            cook_time: 0,
            image_url: None,
            steps: Some(vec![
                "Wash the spinach".into(),
                "Peel the fruit".into(),
                "Blend everything".into(),
            ]),
            calories: Some(150),
        },
    ]
}

/// Registration body with blank fields, a malformed email and a weak password.
pub fn invalid_user_data() -> Value {
    json!({
        "firstName": "",
        "lastName": "Test",
        "email": "invalid-email",
        "nationality": "",
        "phone": "123",
        "password": "123"
    })
}

/// Dish body with blank, negative and wrongly typed fields.
pub fn invalid_dish_data() -> Value {
    json!({
        "name": "",
        "description": "",
        "prepTime": -1,
        "cookTime": 0,
        "steps": "not-an-array"
    })
}

/// Dish body where every field has the wrong JSON type.
pub fn invalid_dish_types() -> Value {
    json!({
        "name": 123,
        "description": true,
        "prepTime": "ten",
        "cookTime": "five",
        "quickPrep": "yes",
        "steps": "not an array"
    })
}

/// Dish bodies each missing one or more required fields.
pub fn dishes_missing_required_fields() -> Vec<Value> {
    vec![
        json!({ "description": "Missing name", "prepTime": 10, "cookTime": 15 }),
        json!({ "name": "Missing description", "prepTime": 10, "cookTime": 15 }),
        json!({ "name": "Missing prep time", "description": "Test desc", "cookTime": 15 }),
        json!({ "name": "Missing cook time", "description": "Test desc", "prepTime": 10 }),
        json!({}),
    ]
}

/// Canned partial and full updates.
pub struct DishUpdates {
    pub partial: UpdateDishRequest,
    pub full: UpdateDishRequest,
    pub toggle_quick_prep: UpdateDishRequest,
}

pub fn dish_update_data() -> DishUpdates {
    DishUpdates {
        partial: UpdateDishRequest {
            name: Some("Updated Name".into()),
            description: Some("Updated description".into()),
            ..Default::default()
        },
        full: UpdateDishRequest {
            name: Some("Fully Updated Dish".into()),
            description: Some("Brand new description".into()),
            quick_prep: Some(true),
            prep_time: Some(25),
            cook_time: Some(30),
            image_url: Some("https://example.com/updated-dish.jpg".into()),
            steps: Some(vec![
                "New step 1".into(),
                "New step 2".into(),
                "New step 3".into(),
            ]),
            calories: Some(400),
        },
        toggle_quick_prep: UpdateDishRequest {
            quick_prep: Some(true),
            ..Default::default()
        },
    }
}

/// Cookies and credentials for negative probes.
pub mod error_scenarios {
    pub const EXPIRED_SESSION: &str = "session=expired_session_token";
    pub const INVALID_SESSION: &str = "session=invalid_session_token";
    pub const MALFORMED_COOKIE: &str = "invalid_cookie_format";
    pub const UNKNOWN_EMAIL: &str = "nonexistent@example.com";
    pub const WRONG_PASSWORD: &str = "wrongpassword";
    pub const NONEXISTENT_DISH_ID: i64 = 999_999;

    pub const SQL_INJECTION_EMAILS: &[&str] = &[
        "admin@example.com'; DROP TABLE users; --",
        "' OR '1'='1' --",
        "admin@example.com' UNION SELECT * FROM users --",
    ];
}

/// Pause between calls, for backends that rate limit.
pub async fn wait(milliseconds: u64) {
    tokio::time::sleep(std::time::Duration::from_millis(milliseconds)).await;
}
