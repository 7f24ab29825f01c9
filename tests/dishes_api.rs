mod common;

use common::TestServer;
use dish_harness::harness::{
    endpoints, expect_status_in,
    fixtures::{self, error_scenarios},
    generate_unique_dish_data, status, validate_dish_structure, validate_error_response,
    CreateDishRequest, HarnessError, SessionHandle, UpdateDishRequest,
};
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn new_user_has_no_dishes() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let client = server.client();

    let ctx = client.create_authenticated_context().await?;
    assert!(client.list_dishes(&ctx.session).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn concrete_dish_gets_defaults_and_owner() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let client = server.client();
    let ctx = client.create_authenticated_context().await?;

    let tacos = CreateDishRequest {
        name: "Tacos".into(),
        description: "...".into(),
        quick_prep: None,
        prep_time: 20,
        cook_time: 15,
        image_url: None,
        steps: None,
        calories: None,
    };
    let dish = client.create_dish(&tacos, &ctx.session).await?;

    validate_dish_structure(&dish)?;
    assert!(dish.id > 0);
    assert_eq!(dish.user_id, ctx.user.id);
    assert!(!dish.quick_prep);
    assert!(dish.steps.is_empty());
    assert_eq!(dish.calories, None);
    assert_eq!(dish.image_url, None);
    Ok(())
}

#[tokio::test]
async fn create_with_all_fields_round_trips() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let client = server.client();
    let ctx = client.create_authenticated_context().await?;

    let data = generate_unique_dish_data();
    let dish = client.create_dish(&data, &ctx.session).await?;

    validate_dish_structure(&dish)?;
    assert_eq!(dish.description, data.description);
    assert_eq!(Some(dish.quick_prep), data.quick_prep);
    assert_eq!(dish.prep_time, data.prep_time);
    assert_eq!(dish.cook_time, data.cook_time);
    assert_eq!(dish.image_url, data.image_url);
    assert_eq!(Some(dish.steps), data.steps);
    assert_eq!(dish.calories, data.calories);
    assert!(dish.created_at.is_some());
    Ok(())
}

#[tokio::test]
async fn listed_dishes_belong_to_caller() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let client = server.client();
    let ctx = client.create_authenticated_context().await?;

    let first = generate_unique_dish_data();
    let second = generate_unique_dish_data();
    client.create_dish(&first, &ctx.session).await?;
    client.create_dish(&second, &ctx.session).await?;

    let response = client.get(endpoints::DISHES, Some(&ctx.session)).await?;
    assert_eq!(response.status, StatusCode::OK);
    let raw = response.body["dishes"].as_array().expect("dishes array");
    for dish in raw {
        validate_dish_structure(dish)?;
    }

    let dishes = client.list_dishes(&ctx.session).await?;
    assert_eq!(dishes.len(), 2);
    assert!(dishes.iter().all(|d| d.user_id == ctx.user.id));
    let names: Vec<_> = dishes.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec![first.name.as_str(), second.name.as_str()]);
    Ok(())
}

#[tokio::test]
async fn unauthenticated_and_forged_sessions_are_refused() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let client = server.client();

    let response = client.get(endpoints::DISHES, None).await?;
    validate_error_response(&response, StatusCode::UNAUTHORIZED, Some("No autorizado"))?;

    let response = client
        .post(endpoints::DISHES, None, Some(&generate_unique_dish_data()))
        .await?;
    validate_error_response(&response, StatusCode::UNAUTHORIZED, Some("No autorizado"))?;

    let response = client.get(&endpoints::dish_by_id(1), None).await?;
    validate_error_response(&response, StatusCode::UNAUTHORIZED, Some("No autorizado"))?;

    let response = client.put(&endpoints::dish_by_id(1), None, &json!({})).await?;
    validate_error_response(&response, StatusCode::UNAUTHORIZED, Some("No autorizado"))?;

    let response = client.delete(&endpoints::dish_by_id(1), None).await?;
    validate_error_response(&response, StatusCode::UNAUTHORIZED, Some("No autorizado"))?;

    for cookie in [
        error_scenarios::INVALID_SESSION,
        error_scenarios::EXPIRED_SESSION,
        error_scenarios::MALFORMED_COOKIE,
    ] {
        let forged = SessionHandle::from_raw(cookie);
        let response = client.get(endpoints::DISHES, Some(&forged)).await?;
        expect_status_in(&response, status::INVALID_SESSION_PROBE)?;
    }
    Ok(())
}

#[tokio::test]
async fn create_rejects_missing_and_mistyped_fields() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let client = server.client();
    let ctx = client.create_authenticated_context().await?;

    for body in fixtures::dishes_missing_required_fields() {
        let response = client.post(endpoints::DISHES, Some(&ctx.session), Some(&body)).await?;
        validate_error_response(&response, StatusCode::BAD_REQUEST, Some("Missing fields"))?;
    }

    let response = client
        .post(
            endpoints::DISHES,
            Some(&ctx.session),
            Some(&fixtures::invalid_dish_types()),
        )
        .await?;
    expect_status_in(&response, status::INVALID_TYPES_REJECTED)?;

    let response = client
        .post(
            endpoints::DISHES,
            Some(&ctx.session),
            Some(&fixtures::invalid_dish_data()),
        )
        .await?;
    expect_status_in(&response, status::INVALID_TYPES_REJECTED)?;

    assert!(client.list_dishes(&ctx.session).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn out_of_range_values_are_rejected_with_reason() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let client = server.client();
    let ctx = client.create_authenticated_context().await?;

    let negative_times = json!({
        "name": "Test", "description": "Test", "prepTime": -5, "cookTime": -10
    });
    let response = client
        .post(endpoints::DISHES, Some(&ctx.session), Some(&negative_times))
        .await?;
    validate_error_response(&response, StatusCode::BAD_REQUEST, Some("Invalid time values"))?;

    let negative_calories = json!({
        "name": "Test", "description": "Test",
        "prepTime": 999999, "cookTime": 999999, "calories": -1000
    });
    let response = client
        .post(endpoints::DISHES, Some(&ctx.session), Some(&negative_calories))
        .await?;
    validate_error_response(&response, StatusCode::BAD_REQUEST, Some("Invalid calories"))?;

    // zero is a valid duration
    let zero_times = json!({
        "name": "Test", "description": "Test", "prepTime": 0, "cookTime": 0
    });
    let response = client
        .post(endpoints::DISHES, Some(&ctx.session), Some(&zero_times))
        .await?;
    assert_eq!(response.status, StatusCode::OK);
    let id = response.body["dish"]["id"].as_i64().expect("dish id");

    let response = client
        .put(
            &endpoints::dish_by_id(id),
            Some(&ctx.session),
            &json!({ "cookTime": -1 }),
        )
        .await?;
    validate_error_response(&response, StatusCode::BAD_REQUEST, Some("Invalid time values"))?;
    let response = client
        .put(
            &endpoints::dish_by_id(id),
            Some(&ctx.session),
            &json!({ "calories": -1 }),
        )
        .await?;
    validate_error_response(&response, StatusCode::BAD_REQUEST, Some("Invalid calories"))?;

    let unchanged = client.get_dish(id, &ctx.session).await?;
    assert_eq!(unchanged.cook_time, 0);
    assert_eq!(unchanged.calories, None);
    assert_eq!(client.list_dishes(&ctx.session).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn large_payload_is_stored_whole_or_rejected() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let client = server.client();
    let ctx = client.create_authenticated_context().await?;

    let large = CreateDishRequest {
        name: "x".repeat(1000),
        description: "y".repeat(5000),
        quick_prep: None,
        prep_time: 10,
        cook_time: 15,
        image_url: None,
        steps: Some(vec![
            "Very long step description that goes on and on and on...".into();
            100
        ]),
        calories: None,
    };
    let response = client
        .post(endpoints::DISHES, Some(&ctx.session), Some(&large))
        .await?;
    if response.status == StatusCode::OK {
        validate_dish_structure(&response.body["dish"])?;
        assert_eq!(response.body["dish"]["name"], large.name.as_str());
        assert_eq!(response.body["dish"]["description"], large.description.as_str());
        assert_eq!(response.body["dish"]["steps"].as_array().map(Vec::len), Some(100));
    } else {
        expect_status_in(
            &response,
            &[
                StatusCode::BAD_REQUEST,
                StatusCode::PAYLOAD_TOO_LARGE,
                StatusCode::UNPROCESSABLE_ENTITY,
            ],
        )?;
    }
    Ok(())
}

#[tokio::test]
async fn injection_patterns_in_dish_fields_are_inert() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let client = server.client();
    let ctx = client.create_authenticated_context().await?;

    let patterns = [
        r#"<script>alert("xss")</script>"#,
        r#""; DROP TABLE dishes; --"#,
        r#"{"$ne": null}"#,
        "../../../etc/passwd",
        r#"javascript:alert("xss")"#,
    ];
    let mut stored = 0;
    for pattern in patterns {
        let body = json!({
            "name": pattern,
            "description": pattern,
            "imageUrl": pattern,
            "prepTime": 10,
            "cookTime": 15
        });
        let response = client
            .post(endpoints::DISHES, Some(&ctx.session), Some(&body))
            .await?;
        if response.status == StatusCode::OK {
            let dish = &response.body["dish"];
            validate_dish_structure(dish)?;
            assert_eq!(dish["name"], pattern);
            assert_eq!(dish["description"], pattern);
            assert_eq!(dish["imageUrl"], pattern);
            stored += 1;
        } else {
            assert_eq!(response.status, StatusCode::BAD_REQUEST, "{}", pattern);
        }
    }

    // the store is still intact and scoped to the caller
    let dishes = client.list_dishes(&ctx.session).await?;
    assert_eq!(dishes.len(), stored);
    assert!(dishes.iter().all(|d| d.user_id == ctx.user.id));
    Ok(())
}

#[tokio::test]
async fn get_by_id_and_missing_dish() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let client = server.client();
    let ctx = client.create_authenticated_context().await?;

    let data = generate_unique_dish_data();
    let created = client.create_dish(&data, &ctx.session).await?;
    let fetched = client.get_dish(created.id, &ctx.session).await?;
    assert_eq!(fetched, created);

    let response = client
        .get(
            &endpoints::dish_by_id(error_scenarios::NONEXISTENT_DISH_ID),
            Some(&ctx.session),
        )
        .await?;
    validate_error_response(&response, StatusCode::NOT_FOUND, Some("no encontrado"))?;

    let err = client
        .get_dish(error_scenarios::NONEXISTENT_DISH_ID, &ctx.session)
        .await
        .unwrap_err();
    assert!(matches!(err, HarnessError::UnexpectedStatus { actual, .. } if actual == StatusCode::NOT_FOUND));

    // 2^53 - 1, the largest id a JSON number carries exactly
    let response = client
        .get(&endpoints::dish_by_id(9_007_199_254_740_991), Some(&ctx.session))
        .await?;
    validate_error_response(&response, StatusCode::NOT_FOUND, Some("no encontrado"))?;
    Ok(())
}

#[tokio::test]
async fn full_update_replaces_fields() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let client = server.client();
    let ctx = client.create_authenticated_context().await?;

    let created = client
        .create_dish(&fixtures::valid_dish_data(), &ctx.session)
        .await?;
    let full = fixtures::dish_update_data().full;
    let updated = client.update_dish(created.id, &full, &ctx.session).await?;

    validate_dish_structure(&updated)?;
    assert_eq!(updated.id, created.id);
    assert_eq!(Some(updated.name), full.name);
    assert_eq!(Some(updated.description), full.description);
    assert_eq!(Some(updated.quick_prep), full.quick_prep);
    assert_eq!(Some(updated.prep_time), full.prep_time);
    assert_eq!(Some(updated.cook_time), full.cook_time);
    assert_eq!(updated.image_url, full.image_url);
    assert_eq!(Some(updated.steps), full.steps);
    assert_eq!(updated.calories, full.calories);
    assert_eq!(updated.user_id, ctx.user.id);
    Ok(())
}

#[tokio::test]
async fn partial_update_keeps_untouched_fields_and_converges() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let client = server.client();
    let ctx = client.create_authenticated_context().await?;

    let original = generate_unique_dish_data();
    let created = client.create_dish(&original, &ctx.session).await?;

    let patch = UpdateDishRequest {
        name: Some("Updated Name Only".into()),
        quick_prep: Some(!original.quick_prep.unwrap_or(false)),
        ..Default::default()
    };
    let once = client.update_dish(created.id, &patch, &ctx.session).await?;
    assert_eq!(once.name, "Updated Name Only");
    assert_eq!(once.quick_prep, !created.quick_prep);
    assert_eq!(once.description, created.description);
    assert_eq!(once.prep_time, created.prep_time);
    assert_eq!(once.cook_time, created.cook_time);
    assert_eq!(once.image_url, created.image_url);
    assert_eq!(once.steps, created.steps);
    assert_eq!(once.calories, created.calories);

    let twice = client.update_dish(created.id, &patch, &ctx.session).await?;
    assert_eq!(twice, once);
    assert_eq!(client.get_dish(created.id, &ctx.session).await?, once);
    Ok(())
}

#[tokio::test]
async fn repeated_updates_keep_last_write() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let client = server.client();
    let ctx = client.create_authenticated_context().await?;

    let dish = client
        .create_dish(&generate_unique_dish_data(), &ctx.session)
        .await?;
    for i in 0..3 {
        let patch = UpdateDishRequest {
            name: Some(format!("Updated Name {}", i)),
            ..Default::default()
        };
        let updated = client.update_dish(dish.id, &patch, &ctx.session).await?;
        assert_eq!(updated.name, format!("Updated Name {}", i));
        fixtures::wait(10).await;
    }
    let last = client.get_dish(dish.id, &ctx.session).await?;
    assert_eq!(last.name, "Updated Name 2");
    assert_eq!(last.id, dish.id);
    Ok(())
}

#[tokio::test]
async fn update_and_delete_of_missing_dish_are_forbidden() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let client = server.client();
    let ctx = client.create_authenticated_context().await?;
    let path = endpoints::dish_by_id(error_scenarios::NONEXISTENT_DISH_ID);

    let response = client
        .put(&path, Some(&ctx.session), &json!({ "name": "Updated Name" }))
        .await?;
    validate_error_response(&response, StatusCode::FORBIDDEN, Some("No autorizado"))?;

    let response = client.delete(&path, Some(&ctx.session)).await?;
    validate_error_response(&response, StatusCode::FORBIDDEN, Some("No autorizado"))?;
    Ok(())
}

#[tokio::test]
async fn delete_is_final() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let client = server.client();
    let ctx = client.create_authenticated_context().await?;

    let dish = client
        .create_dish(&generate_unique_dish_data(), &ctx.session)
        .await?;
    client.delete_dish(dish.id, &ctx.session).await?;

    let response = client
        .get(&endpoints::dish_by_id(dish.id), Some(&ctx.session))
        .await?;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let again = client
        .delete(&endpoints::dish_by_id(dish.id), Some(&ctx.session))
        .await?;
    assert!(again.status.is_client_error());
    assert!(client.delete_dish(dish.id, &ctx.session).await.is_err());
    Ok(())
}

#[tokio::test]
async fn crud_cycle() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let client = server.client();
    let ctx = client.create_authenticated_context().await?;

    let created = client
        .create_dish(&generate_unique_dish_data(), &ctx.session)
        .await?;
    let read = client.get_dish(created.id, &ctx.session).await?;
    assert_eq!(read.id, created.id);

    let updates = fixtures::dish_update_data();
    let updated = client
        .update_dish(created.id, &updates.partial, &ctx.session)
        .await?;
    assert_eq!(Some(updated.name), updates.partial.name);
    let toggled = client
        .update_dish(created.id, &updates.toggle_quick_prep, &ctx.session)
        .await?;
    assert!(toggled.quick_prep);
    assert_eq!(Some(toggled.description), updates.partial.description);

    client.delete_dish(created.id, &ctx.session).await?;
    let response = client
        .get(&endpoints::dish_by_id(created.id), Some(&ctx.session))
        .await?;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn concurrent_creates_get_distinct_ids() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let client = server.client();
    let ctx = client.create_authenticated_context().await?;

    let mut tasks = tokio::task::JoinSet::new();
    for data in fixtures::multiple_dishes_data()
        .into_iter()
        .chain((0..5).map(|_| generate_unique_dish_data()))
    {
        let client = client.clone();
        let session = ctx.session.clone();
        tasks.spawn(async move { client.create_dish(&data, &session).await });
    }

    let mut ids = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let dish = joined??;
        assert!(dish.id > 0);
        assert_eq!(dish.user_id, ctx.user.id);
        ids.push(dish.id);
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 8);

    let listed = client.list_dishes(&ctx.session).await?;
    for id in &ids {
        assert!(listed.iter().any(|d| d.id == *id), "dish {} not listed", id);
    }
    Ok(())
}
