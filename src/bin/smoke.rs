//! Runs one register → login → dish CRUD → logout pass against `API_BASE_URL`.

use anyhow::Context;
use dish_harness::config::HarnessConfig;
use dish_harness::harness::{
    generate_unique_dish_data, validate_dish_structure, validate_user_structure, ApiClient,
    UpdateDishRequest,
};
use dish_harness::telemetry;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init();

    let config = HarnessConfig::from_env();
    let client = ApiClient::from_config(&config).context("build api client")?;
    info!(base_url = %client.base_url(), "starting smoke run");

    let ctx = client
        .create_authenticated_context()
        .await
        .context("register and login")?;
    validate_user_structure(&ctx.user)?;

    let dish = client
        .create_dish(&generate_unique_dish_data(), &ctx.session)
        .await
        .context("create dish")?;
    validate_dish_structure(&dish)?;
    anyhow::ensure!(dish.user_id == ctx.user.id, "dish owned by another user");

    let renamed = client
        .update_dish(
            dish.id,
            &UpdateDishRequest {
                name: Some(format!("{} (renamed)", dish.name)),
                ..Default::default()
            },
            &ctx.session,
        )
        .await
        .context("update dish")?;
    anyhow::ensure!(renamed.description == dish.description, "update touched other fields");

    let listed = client.list_dishes(&ctx.session).await.context("list dishes")?;
    anyhow::ensure!(listed.iter().any(|d| d.id == dish.id), "created dish not listed");

    client
        .delete_dish(dish.id, &ctx.session)
        .await
        .context("delete dish")?;
    client.logout(&ctx.session).await.context("logout")?;

    info!(user_id = ctx.user.id, "smoke run passed");
    Ok(())
}
