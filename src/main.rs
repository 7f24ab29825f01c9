use dish_harness::{app, state::AppState, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init();

    let state = AppState::init()?;
    let listener = app::bind(&state).await?;
    app::serve(listener, app::build_app(state)).await
}
