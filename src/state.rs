use crate::config::AppConfig;
use crate::db::Db;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Db>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: AppConfig) -> Self {
        Self {
            db: Arc::new(Db::new()),
            config: Arc::new(config),
        }
    }

    pub fn fake() -> Self {
        Self::from_config(AppConfig::ephemeral())
    }
}
