//! Backend Config

use clap::Args;

/// Store backend settings.
#[derive(Debug, Args)]
pub struct BackendConfig {
    /// Store backend base URL, e.g. `https://shop.example/api`
    #[arg(long, env = "EMISSION_API_URL")]
    pub api_url: String,

    /// Bearer token for the store backend
    #[arg(long, env = "EMISSION_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,
}
