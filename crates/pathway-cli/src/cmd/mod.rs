pub mod preferences;
pub mod reset;
pub mod start;
pub mod status;

use crate::config::CliConfig;
use pathway_client::{ApiClient, ApiConfig};

pub fn api_client(config: &CliConfig) -> anyhow::Result<ApiClient> {
    config.require_token()?;
    let mut api = ApiConfig::new(&config.api_url, &config.token);
    api.timeout = config.timeout();
    Ok(ApiClient::new(api)?)
}
