use reqwest::Client;
use std::time::Duration;

/// Endpoint URL for an upstream API path, e.g. `/data/2.5/forecast`.
pub(crate) fn join_base_path(base: &str, path: &str) -> anyhow::Result<String> {
    let base = base.trim().trim_end_matches('/');
    if base.is_empty() {
        anyhow::bail!("base_url is empty");
    }
    Ok(format!("{base}/{}", path.trim_start_matches('/')))
}

/// Shared client for every upstream call in a run.
pub(crate) fn build_http_client(timeout_secs: u64) -> anyhow::Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("travel-advisor/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}
