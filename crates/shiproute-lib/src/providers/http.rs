use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};

use crate::error::{Error, Result};

pub(crate) fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent())
        .build()
        .map_err(Error::Http)
}

fn user_agent() -> String {
    format!(
        "shiproute-lib/{version} ({repo})",
        version = env!("CARGO_PKG_VERSION"),
        repo = "https://github.com/scetrov/shiproute-rs"
    )
}

/// Send `request` and return the body of a successful response.
///
/// Transport errors, timeouts and non-success statuses all become
/// [`Error::ProviderUnavailable`] for `provider`.
pub(crate) fn fetch_body(request: RequestBuilder, provider: &'static str) -> Result<String> {
    let response = request
        .send()
        .map_err(|err| Error::provider(provider, err))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::provider(
            provider,
            format!("unexpected HTTP status {status}"),
        ));
    }

    response.text().map_err(|err| Error::provider(provider, err))
}
