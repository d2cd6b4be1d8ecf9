//! Shared HTTP plumbing.

use std::time::Duration;

use ureq::Agent;
use ureq::http::Response;

use crate::error::CoverError;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Agent with a global timeout that leaves status handling to the caller.
pub(crate) fn agent() -> Agent {
    Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
        .http_status_as_error(false)
        .build()
        .into()
}

/// Turn an error status into [`CoverError::HttpResponse`], keeping the body for details.
pub(crate) fn success_body(response: Response<ureq::Body>) -> Result<ureq::Body, CoverError> {
    let status = response.status().as_u16();
    let mut body = response.into_body();

    if status >= 400 {
        let error_body = body
            .read_to_string()
            .unwrap_or_else(|_| "(unable to read error body)".to_owned());
        return Err(CoverError::HttpResponse {
            status,
            body: error_body,
        });
    }

    Ok(body)
}
