//! Best-effort reachability probe.

use std::time::Duration;

use ureq::Agent;

/// Timeout for [`ping`].
pub const PING_TIMEOUT: Duration = Duration::from_secs(3);

/// Whether `url` answers a `HEAD` request.
///
/// Redirects are not followed: a redirecting site is up. Any failure
/// (invalid URL, DNS, connection, timeout, 4xx/5xx status) yields `false`.
/// Blocks the calling thread for at most [`PING_TIMEOUT`].
pub fn ping(url: &str) -> bool {
    let agent: Agent = Agent::config_builder()
        .timeout_global(Some(PING_TIMEOUT))
        .max_redirects(0)
        .build()
        .into();

    match agent.head(url).call() {
        Ok(response) => {
            tracing::debug!(url, status = response.status().as_u16(), "Ping succeeded");
            true
        }
        Err(e) => {
            tracing::debug!(url, error = %e, "Ping failed");
            false
        }
    }
}
