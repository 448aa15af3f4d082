//! Blocking HTTP GET over libcurl.
//!
//! One request per call, no connection reuse, no retry. Both remote
//! endpoints (index pages and photo bodies) go through [`get`].

use anyhow::{Context, Result};
use std::time::Duration;

/// Connection timeout applied to every request.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
/// Whole-transfer timeout. Generous: some species photos are large and the
/// origin can be slow, but a stalled socket must not hang the run forever.
const TRANSFER_TIMEOUT: Duration = Duration::from_secs(300);

/// Fetches `url` with a single GET and returns the full response body.
///
/// Redirects are followed. The response status is logged but not enforced:
/// the origin answers missing species files with an HTML error page, and the
/// caller persists whatever body arrives (the normalize stage rejects
/// non-images per file later).
pub fn get(url: &str, user_agent: &str) -> Result<Vec<u8>> {
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.useragent(user_agent)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(CONNECT_TIMEOUT)?;
    easy.timeout(TRANSFER_TIMEOUT)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer
            .perform()
            .with_context(|| format!("GET {url} failed"))?;
    }

    let code = easy.response_code().context("no response code")?;
    tracing::debug!(url, code, bytes = body.len(), "GET complete");

    Ok(body)
}
