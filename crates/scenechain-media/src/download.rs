//! Artifact download over HTTP.

use std::path::Path;
use tokio::fs;
use tracing::debug;

use crate::error::{MediaError, MediaResult};

/// Download a remote artifact to a local path.
///
/// Non-success responses fail without writing anything; the destination is
/// written in full only after the body has been received.
pub async fn download_file(
    client: &reqwest::Client,
    url: &str,
    dest: impl AsRef<Path>,
) -> MediaResult<()> {
    let dest = dest.as_ref();

    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(MediaError::download_failed(format!(
            "Failed to download {} ({})",
            url,
            response.status()
        )));
    }

    let bytes = response.bytes().await?;
    fs::write(dest, &bytes).await?;

    debug!(url = %url, dest = %dest.display(), size = bytes.len(), "Artifact downloaded");
    Ok(())
}
