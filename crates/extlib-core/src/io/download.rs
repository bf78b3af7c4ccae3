//! Archive transport.
//!
//! A plain HTTP GET whose body is exposed as a forward-only async reader, so
//! the archive can be unpacked while it downloads. No retry, no range resume.

use futures::TryStreamExt;
use reqwest::Client;
use thiserror::Error;
use tokio::io::AsyncBufRead;
use tokio_util::io::StreamReader;

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Start downloading `url` and return the response body as a reader.
///
/// Fails on transport errors and on non-success status codes.
pub async fn open_archive_stream(
    client: &Client,
    url: &str,
) -> Result<impl AsyncBufRead + Unpin + Send, DownloadError> {
    tracing::debug!(%url, "fetching archive");

    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, crate::USER_AGENT)
        .send()
        .await?
        .error_for_status()?;

    tracing::trace!(content_length = ?response.content_length(), "archive response");

    let stream = response.bytes_stream().map_err(std::io::Error::other);
    Ok(StreamReader::new(stream))
}
