//! Archive installer.
//!
//! Reads a gzip-compressed tar stream once, front to back, and routes each
//! entry into the install layout according to its [`EntryKind`]:
//!
//! | kind | destination | transform |
//! |---|---|---|
//! | shared object, static lib | `prefix/lib_dir` | copy |
//! | header | `prefix/include_dir` | copy |
//! | pkg-config template | `prefix/lib_dir/pkgconfig` | [`rewrite_line`] (skipped on windows) |
//! | other | - | ignored |

use std::borrow::Cow;
use std::io;
use std::path::{Path, PathBuf};

use async_compression::tokio::bufread::GzipDecoder;
use extlib_schema::{EntryKind, InstallLayout, PlatformTriplet};
use futures::StreamExt;
use thiserror::Error;
use tokio::fs::{self, File};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio_tar::Archive;

use crate::Reporter;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to create {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
}

/// Unpack a `.tar.gz` stream into `layout` for `target`.
///
/// Entries are handled strictly in archive order. Each output file is closed
/// before the next entry is read. Returns the paths written.
pub async fn unpack_archive<R>(
    reader: R,
    layout: &InstallLayout,
    target: &PlatformTriplet,
    reporter: &dyn Reporter,
) -> Result<Vec<PathBuf>, ExtractError>
where
    R: AsyncBufRead + Unpin + Send,
{
    reporter.debug("Creating gzip reader");
    let decoder = GzipDecoder::new(reader);

    reporter.debug("Reading tar file");
    let mut archive = Archive::new(decoder);
    let mut entries = archive.entries()?;
    let mut written = Vec::new();

    while let Some(entry) = entries.next().await {
        let mut entry = entry?;
        if entry.header().entry_type().is_dir() {
            continue;
        }

        let raw = entry.path()?.to_string_lossy().trim().to_string();
        let Some(name) = Path::new(&raw).file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let name = name.to_string();

        let kind = EntryKind::classify(&name, target);
        let dest_dir = match kind {
            EntryKind::SharedObject => {
                reporter.debug("Found shared object file in tarball");
                layout.lib_path()
            }
            EntryKind::StaticLib => {
                reporter.debug("Found static library in tarball");
                layout.lib_path()
            }
            EntryKind::Header => {
                reporter.debug("Found header file in tarball");
                layout.include_path()
            }
            EntryKind::PkgConfigTemplate if target.is_windows() => {
                reporter.debug(&format!("Skipping pkg-config file on windows: {name}"));
                continue;
            }
            EntryKind::PkgConfigTemplate => {
                reporter.debug("Found pkg-config file");
                layout.pkgconfig_path()
            }
            EntryKind::Other => {
                reporter.debug(&format!("File: {name}"));
                continue;
            }
        };

        reporter.debug(&format!("Creating directory: {}", dest_dir.display()));
        fs::create_dir_all(&dest_dir)
            .await
            .map_err(|source| ExtractError::CreateDir {
                path: dest_dir.clone(),
                source,
            })?;

        let dest = dest_dir.join(kind.installed_name(&name));
        reporter.info(&format!("Copying {name} to {}", dest.display()));

        let mut out = File::create(&dest).await?;
        if kind == EntryKind::PkgConfigTemplate {
            let prefix = layout.prefix().display().to_string();
            rewrite_pkgconfig(&mut entry, &mut out, &prefix, target.is_darwin()).await?;
        } else {
            tokio::io::copy(&mut entry, &mut out).await?;
        }
        out.flush().await?;
        drop(out);

        tracing::debug!(entry = %name, dest = %dest.display(), ?kind, "installed");
        written.push(dest);
    }

    Ok(written)
}

/// Copy a pkg-config template line by line, applying [`rewrite_line`].
pub async fn rewrite_pkgconfig<R, W>(
    reader: R,
    writer: &mut W,
    prefix: &str,
    darwin: bool,
) -> io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            break;
        }
        writer.write_all(&rewrite_line(&line, prefix, darwin)).await?;
    }

    Ok(())
}

const LIBS_KEY: &[u8] = b"Libs: ";
const SECURITY_FRAMEWORK: &[u8] = b"-framework Security ";

/// Rewrite one template line.
///
/// `prefix=...` is rebound to the install prefix. On darwin, `Libs:` lines get
/// `-framework Security` injected. Anything else is returned untouched. The
/// line's trailing newline, if any, is kept.
pub fn rewrite_line<'a>(line: &'a [u8], prefix: &str, darwin: bool) -> Cow<'a, [u8]> {
    if line.starts_with(b"prefix=") {
        let newline = if line.ends_with(b"\n") { "\n" } else { "" };
        return Cow::Owned(format!("prefix={prefix}{newline}").into_bytes());
    }

    if darwin && line.starts_with(b"Libs:") {
        let Some(at) = line.windows(LIBS_KEY.len()).position(|w| w == LIBS_KEY) else {
            return Cow::Borrowed(line);
        };
        let split = at + LIBS_KEY.len();
        let mut out = Vec::with_capacity(line.len() + SECURITY_FRAMEWORK.len());
        out.extend_from_slice(&line[..split]);
        out.extend_from_slice(SECURITY_FRAMEWORK);
        out.extend_from_slice(&line[split..]);
        return Cow::Owned(out);
    }

    Cow::Borrowed(line)
}
