//! Sink endpoint
//!
//! Appends each received message to the configured output target,
//! one line per message. Best-effort and non-transactional: a write
//! that fails partway leaves the partial bytes in place.

use http_body_util::BodyExt;
use hyper::body::{Body, Bytes};
use std::io;
use std::path::Path;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::config::{AppState, OutputTarget};

/// Handle one received message: stream the request body to the
/// output target, followed by a single newline delimiter.
///
/// The write lock serializes concurrent requests so two messages
/// cannot interleave. The file is reopened per request, so an
/// externally rotated file is picked up on the next message.
pub async fn receive<B>(body: B, state: &AppState) -> io::Result<()>
where
    B: Body<Data = Bytes> + Unpin,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    let _guard = state.write_lock.lock().await;
    write_message(&state.output, body).await
}

/// Copy `body` to the target byte for byte, then write the newline
async fn write_message<B>(target: &OutputTarget, body: B) -> io::Result<()>
where
    B: Body<Data = Bytes> + Unpin,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    match target {
        OutputTarget::Stdout => {
            let mut stdout = tokio::io::stdout();
            copy_body(body, &mut stdout).await
        }
        OutputTarget::File(path) => {
            // Scoped handle: closed on every exit path when dropped
            let mut file = open_append(path).await?;
            copy_body(body, &mut file).await
        }
    }
}

/// Open the output file in append mode, creating it with owner-only
/// permissions when absent
async fn open_append(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.append(true).create(true);
    #[cfg(unix)]
    options.mode(0o600);
    options.open(path).await
}

async fn copy_body<B, W>(mut body: B, writer: &mut W) -> io::Result<()>
where
    B: Body<Data = Bytes> + Unpin,
    B::Error: std::error::Error + Send + Sync + 'static,
    W: AsyncWrite + Unpin,
{
    while let Some(frame) = body.frame().await {
        let frame = frame.map_err(io::Error::other)?;
        // Trailer frames carry no payload bytes
        if let Ok(data) = frame.into_data() {
            writer.write_all(&data).await?;
        }
    }
    writer.write_all(b"\n").await?;
    writer.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Full;
    use std::path::PathBuf;

    fn temp_target(name: &str) -> (PathBuf, OutputTarget) {
        let path = std::env::temp_dir().join(format!(
            "diag-sink-test-{}-{name}",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        (path.clone(), OutputTarget::File(path))
    }

    #[tokio::test]
    async fn test_message_appended_with_newline() {
        let (path, target) = temp_target("single");
        write_message(&target, Full::new(Bytes::from_static(b"hello")))
            .await
            .unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"hello\n");
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_empty_message_writes_lone_newline() {
        let (path, target) = temp_target("empty");
        write_message(&target, Full::new(Bytes::new())).await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"\n");
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_sequential_messages_stay_ordered() {
        let (path, target) = temp_target("ordered");
        write_message(&target, Full::new(Bytes::from_static(b"first")))
            .await
            .unwrap();
        write_message(&target, Full::new(Bytes::from_static(b"second")))
            .await
            .unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"first\nsecond\n");
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_binary_payload_kept_verbatim() {
        let (path, target) = temp_target("binary");
        let payload = [0u8, 159, 146, 150, 255];
        write_message(&target, Full::new(Bytes::copy_from_slice(&payload)))
            .await
            .unwrap();
        let mut expected = payload.to_vec();
        expected.push(b'\n');
        assert_eq!(std::fs::read(&path).unwrap(), expected);
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_missing_directory_is_reported() {
        let target = OutputTarget::File(
            std::env::temp_dir()
                .join("diag-sink-no-such-dir")
                .join("out.log"),
        );
        let result = write_message(&target, Full::new(Bytes::from_static(b"x"))).await;
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_created_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let (path, target) = temp_target("perms");
        write_message(&target, Full::new(Bytes::from_static(b"x")))
            .await
            .unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        let _ = std::fs::remove_file(path);
    }
}
