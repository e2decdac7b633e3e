//! Microphone backed by an audio file on disk.
//!
//! A terminal has no capture device, so `/voice <path>` "records" a
//! pre-recorded clip. Access problems map onto the same errors a real
//! device would raise.

use async_trait::async_trait;
use lawfort_protocol::{AudioClip, AudioStream, DeviceError, Microphone};
use log::debug;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileMicrophone {
    path: PathBuf,
}

impl FileMicrophone {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Microphone for FileMicrophone {
    async fn acquire(&self) -> Result<Box<dyn AudioStream>, DeviceError> {
        let metadata = tokio::fs::metadata(&self.path)
            .await
            .map_err(|err| device_error(&self.path, err))?;
        if !metadata.is_file() {
            return Err(DeviceError::Failed(format!(
                "{} is not a file",
                self.path.display()
            )));
        }
        debug!("audio source opened (path={})", self.path.display());
        Ok(Box::new(FileStream {
            path: self.path.clone(),
            open: true,
        }))
    }
}

struct FileStream {
    path: PathBuf,
    open: bool,
}

#[async_trait]
impl AudioStream for FileStream {
    async fn finish(&mut self) -> Result<AudioClip, DeviceError> {
        if !self.open {
            return Err(DeviceError::Failed("recording already finished".to_string()));
        }
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|err| device_error(&self.path, err))?;
        let file_name = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("voice.wav")
            .to_string();
        Ok(AudioClip {
            content_type: content_type_for(&self.path).to_string(),
            file_name,
            bytes,
        })
    }

    fn release(&mut self) {
        if self.open {
            self.open = false;
            debug!("audio source released (path={})", self.path.display());
        }
    }
}

fn device_error(path: &Path, err: io::Error) -> DeviceError {
    match err.kind() {
        io::ErrorKind::PermissionDenied => DeviceError::PermissionDenied(path.display().to_string()),
        _ => DeviceError::Failed(format!("{}: {err}", path.display())),
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("ogg") | Some("oga") => "audio/ogg",
        Some("webm") => "audio/webm",
        Some("m4a") => "audio/mp4",
        _ => "audio/wav",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[tokio::test]
    async fn records_file_contents() {
        let temp = TempDir::new().expect("tmp");
        let path = temp.path().join("question.ogg");
        std::fs::write(&path, [1u8, 2, 3]).expect("write");

        let microphone = FileMicrophone::new(&path);
        let mut stream = microphone.acquire().await.expect("acquire");
        let clip = stream.finish().await.expect("finish");
        stream.release();

        assert_eq!(clip.file_name, "question.ogg");
        assert_eq!(clip.content_type, "audio/ogg");
        assert_eq!(clip.bytes, vec![1, 2, 3]);
        assert!(stream.finish().await.is_err());
    }

    #[tokio::test]
    async fn missing_file_fails_to_acquire() {
        let temp = TempDir::new().expect("tmp");
        let microphone = FileMicrophone::new(temp.path().join("absent.wav"));

        let err = microphone.acquire().await.err().expect("error");

        assert!(matches!(err, DeviceError::Failed(_)));
    }

    #[tokio::test]
    async fn directory_is_not_a_clip() {
        let temp = TempDir::new().expect("tmp");
        let microphone = FileMicrophone::new(temp.path());

        assert!(microphone.acquire().await.is_err());
    }
}
