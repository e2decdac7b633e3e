//! Microphone seam for voice queries.

use async_trait::async_trait;

/// Recorded audio ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl AudioClip {
    /// A WAV clip named `voice.wav`.
    pub fn wav(bytes: Vec<u8>) -> Self {
        Self {
            file_name: "voice.wav".to_string(),
            content_type: "audio/wav".to_string(),
            bytes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Errors raised by an audio device.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeviceError {
    /// The user or platform refused microphone access.
    #[error("microphone access denied: {0}")]
    PermissionDenied(String),
    /// The device failed while recording.
    #[error("microphone error: {0}")]
    Failed(String),
}

/// Audio input device.
#[async_trait]
pub trait Microphone: Send + Sync {
    /// Acquire the device and start recording.
    async fn acquire(&self) -> Result<Box<dyn AudioStream>, DeviceError>;
}

/// An open recording on an acquired device.
#[async_trait]
pub trait AudioStream: Send {
    /// Stop recording and return what was captured.
    async fn finish(&mut self) -> Result<AudioClip, DeviceError>;

    /// Stop every track and give the device back. Must be idempotent.
    fn release(&mut self);
}
