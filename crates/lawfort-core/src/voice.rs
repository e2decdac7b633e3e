//! Push-to-talk capture for voice questions.

use crate::conversation::ConversationStore;
use crate::error::LawfortError;
use lawfort_protocol::{AudioStream, Microphone};
use log::{debug, info, warn};

/// Owns an open stream and releases it when dropped.
struct StreamGuard {
    stream: Box<dyn AudioStream>,
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        self.stream.release();
    }
}

/// Records from `M` and hands finished clips to the conversation.
pub struct VoiceCapture<M: Microphone> {
    microphone: M,
    active: Option<StreamGuard>,
}

impl<M: Microphone> VoiceCapture<M> {
    pub fn new(microphone: M) -> Self {
        Self {
            microphone,
            active: None,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.active.is_some()
    }

    /// Acquire the microphone and begin recording.
    ///
    /// A refused device yields `LawfortError::Permission`; nothing is added to
    /// the conversation in that case. Starting twice is a no-op.
    pub async fn start(&mut self) -> Result<(), LawfortError> {
        if self.is_recording() {
            debug!("recording already in progress");
            return Ok(());
        }
        let stream = self.microphone.acquire().await.map_err(|err| {
            warn!("microphone unavailable: {err}");
            LawfortError::from(err)
        })?;
        info!("recording started");
        self.active = Some(StreamGuard { stream });
        Ok(())
    }

    /// Stop recording, release the device, and send the clip.
    ///
    /// Returns false when nothing was being recorded. Upload failures are
    /// reported in the conversation, not here.
    pub async fn stop_and_send(&mut self, store: &ConversationStore) -> Result<bool, LawfortError> {
        let Some(mut guard) = self.active.take() else {
            return Ok(false);
        };
        let clip = guard.stream.finish().await;
        drop(guard);
        let clip = clip.map_err(|err| {
            warn!("recording failed: {err}");
            LawfortError::from(err)
        })?;
        info!("recording stopped (bytes={})", clip.bytes.len());
        store.send_voice_query(clip).await;
        Ok(true)
    }

    /// Abandon the current recording without sending it.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self.active.take().is_some();
        if cancelled {
            info!("recording cancelled");
        }
        cancelled
    }
}
