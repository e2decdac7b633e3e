use async_trait::async_trait;
use lawfort_protocol::{AudioClip, AudioStream, DeviceError, Microphone};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters shared between a microphone and the streams it hands out.
#[derive(Debug, Default)]
pub struct MicrophoneStats {
    acquired: AtomicUsize,
    released: AtomicUsize,
}

impl MicrophoneStats {
    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Behavior {
    Record,
    Deny,
    FailOnFinish,
}

/// Microphone that "records" a fixed clip.
#[derive(Debug, Clone)]
pub struct ScriptedMicrophone {
    clip: AudioClip,
    behavior: Behavior,
    stats: Arc<MicrophoneStats>,
}

impl ScriptedMicrophone {
    pub fn new(clip: AudioClip) -> Self {
        Self::with_behavior(clip, Behavior::Record)
    }

    /// A microphone the user refuses access to.
    pub fn denied() -> Self {
        Self::with_behavior(AudioClip::wav(Vec::new()), Behavior::Deny)
    }

    /// Opens fine but errors when recording stops.
    pub fn failing_on_finish() -> Self {
        Self::with_behavior(AudioClip::wav(Vec::new()), Behavior::FailOnFinish)
    }

    fn with_behavior(clip: AudioClip, behavior: Behavior) -> Self {
        Self {
            clip,
            behavior,
            stats: Arc::new(MicrophoneStats::default()),
        }
    }

    pub fn stats(&self) -> Arc<MicrophoneStats> {
        self.stats.clone()
    }
}

#[async_trait]
impl Microphone for ScriptedMicrophone {
    async fn acquire(&self) -> Result<Box<dyn AudioStream>, DeviceError> {
        if self.behavior == Behavior::Deny {
            return Err(DeviceError::PermissionDenied(
                "permission dismissed".to_string(),
            ));
        }
        self.stats.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedStream {
            clip: Some(self.clip.clone()),
            fail: self.behavior == Behavior::FailOnFinish,
            released: false,
            stats: self.stats.clone(),
        }))
    }
}

struct ScriptedStream {
    clip: Option<AudioClip>,
    fail: bool,
    released: bool,
    stats: Arc<MicrophoneStats>,
}

#[async_trait]
impl AudioStream for ScriptedStream {
    async fn finish(&mut self) -> Result<AudioClip, DeviceError> {
        if self.fail {
            return Err(DeviceError::Failed("device unplugged".to_string()));
        }
        self.clip
            .take()
            .ok_or_else(|| DeviceError::Failed("recording already finished".to_string()))
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.stats.released.fetch_add(1, Ordering::SeqCst);
        }
    }
}
