//! Device capabilities the app talks to: camera preview and speech output.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::{CameraError, SpeechError};

/// Live camera feed used for the on-screen preview only.
#[async_trait]
pub trait Camera: Send + Sync {
    /// Request the front camera.
    ///
    /// # Errors
    ///
    /// Returns `CameraError` if access is denied or no camera exists.
    async fn start_preview(&self) -> Result<(), CameraError>;

    /// Release the camera. Stopping an idle camera is a no-op.
    async fn stop_preview(&self);
}

/// A camera that is never there, for headless front ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCamera;

#[async_trait]
impl Camera for NoCamera {
    async fn start_preview(&self) -> Result<(), CameraError> {
        Err(CameraError::Unavailable)
    }

    async fn stop_preview(&self) {}
}

/// A single request to the speech engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// BCP-47 language tag, e.g. `ta-IN`.
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

/// Platform text-to-speech.
pub trait SpeechEngine: Send + Sync {
    /// Start speaking. Returns once the utterance is queued.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if the engine rejects the utterance.
    fn speak(&self, utterance: Utterance) -> Result<(), SpeechError>;

    /// Stop any utterance in progress.
    fn cancel(&self);
}

/// Speech engine that writes utterances to the log instead of a speaker.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSpeech;

impl LogSpeech {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SpeechEngine for LogSpeech {
    fn speak(&self, utterance: Utterance) -> Result<(), SpeechError> {
        info!(
            lang = %utterance.lang,
            rate = utterance.rate,
            text = %utterance.text,
            "speak"
        );
        Ok(())
    }

    fn cancel(&self) {
        debug!("speech cancelled");
    }
}
