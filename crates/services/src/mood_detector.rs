//! Simulated mood detection.
//!
//! No image analysis happens here: after a fixed delay one of the four moods
//! is drawn uniformly at random. The RNG is injectable so tests are
//! deterministic.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, info, warn};

use smart_learn_core::model::{BilingualText, Language, Mood};

use crate::error::{CameraError, MoodError};
use crate::platform::Camera;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodDetectorConfig {
    /// How long a detection pretends to analyse the camera image.
    pub delay: Duration,
}

impl Default for MoodDetectorConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodSource {
    Detected,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoodReading {
    pub mood: Mood,
    /// In `[0.70, 0.95)` for detections, `1.0` for manual picks.
    pub confidence: f32,
    pub source: MoodSource,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetectionState {
    Idle,
    Detecting,
    Detected(MoodReading),
}

// `generation` changes on every detect and reset; a pending detection only
// commits if it still owns the current generation.
#[derive(Debug)]
struct Tracked {
    generation: u64,
    state: DetectionState,
}

pub struct MoodDetector {
    config: MoodDetectorConfig,
    rng: Mutex<Box<dyn RngCore + Send>>,
    tracked: Mutex<Tracked>,
    camera_error: Mutex<Option<CameraError>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MoodDetector {
    /// Detector seeded from the operating system.
    #[must_use]
    pub fn new(config: MoodDetectorConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    #[must_use]
    pub fn with_rng(config: MoodDetectorConfig, rng: impl RngCore + Send + 'static) -> Self {
        Self {
            config,
            rng: Mutex::new(Box::new(rng)),
            tracked: Mutex::new(Tracked {
                generation: 0,
                state: DetectionState::Idle,
            }),
            camera_error: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn state(&self) -> DetectionState {
        lock(&self.tracked).state
    }

    #[must_use]
    pub fn detected_mood(&self) -> Option<Mood> {
        match self.state() {
            DetectionState::Detected(reading) => Some(reading.mood),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_detecting(&self) -> bool {
        matches!(self.state(), DetectionState::Detecting)
    }

    /// Run one simulated detection.
    ///
    /// A manual pick made while the detection is pending wins over the draw.
    ///
    /// # Errors
    ///
    /// Returns `MoodError::AlreadyDetecting` / `MoodError::AlreadyDetected`
    /// unless the detector is idle, and `MoodError::Cancelled` if it was reset
    /// before the delay elapsed, even when a newer detection has started since.
    pub async fn detect(&self) -> Result<MoodReading, MoodError> {
        let generation = {
            let mut tracked = lock(&self.tracked);
            match tracked.state {
                DetectionState::Idle => {}
                DetectionState::Detecting => return Err(MoodError::AlreadyDetecting),
                DetectionState::Detected(_) => return Err(MoodError::AlreadyDetected),
            }
            tracked.generation += 1;
            tracked.state = DetectionState::Detecting;
            tracked.generation
        };
        debug!(delay = ?self.config.delay, generation, "mood detection started");

        tokio::time::sleep(self.config.delay).await;

        let drawn = self.draw();
        let mut tracked = lock(&self.tracked);
        if tracked.generation != generation {
            debug!(generation, "stale mood detection dropped");
            return Err(MoodError::Cancelled);
        }
        match tracked.state {
            DetectionState::Detecting => {
                tracked.state = DetectionState::Detected(drawn);
                info!(mood = %drawn.mood, confidence = drawn.confidence, "mood detected");
                Ok(drawn)
            }
            DetectionState::Detected(manual) => {
                debug!(mood = %manual.mood, "detection superseded by manual pick");
                Ok(manual)
            }
            DetectionState::Idle => Err(MoodError::Cancelled),
        }
    }

    /// Pick a mood by hand, from any state.
    pub fn select_manually(&self, mood: Mood) -> MoodReading {
        let reading = MoodReading {
            mood,
            confidence: 1.0,
            source: MoodSource::Manual,
        };
        lock(&self.tracked).state = DetectionState::Detected(reading);
        info!(%mood, "mood selected manually");
        reading
    }

    /// Back to idle. Any pending detection will finish with `Cancelled`.
    pub fn reset(&self) {
        let mut tracked = lock(&self.tracked);
        tracked.generation += 1;
        tracked.state = DetectionState::Idle;
    }

    /// Start the preview feed. A failure is remembered for display and the
    /// manual selection path stays available.
    pub async fn start_camera(&self, camera: &dyn Camera) -> bool {
        match camera.start_preview().await {
            Ok(()) => {
                *lock(&self.camera_error) = None;
                true
            }
            Err(err) => {
                warn!(error = %err, "camera unavailable, manual mood selection only");
                *lock(&self.camera_error) = Some(err);
                false
            }
        }
    }

    pub async fn stop_camera(&self, camera: &dyn Camera) {
        camera.stop_preview().await;
    }

    #[must_use]
    pub fn camera_error(&self) -> Option<CameraError> {
        lock(&self.camera_error).clone()
    }

    /// Message to show the learner when the camera could not be opened.
    #[must_use]
    pub fn camera_message(&self, language: Language) -> Option<String> {
        self.camera_error().map(|_| {
            BilingualText::new(
                "Camera access denied. Please allow camera access to detect mood.",
                "கேமரா அணுகல் மறுக்கப்பட்டது. மனநிலையைக் கண்டறிய கேமரா அணுகலை அனுமதிக்கவும்.",
            )
            .get(language)
            .to_owned()
        })
    }

    fn draw(&self) -> MoodReading {
        let mut rng = lock(&self.rng);
        let mood = Mood::ALL[rng.random_range(0..Mood::ALL.len())];
        let confidence = 0.7 + rng.random::<f32>() * 0.25;
        MoodReading {
            mood,
            confidence,
            source: MoodSource::Detected,
        }
    }
}
