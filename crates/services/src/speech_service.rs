use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use smart_learn_core::model::Language;
use tracing::{debug, warn};

use crate::platform::{SpeechEngine, Utterance};

/// Voice parameters applied to every utterance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeechSettings {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            rate: 0.9,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

/// Read-aloud for lesson text.
///
/// At most one utterance plays at a time: anything in flight is cancelled
/// before the next one starts.
#[derive(Clone)]
pub struct SpeechService {
    engine: Arc<dyn SpeechEngine>,
    settings: SpeechSettings,
    speaking: Arc<AtomicBool>,
}

impl SpeechService {
    #[must_use]
    pub fn new(engine: Arc<dyn SpeechEngine>, settings: SpeechSettings) -> Self {
        Self {
            engine,
            settings,
            speaking: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn is_speaking(&self) -> bool {
        self.speaking.load(Ordering::SeqCst)
    }

    /// Speak `text` in the voice for `language`. Returns whether the engine
    /// accepted it; an engine failure only clears the speaking flag.
    pub fn speak(&self, text: &str, language: Language) -> bool {
        self.engine.cancel();
        let utterance = Utterance {
            text: text.to_owned(),
            lang: language.speech_tag().to_owned(),
            rate: self.settings.rate,
            pitch: self.settings.pitch,
            volume: self.settings.volume,
        };
        match self.engine.speak(utterance) {
            Ok(()) => {
                self.speaking.store(true, Ordering::SeqCst);
                true
            }
            Err(err) => {
                warn!(error = %err, %language, "speech failed");
                self.speaking.store(false, Ordering::SeqCst);
                false
            }
        }
    }

    pub fn stop(&self) {
        if self.speaking.swap(false, Ordering::SeqCst) {
            debug!("speech cancelled");
        }
        self.engine.cancel();
    }

    /// Stop if speaking, otherwise start reading `text`.
    pub fn toggle(&self, text: &str, language: Language) -> bool {
        if self.is_speaking() {
            self.stop();
            false
        } else {
            self.speak(text, language)
        }
    }

    /// Called by the engine when an utterance ends on its own.
    pub fn finished(&self) {
        self.speaking.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpeechError;
    use crate::platform::LogSpeech;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;

    #[derive(Default)]
    struct Recording {
        spoken: Mutex<Vec<Utterance>>,
    }

    impl SpeechEngine for Recording {
        fn speak(&self, utterance: Utterance) -> Result<(), SpeechError> {
            self.spoken.lock().unwrap().push(utterance);
            Ok(())
        }

        fn cancel(&self) {}
    }

    #[derive(Default)]
    struct Counting {
        cancels: AtomicUsize,
        fail: bool,
    }

    impl SpeechEngine for Counting {
        fn speak(&self, _utterance: Utterance) -> Result<(), SpeechError> {
            if self.fail {
                Err(SpeechError::Unsupported)
            } else {
                Ok(())
            }
        }

        fn cancel(&self) {
            self.cancels.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn picks_voice_from_language() {
        let engine = Arc::new(Recording::default());
        let speech = SpeechService::new(engine.clone(), SpeechSettings::default());
        assert!(speech.speak("வணக்கம்", Language::Ta));
        assert!(speech.speak("Hello", Language::En));

        let spoken = engine.spoken.lock().unwrap().clone();
        assert_eq!(spoken.len(), 2);
        assert_eq!(spoken[0].lang, "ta-IN");
        assert_eq!(spoken[1].lang, "en-US");
        assert_eq!(spoken[1].rate, 0.9);
        assert_eq!(spoken[1].pitch, 1.0);
        assert_eq!(spoken[1].volume, 1.0);
    }

    #[test]
    fn every_speak_cancels_first() {
        let engine = Arc::new(Counting::default());
        let speech = SpeechService::new(engine.clone(), SpeechSettings::default());
        speech.speak("one", Language::En);
        speech.speak("two", Language::En);
        assert_eq!(engine.cancels.load(Ordering::SeqCst), 2);
        assert!(speech.is_speaking());
    }

    #[test]
    fn toggle_alternates_and_finished_clears() {
        let speech = SpeechService::new(Arc::new(LogSpeech::new()), SpeechSettings::default());
        assert!(speech.toggle("text", Language::En));
        assert!(speech.is_speaking());
        assert!(!speech.toggle("text", Language::En));
        assert!(!speech.is_speaking());

        speech.speak("text", Language::En);
        speech.finished();
        assert!(!speech.is_speaking());
    }

    #[test]
    fn engine_errors_clear_the_flag() {
        let engine = Arc::new(Counting {
            fail: true,
            ..Counting::default()
        });
        let speech = SpeechService::new(engine, SpeechSettings::default());
        assert!(!speech.speak("text", Language::En));
        assert!(!speech.is_speaking());
    }
}
