use std::sync::Arc;

use smart_learn_core::model::Language;
use storage::{KeyValueStore, StorageError, StorageKey};
use tracing::{debug, warn};

/// Persisted display-language preference.
#[derive(Clone)]
pub struct LanguageService {
    store: Arc<dyn KeyValueStore>,
}

impl LanguageService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stored language, or English if nothing usable is stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    pub async fn load(&self) -> Result<Language, StorageError> {
        let stored = self.store.get(StorageKey::Language).await?;
        Ok(match stored.as_deref() {
            None => Language::default(),
            Some(code) => Language::from_code(code).unwrap_or_else(|| {
                warn!(code, "unknown stored language, using English");
                Language::default()
            }),
        })
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the preference cannot be written.
    pub async fn set(&self, language: Language) -> Result<Language, StorageError> {
        self.store.set(StorageKey::Language, language.code()).await?;
        debug!(%language, "language saved");
        Ok(language)
    }

    /// Flip between English and Tamil and persist the result.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read or written.
    pub async fn toggle(&self) -> Result<Language, StorageError> {
        let current = self.load().await?;
        self.set(current.toggled()).await
    }
}
