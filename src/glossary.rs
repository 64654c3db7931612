/*!
 * User-maintained glossary of known phrase translations.
 *
 * The glossary is consulted before any provider call. It supports exact
 * lookup of a whole input phrase and whole-word substitution of known
 * phrases inside longer text, both case-insensitive. Every mutation is
 * persisted immediately as a flat, human-editable JSON mapping.
 */

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, warn};
use parking_lot::RwLock;
use regex::{NoExpand, Regex};

use crate::errors::PersistenceError;
use crate::file_utils::FileManager;

/// Phrase translations seeded on first run, matching the entries the
/// application has always shipped with.
const DEFAULT_ENTRIES: &[(&str, &str)] = &[
    ("hello", "oraire gye"),
    ("good morning", "oraire gye"),
    ("thank you", "webare"),
    ("welcome", "twakwakiira"),
    ("how are you", "ori ota"),
];

/// Persistent phrase-to-translation store with case-insensitive lookup
pub struct GlossaryStore {
    /// Known phrases, keyed by normalized (trimmed, lower-cased) source phrase
    entries: Arc<RwLock<HashMap<String, String>>>,

    /// Backing file; rewritten in full on every mutation
    path: PathBuf,
}

/// Store operations - some methods are API surface for library consumers
#[allow(dead_code)]
impl GlossaryStore {
    /// Load the glossary from a file.
    ///
    /// A missing file seeds the default phrase set and persists it. A
    /// corrupt or unreadable file falls back to an empty mapping; this
    /// never fails to the caller.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();

        let entries = if FileManager::file_exists(&path) {
            match FileManager::read_to_string(&path) {
                Ok(content) => match serde_json::from_str::<HashMap<String, String>>(&content) {
                    Ok(map) => map,
                    Err(e) => {
                        warn!("Glossary file '{}' is malformed ({}), starting empty.", path.display(), e);
                        HashMap::new()
                    }
                },
                Err(e) => {
                    warn!("Could not read glossary file '{}' ({}), starting empty.", path.display(), e);
                    HashMap::new()
                }
            }
        } else {
            let seeded: HashMap<String, String> = DEFAULT_ENTRIES
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();

            let store = Self {
                entries: Arc::new(RwLock::new(seeded)),
                path: path.clone(),
            };
            if let Err(e) = store.persist() {
                warn!("Could not write seeded glossary: {}", e);
            }
            return store;
        };

        debug!("Loaded {} glossary entries from '{}'", entries.len(), path.display());

        Self {
            entries: Arc::new(RwLock::new(entries)),
            path,
        }
    }

    /// Create an empty, unseeded store backed by the given file.
    /// Used when the caller wants full control over the contents.
    pub fn empty<P: AsRef<Path>>(path: P) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Check the text against the glossary.
    ///
    /// If the normalized text exactly equals a known phrase, that phrase's
    /// translation is returned verbatim and no substitution is attempted.
    /// Otherwise every known phrase is substituted into the text as a
    /// case-insensitive whole word; phrases are applied in unspecified
    /// order and overlapping matches are not special-cased.
    ///
    /// A return value equal to the input means the glossary had nothing
    /// to say; callers detect a hit by comparing output to input.
    pub fn check(&self, text: &str) -> String {
        let normalized = normalize(text);
        let entries = self.entries.read();

        if let Some(translation) = entries.get(&normalized) {
            debug!("Glossary exact match for '{}'", normalized);
            return translation.clone();
        }

        let mut result = text.to_string();
        for (phrase, translation) in entries.iter() {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(phrase));
            match Regex::new(&pattern) {
                Ok(re) => {
                    // NoExpand: translations are literal text, not templates
                    result = re.replace_all(&result, NoExpand(translation)).into_owned();
                }
                Err(e) => {
                    warn!("Skipping unusable glossary phrase '{}': {}", phrase, e);
                }
            }
        }

        result
    }

    /// Add or replace a phrase translation and persist the store.
    /// A no-op when either field is empty after trimming.
    pub fn add(&self, english: &str, translation: &str) -> Result<(), PersistenceError> {
        let key = normalize(english);
        let value = translation.trim();

        if key.is_empty() || value.is_empty() {
            return Ok(());
        }

        {
            let mut entries = self.entries.write();
            entries.insert(key.clone(), value.to_string());
        }
        debug!("Glossary entry added: '{}'", key);

        self.persist()
    }

    /// Remove a phrase and persist the store.
    /// Returns whether the phrase was present.
    pub fn remove(&self, english: &str) -> Result<bool, PersistenceError> {
        let key = normalize(english);

        let removed = {
            let mut entries = self.entries.write();
            entries.remove(&key).is_some()
        };

        if removed {
            debug!("Glossary entry removed: '{}'", key);
            self.persist()?;
        }

        Ok(removed)
    }

    /// All entries sorted by phrase, for display
    pub fn entries(&self) -> Vec<(String, String)> {
        let entries = self.entries.read();
        let mut list: Vec<(String, String)> =
            entries.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        list.sort_by(|a, b| a.0.cmp(&b.0));
        list
    }

    /// Get the translation for an exact phrase, if known
    pub fn get(&self, english: &str) -> Option<String> {
        self.entries.read().get(&normalize(english)).cloned()
    }

    /// Number of known phrases
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the glossary has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the backing file from the in-memory mapping.
    ///
    /// The file is a flat JSON object with sorted keys so that hand edits
    /// and diffs stay readable. Failures surface as `PersistenceError`;
    /// the in-memory mapping is untouched either way.
    fn persist(&self) -> Result<(), PersistenceError> {
        let snapshot: BTreeMap<String, String> = {
            let entries = self.entries.read();
            entries.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
        };

        let content = serde_json::to_string_pretty(&snapshot).map_err(|e| PersistenceError::Malformed {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;

        FileManager::write_to_file(&self.path, &content).map_err(|e| PersistenceError::Write {
            path: self.path.display().to_string(),
            source: std::io::Error::other(e.to_string()),
        })
    }
}

impl Clone for GlossaryStore {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            path: self.path.clone(),
        }
    }
}

/// Normalize a phrase for use as a glossary key
fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
