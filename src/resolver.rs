/*!
 * Translation resolution pipeline.
 *
 * The resolver orchestrates the glossary, the configured provider, the
 * response extractor, and the session history:
 *
 * input text -> glossary check -> (hit: done)
 *                              -> provider call -> extraction -> history -> done
 *
 * Glossary answers are treated as ground truth and are not recorded in
 * history; provider failures are terminal for the single call and are
 * never retried here.
 */

use std::path::Path;

use anyhow::Result;
use log::{debug, info, warn};

use crate::app_config::{Config, Formality};
use crate::errors::{ProviderError, ResolveError};
use crate::extraction::ResponseExtractor;
use crate::file_utils::FileManager;
use crate::glossary::GlossaryStore;
use crate::history::{HistoryBuffer, HistoryRecord};
use crate::providers::{create_provider, Provider};

/// Where a resolved translation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionOrigin {
    /// Answered from the user glossary; no provider involved
    Glossary,

    /// Answered by the provider; `degraded` marks output where no
    /// extraction pattern matched cleanly
    Provider {
        /// Lower-confidence extraction flag
        degraded: bool,
    },
}

/// A successful resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The clean translation
    pub text: String,

    /// Where the translation came from
    pub origin: ResolutionOrigin,
}

#[allow(dead_code)]
impl Resolution {
    /// True when the translation came from the glossary
    pub fn is_glossary_hit(&self) -> bool {
        self.origin == ResolutionOrigin::Glossary
    }
}

/// Orchestrates glossary lookup, provider calls, extraction, and history
pub struct TranslationResolver {
    /// Remote backend for phrases the glossary cannot answer
    provider: Box<dyn Provider>,

    /// User-maintained override table, consulted first
    glossary: GlossaryStore,

    /// Bounded session history of provider-resolved translations
    history: HistoryBuffer,
}

/// Resolver operations - some methods are API surface for library consumers
#[allow(dead_code)]
impl TranslationResolver {
    /// Create a resolver from the application configuration
    pub fn new(config: &Config) -> Result<Self, ProviderError> {
        let provider = create_provider(config)?;
        let glossary = GlossaryStore::load(config.glossary_path());
        let history = HistoryBuffer::new(config.history_size);

        Ok(Self {
            provider,
            glossary,
            history,
        })
    }

    /// Create a resolver around explicit collaborators.
    /// This is the injection point for tests and embedding callers.
    pub fn with_provider(
        provider: Box<dyn Provider>,
        glossary: GlossaryStore,
        history: HistoryBuffer,
    ) -> Self {
        Self {
            provider,
            glossary,
            history,
        }
    }

    /// Resolve English text to a single clean Runyakitara translation.
    ///
    /// Empty input is rejected before any provider call. A glossary hit
    /// returns immediately and leaves history untouched. Otherwise the
    /// provider is called once; its raw response goes through the
    /// extractor and the result is appended to history.
    pub async fn resolve(
        &self,
        source_text: &str,
        formality: Formality,
    ) -> Result<Resolution, ResolveError> {
        let source = source_text.trim();
        if source.is_empty() {
            return Err(ResolveError::EmptyInput);
        }

        let overridden = self.glossary.check(source);
        if overridden != source {
            info!("Resolved from glossary");
            return Ok(Resolution {
                text: overridden,
                origin: ResolutionOrigin::Glossary,
            });
        }

        debug!("No glossary override, calling {} provider", self.provider.name());
        let raw = self.provider.translate(source, formality).await?;

        let extraction = ResponseExtractor::extract(&raw);
        match extraction.rule {
            Some(rule) => debug!("Extraction matched rule '{}'", rule),
            None => warn!("No extraction pattern matched; returning fallback text"),
        }

        self.history.append(HistoryRecord::new(source, extraction.text.clone()));

        let degraded = extraction.is_degraded();
        Ok(Resolution {
            text: extraction.text,
            origin: ResolutionOrigin::Provider { degraded },
        })
    }

    /// Write a resolved translation to a plain-text file as a labeled
    /// source/translation pair. Only runs on explicit request.
    pub fn save_translation<P: AsRef<Path>>(
        &self,
        path: P,
        source: &str,
        translation: &str,
    ) -> Result<()> {
        FileManager::write_translation_artifact(&path, source, translation)?;
        info!("Translation saved to {:?}", path.as_ref());
        Ok(())
    }

    /// The glossary this resolver consults
    pub fn glossary(&self) -> &GlossaryStore {
        &self.glossary
    }

    /// The session history of provider-resolved translations
    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// Name of the active provider
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }
}
