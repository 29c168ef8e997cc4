use super::audio::{AudioHandle, AudioStore};
use super::error::{ApiError, EMPTY_TEXT_MESSAGE};
use crate::domain::language::{example_text, LanguageCatalog, DEFAULT_LANGUAGE};
use crate::infrastructure::api::{LanguageDirectory, SynthesisApi, SynthesisRequest};
use std::sync::Arc;

/// Hard cap on the text field; input beyond it is discarded, not rejected.
pub const MAX_TEXT_CHARS: usize = 1000;

/// What the user has typed and selected so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    text: String,
    language: String,
}

impl FormInput {
    fn new() -> Self {
        Self {
            text: String::new(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

/// Where the current synthesis request stands. Exactly one variant holds at
/// any time; transitions happen only inside the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Submitting,
    Succeeded(AudioHandle),
    Failed(String),
}

/// Owns the form state and the request lifecycle; the only place that talks
/// to the synthesis service.
///
/// At most one request is in flight at a time: `begin_submit` refuses to
/// produce a second request while the state is `Submitting`. Audio handles
/// are released exactly once, when superseded by a newer submit or on an
/// explicit clear.
pub struct SynthesisRequestController {
    synthesis: Arc<dyn SynthesisApi>,
    directory: Arc<dyn LanguageDirectory>,
    catalog: LanguageCatalog,
    form: FormInput,
    state: RequestState,
    audio: AudioStore,
}

impl SynthesisRequestController {
    pub fn new(synthesis: Arc<dyn SynthesisApi>, directory: Arc<dyn LanguageDirectory>) -> Self {
        Self {
            synthesis,
            directory,
            catalog: LanguageCatalog::fallback(),
            form: FormInput::new(),
            state: RequestState::Idle,
            audio: AudioStore::new(),
        }
    }

    /// Fetch the language catalog from the directory, once, at startup.
    ///
    /// Failures are logged and swallowed: the built-in fallback stays in
    /// place and the form remains fully usable.
    pub async fn initialize(&mut self) {
        match self.directory.fetch_languages().await {
            Ok(listing) => match LanguageCatalog::from_listing(listing) {
                Some(catalog) => {
                    tracing::info!(languages = catalog.len(), "language catalog loaded");
                    self.catalog = catalog;
                }
                None => {
                    tracing::warn!("language directory returned no languages, using fallback");
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "language catalog fetch failed, using fallback");
            }
        }
    }

    /// Apply a text edit, clipped to [`MAX_TEXT_CHARS`]. Editing after a
    /// failure resets the error; a successful result stays playable.
    pub fn update_text(&mut self, text: &str) {
        self.form.text = clip_text(text);
        if matches!(self.state, RequestState::Failed(_)) {
            self.state = RequestState::Idle;
        }
    }

    /// Select a language. Codes outside the catalog are ignored; the
    /// selection surface only offers catalog keys.
    pub fn update_language(&mut self, code: &str) {
        if self.catalog.contains(code) {
            self.form.language = code.to_string();
        } else {
            tracing::debug!(code, "ignoring unknown language code");
        }
    }

    /// Replace the text with the example sentence for the selected language.
    pub fn load_example_text(&mut self) {
        self.form.text = example_text(self.form.language()).to_string();
    }

    /// First half of a submit: guard, validate, and move to `Submitting`.
    ///
    /// Returns the outbound request when one should be issued. Returns
    /// `None` while already `Submitting` (re-entry is a no-op) and for
    /// empty or whitespace-only text, which fails the form immediately
    /// without any outbound call.
    pub fn begin_submit(&mut self) -> Option<SynthesisRequest> {
        if matches!(self.state, RequestState::Submitting) {
            return None;
        }

        let trimmed = self.form.text.trim();
        if trimmed.is_empty() {
            self.release_held_handle();
            self.state = RequestState::Failed(EMPTY_TEXT_MESSAGE.to_string());
            return None;
        }

        let request = SynthesisRequest {
            text: trimmed.to_string(),
            lang: self.form.language.clone(),
        };

        self.release_held_handle();
        self.state = RequestState::Submitting;

        tracing::info!(
            lang = %request.lang,
            text_length = request.text.chars().count(),
            "submitting synthesis request"
        );

        Some(request)
    }

    /// Second half of a submit: fold the call outcome into the next state.
    /// Only meaningful while `Submitting`; stray outcomes are dropped.
    pub fn finish_submit(&mut self, outcome: Result<Vec<u8>, ApiError>) {
        if !matches!(self.state, RequestState::Submitting) {
            return;
        }

        match outcome {
            Ok(bytes) => {
                let handle = self.audio.create(bytes);
                self.state = RequestState::Succeeded(handle);
            }
            Err(e) => {
                tracing::warn!(error = %e, "synthesis request failed");
                self.state = RequestState::Failed(e.user_message());
            }
        }
    }

    /// Validate, call the synthesis service, and settle into the next state.
    pub async fn submit(&mut self) {
        let Some(request) = self.begin_submit() else {
            return;
        };
        let outcome = self.synthesis.synthesize(&request).await;
        self.finish_submit(outcome);
    }

    /// Reset the form text and drop any held audio. Language is preserved.
    pub fn clear(&mut self) {
        self.release_held_handle();
        self.form.text.clear();
        self.state = RequestState::Idle;
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn form(&self) -> &FormInput {
        &self.form
    }

    pub fn catalog(&self) -> &LanguageCatalog {
        &self.catalog
    }

    pub fn audio(&self) -> &AudioStore {
        &self.audio
    }

    /// Character count of the current text, for the `n/1000` counter.
    pub fn text_len(&self) -> usize {
        self.form.text.chars().count()
    }

    /// Whether a submit would go out right now.
    pub fn can_submit(&self) -> bool {
        !matches!(self.state, RequestState::Submitting) && !self.form.text.trim().is_empty()
    }

    fn release_held_handle(&mut self) {
        if let RequestState::Succeeded(handle) = self.state {
            self.audio.release(handle);
        }
    }
}

fn clip_text(text: &str) -> String {
    match text.char_indices().nth(MAX_TEXT_CHARS) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
