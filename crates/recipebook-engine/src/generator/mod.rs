//! Recipe generation collaborators
//!
//! A generator turns a [`GenerationRequest`] into the raw JSON payload
//! described by [`GeneratedRecipe`]. Parsing and validation happen in the
//! engine, so implementations only move text.

mod gemini;

use std::sync::Mutex;

use recipebook_core::errors::RecipeBookError;
use recipebook_core::generation::GenerationRequest;

pub use gemini::GeminiGenerator;

/// Source of AI-generated recipe payloads
pub trait RecipeGenerator {
    /// Ask the provider for a recipe and return its raw JSON answer
    ///
    /// # Errors
    /// `Collaborator` when the provider fails or answers without content,
    /// `CollaboratorTimeout` when it does not answer in time.
    fn generate(&self, request: &GenerationRequest) -> Result<String, RecipeBookError>;
}

/// Canned generator for tests and offline use
///
/// Records every request it receives.
#[derive(Debug)]
pub struct FakeGenerator {
    response: Result<String, RecipeBookError>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl FakeGenerator {
    pub fn returning(payload: impl Into<String>) -> Self {
        Self {
            response: Ok(payload.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: RecipeBookError) -> Self {
        Self {
            response: Err(err),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl RecipeGenerator for FakeGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<String, RecipeBookError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        self.response.clone()
    }
}
