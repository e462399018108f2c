use recipebook_core_types::{RequestId, TraceId};
use thiserror::Error;

use crate::model::ChildKind;
use crate::rules::ValidationReport;

/// Result type alias using RecipeBookError
pub type Result<T> = std::result::Result<T, RecipeBookError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code used by the CLI, by tests and by any
/// caller that needs to branch on the failure class without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Request shape
    InvalidInput,
    ValidationFailed,

    // Lookup / access
    NotFound,
    Forbidden,

    // Mutation
    ConstraintViolation,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
    ExternalService,
    Timeout,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::ValidationFailed => "ERR_VALIDATION_FAILED",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Forbidden => "ERR_FORBIDDEN",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::Timeout => "ERR_TIMEOUT",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether the caller can fix the request and retry
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ExErrorKind::InvalidInput
                | ExErrorKind::ValidationFailed
                | ExErrorKind::NotFound
                | ExErrorKind::Forbidden
        )
    }
}

/// Canonical structured error type
///
/// Carries the classification plus enough context (operation, entity, request
/// correlation, validation report) for the caller to render a useful response.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    report: Option<ValidationReport>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            report: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach the per-category validation report
    pub fn with_report(mut self, report: ValidationReport) -> Self {
        self.report = Some(report);
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The validation report, present only on `ValidationFailed`
    pub fn report(&self) -> Option<&ValidationReport> {
        self.report.as_ref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(report) = &self.report {
            for failure in report.failures() {
                write!(f, "\n  {}", failure)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for recipebook operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecipeBookError {
    /// One or more categories failed validation; nothing was written
    #[error("Validation failed for: {}", .report.category_list())]
    Validation { report: ValidationReport },

    #[error("Recipe not found: {recipe_id}")]
    RecipeNotFound { recipe_id: String },

    /// An edit-set references a child that does not belong to the recipe
    #[error("{kind} {child_id} not found in recipe {recipe_id}")]
    ChildNotFound {
        kind: ChildKind,
        child_id: i64,
        recipe_id: String,
    },

    /// The acting user does not own the recipe
    #[error("Access denied to recipe {recipe_id}")]
    Forbidden { recipe_id: String },

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Unknown sort field: {field}")]
    InvalidSortField { field: String },

    /// Constraint violation raised by the store while committing
    #[error("Store integrity failure: {message}")]
    StoreIntegrity { message: String },

    /// The generation collaborator was unreachable or answered garbage
    #[error("Recipe generation failed: {message}")]
    Collaborator { message: String },

    #[error("Recipe generation timed out after {seconds}s")]
    CollaboratorTimeout { seconds: u64 },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// Conversion from RecipeBookError to ExError
impl From<RecipeBookError> for ExError {
    fn from(err: RecipeBookError) -> Self {
        match err {
            RecipeBookError::Validation { report } => {
                let message = format!("Validation failed for: {}", report.category_list());
                ExError::new(ExErrorKind::ValidationFailed)
                    .with_message(message)
                    .with_report(report)
            }

            RecipeBookError::RecipeNotFound { recipe_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(recipe_id)
                .with_message("Recipe not found"),

            RecipeBookError::ChildNotFound {
                kind,
                child_id,
                recipe_id,
            } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(recipe_id)
                .with_message(format!("{} {} not found", kind, child_id)),

            RecipeBookError::Forbidden { recipe_id } => ExError::new(ExErrorKind::Forbidden)
                .with_entity_id(recipe_id)
                .with_message("Access denied"),

            RecipeBookError::InvalidInput { reason } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(reason)
            }

            RecipeBookError::InvalidSortField { field } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("parse_sort_field")
                .with_message(format!("Unknown sort field '{}'", field)),

            RecipeBookError::StoreIntegrity { message } => {
                ExError::new(ExErrorKind::Persistence).with_message(message)
            }

            RecipeBookError::Collaborator { message } => {
                ExError::new(ExErrorKind::ExternalService)
                    .with_op("generate_recipe")
                    .with_message(message)
            }

            RecipeBookError::CollaboratorTimeout { seconds } => {
                ExError::new(ExErrorKind::Timeout)
                    .with_op("generate_recipe")
                    .with_message(format!("No answer within {}s", seconds))
            }

            RecipeBookError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to RecipeBookError
impl From<serde_json::Error> for RecipeBookError {
    fn from(err: serde_json::Error) -> Self {
        RecipeBookError::Serialization {
            message: err.to_string(),
        }
    }
}
