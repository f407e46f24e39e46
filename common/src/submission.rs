use thiserror::Error;
use tracing::{error, info, warn};

use crate::db::CustomerStore;
use crate::models::{CustomerRecord, RecordId};
use crate::validation::{ValidationError, ValidationRules};

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The insert failed; `message` is the database's own description.
    #[error("An error occurred: {message}")]
    Storage { message: String },
}

impl SubmissionError {
    /// Stable machine-readable name for the failure.
    pub fn kind(&self) -> &'static str {
        match self {
            SubmissionError::Validation(ValidationError::MissingName) => "missing_name",
            SubmissionError::Validation(ValidationError::InvalidEmail) => "invalid_email",
            SubmissionError::Validation(ValidationError::InvalidBirthday) => "invalid_birthday",
            SubmissionError::Storage { .. } => "storage",
        }
    }
}

/// Validate-then-persist entry point shared by every caller.
#[derive(Debug, Clone)]
pub struct Intake {
    store: CustomerStore,
    rules: ValidationRules,
}

impl Intake {
    pub fn new(store: CustomerStore, rules: ValidationRules) -> Self {
        Intake { store, rules }
    }

    pub fn store(&self) -> &CustomerStore {
        &self.store
    }

    /// Validates `record` and, only if it passes, inserts it as one new row.
    #[tracing::instrument(name = "Submit customer", skip(self, record), fields(name = %record.name))]
    pub async fn submit(&self, record: CustomerRecord) -> Result<RecordId, SubmissionError> {
        if let Err(err) = self.rules.validate(&record) {
            warn!("rejected customer record: {}", err);
            return Err(err.into());
        }

        let id = self.store.insert(&record).await.map_err(|err| {
            error!("insert into customers failed: {}", err);
            SubmissionError::Storage {
                message: err.to_string(),
            }
        })?;

        info!(id, "customer record saved");
        Ok(id)
    }
}
