//! Caller-side form state and how it reacts to a submission outcome.

use crate::models::{CustomerRecord, RecordId};
use crate::submission::SubmissionError;

pub const SUCCESS_MESSAGE: &str = "Customer information submitted successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    ValidationError,
    DatabaseError,
}

/// What the user should be told after a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
}

impl Feedback {
    pub fn title(&self) -> &'static str {
        match self.kind {
            FeedbackKind::Success => "Success",
            FeedbackKind::ValidationError => "Validation Error",
            FeedbackKind::DatabaseError => "Database Error",
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == FeedbackKind::Success
    }
}

/// The user's current inputs. `Default` is the cleared form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerForm {
    pub inputs: CustomerRecord,
}

impl CustomerForm {
    pub fn to_record(&self) -> CustomerRecord {
        self.inputs.clone()
    }

    pub fn reset(&mut self) {
        self.inputs = CustomerRecord::default();
    }

    /// Clears the inputs on success; on failure leaves them for correction.
    pub fn apply(&mut self, outcome: &Result<RecordId, SubmissionError>) -> Feedback {
        match outcome {
            Ok(_) => {
                self.reset();
                Feedback {
                    kind: FeedbackKind::Success,
                    message: SUCCESS_MESSAGE.to_string(),
                }
            }
            Err(err @ SubmissionError::Validation(_)) => Feedback {
                kind: FeedbackKind::ValidationError,
                message: err.to_string(),
            },
            Err(err @ SubmissionError::Storage { .. }) => Feedback {
                kind: FeedbackKind::DatabaseError,
                message: err.to_string(),
            },
        }
    }
}
