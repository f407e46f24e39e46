use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{impl_display_for_enum, impl_from_str_for_enum};

/// How the customer prefers to be reached. Stored as the variant name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactMethod {
    #[default]
    Email,
    Phone,
    Mail,
}

impl ContactMethod {
    pub const ALL: [ContactMethod; 3] = [
        ContactMethod::Email,
        ContactMethod::Phone,
        ContactMethod::Mail,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown contact method: {0:?} (expected Email, Phone or Mail)")]
pub struct ParseContactMethodError(pub String);

impl_from_str_for_enum!(ContactMethod, ParseContactMethodError, Email, Phone, Mail);
impl_display_for_enum!(ContactMethod, Email, Phone, Mail);
