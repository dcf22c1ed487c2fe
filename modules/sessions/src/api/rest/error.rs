use modkit::{internal_error, unauthorized, ProblemResponse};

use crate::domain::error::DomainError;

/// Map domain error to the REST error body
pub fn map_domain_error(e: &DomainError) -> ProblemResponse {
    match e {
        DomainError::InvalidCredentials | DomainError::InvalidToken { .. } => {
            unauthorized("Invalid credentials")
        }
        DomainError::Signing { message } => {
            tracing::error!(error = %message, "Token signing failed");
            internal_error("Failed to issue token", message.clone())
        }
        DomainError::Store { message } => {
            tracing::error!(error = %message, "Store error occurred");
            internal_error("Store error", message.clone())
        }
    }
}
