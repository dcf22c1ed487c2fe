use crate::contract::model::Claims;
use crate::domain::error::DomainError;

/// Port for issuing and checking session tokens.
pub trait TokenSigner: Send + Sync {
    fn sign(&self, claims: &Claims) -> Result<String, DomainError>;

    /// Validate signature and expiry, returning the embedded claims.
    fn verify(&self, token: &str) -> Result<Claims, DomainError>;
}
