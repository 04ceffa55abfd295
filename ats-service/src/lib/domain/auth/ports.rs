use async_trait::async_trait;

use crate::auth_domain::models::PrincipalView;
use crate::user::errors::UserError;

/// Resolve a principal's stored credentials and authorities by identifier.
///
/// Implemented as an adapter over the credential store. The request gate
/// consults this on every request instead of trusting token claims, so role
/// changes and deletion take effect on the next request.
#[async_trait]
pub trait AuthorityResolver: Send + Sync + 'static {
    /// Load the minimal authentication view for a subject.
    ///
    /// # Returns
    /// The view, or None when no principal exists for the subject
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn load_authorities(&self, subject: &str) -> Result<Option<PrincipalView>, UserError>;
}
