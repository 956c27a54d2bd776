use crate::error::SheetError;
use crate::model::{Credential, RangeRequest, ValueTable};

pub trait AuthProvider {
    fn credential(&self) -> anyhow::Result<Credential>;
}

pub trait SheetClient {
    /// Performs a single remote read. HTTP 429 must surface as [`SheetError::RateLimited`].
    fn read(&self, request: &RangeRequest) -> Result<ValueTable, SheetError>;
}

impl<T: AuthProvider + ?Sized> AuthProvider for Box<T> {
    fn credential(&self) -> anyhow::Result<Credential> {
        (**self).credential()
    }
}

/// Credential handed in directly, e.g. from an environment variable.
pub struct StaticToken(pub String);

impl AuthProvider for StaticToken {
    fn credential(&self) -> anyhow::Result<Credential> {
        if self.0.trim().is_empty() {
            anyhow::bail!("static access token is empty");
        }
        Ok(Credential::bearer(self.0.trim()))
    }
}
