use crate::backoff::{BackoffController, Clock, SystemClock};
use crate::error::SheetError;
use crate::model::{RangeRequest, ValueTable};
use crate::provider::SheetClient;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// `None` keeps retrying rate-limited reads forever.
    #[serde(default)]
    pub max_retries: Option<u32>,
}

impl RetryPolicy {
    pub fn unbounded() -> Self {
        Self { max_retries: None }
    }

    pub fn bounded(max_retries: u32) -> Self {
        Self {
            max_retries: Some(max_retries),
        }
    }

    fn allows_retry(&self, retries_so_far: u32) -> bool {
        self.max_retries.is_none_or(|max| retries_so_far < max)
    }
}

pub struct ReadOrchestrator<S, C = SystemClock> {
    client: S,
    backoff: BackoffController<C>,
    policy: RetryPolicy,
}

impl<S: SheetClient, C: Clock> ReadOrchestrator<S, C> {
    pub fn new(client: S, backoff: BackoffController<C>, policy: RetryPolicy) -> Self {
        Self {
            client,
            backoff,
            policy,
        }
    }

    pub fn backoff(&self) -> &BackoffController<C> {
        &self.backoff
    }

    pub fn backoff_mut(&mut self) -> &mut BackoffController<C> {
        &mut self.backoff
    }

    pub fn client(&self) -> &S {
        &self.client
    }

    /// Reads `request`, cooling down and re-issuing the same read on every rate-limit.
    ///
    /// Errors other than [`SheetError::RateLimited`] are returned untouched.
    pub fn read(&mut self, request: &RangeRequest) -> Result<ValueTable, SheetError> {
        let mut retries = 0u32;
        loop {
            match self.client.read(request) {
                Ok(values) => {
                    if retries > 0 {
                        info!(%request, retries, "read succeeded after throttling");
                    }
                    return Ok(values);
                }
                Err(SheetError::RateLimited) => {
                    if !self.policy.allows_retry(retries) {
                        return Err(SheetError::RetriesExhausted {
                            attempts: retries.saturating_add(1),
                        });
                    }
                    debug!(%request, retries, "read rate limited");
                    self.backoff.handle_throttle();
                    retries = retries.saturating_add(1);
                }
                Err(err) => return Err(err),
            }
        }
    }
}
