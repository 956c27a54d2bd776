use crate::error::LadderError;
use std::time::Duration;

pub const DEFAULT_COOL_DOWNS: [u64; 5] = [5, 10, 20, 40, 60];

/// Ascending cool-down durations in seconds, indexed by escalation level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoolDownLadder {
    seconds: Vec<u64>,
}

impl CoolDownLadder {
    pub fn new(seconds: Vec<u64>) -> Result<Self, LadderError> {
        if seconds.is_empty() {
            return Err(LadderError::Empty);
        }
        for (index, value) in seconds.iter().copied().enumerate() {
            if value == 0 {
                return Err(LadderError::ZeroStep { index });
            }
            if index > 0 && value <= seconds[index - 1] {
                return Err(LadderError::NotAscending { index, value });
            }
        }
        Ok(Self { seconds })
    }

    pub fn last_level(&self) -> usize {
        self.seconds.len() - 1
    }

    pub fn step(&self, level: usize) -> Duration {
        let level = level.min(self.last_level());
        Duration::from_secs(self.seconds[level])
    }

    /// One step up, wrapping to the bottom once past the top.
    pub(crate) fn escalate(&self, level: usize) -> usize {
        if level >= self.last_level() {
            0
        } else {
            level + 1
        }
    }

    pub(crate) fn deescalate(&self, level: usize) -> usize {
        level.saturating_sub(1).min(self.last_level())
    }
}

impl Default for CoolDownLadder {
    fn default() -> Self {
        Self {
            seconds: DEFAULT_COOL_DOWNS.to_vec(),
        }
    }
}
