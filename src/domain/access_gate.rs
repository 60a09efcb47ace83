//! Optional mutual exclusion for load-mutate-save cycles.
//!
//! With [`AccessPolicy::Unsynchronized`] every request runs its own cycle with
//! no coordination: concurrent registrations of one URL may each create a
//! record, and concurrent resolutions of one slug may lose an increment.
//! [`AccessPolicy::Serialized`] makes whole cycles mutually exclusive within
//! the process.

use std::str::FromStr;
use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

/// How concurrent cycles against the store are coordinated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessPolicy {
    #[default]
    Unsynchronized,
    Serialized,
}

impl AccessPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unsynchronized => "unsynchronized",
            Self::Serialized => "serialized",
        }
    }
}

impl FromStr for AccessPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "unsynchronized" => Ok(Self::Unsynchronized),
            "serialized" => Ok(Self::Serialized),
            other => Err(format!(
                "'{other}' is not a supported store access policy. Use either `unsynchronized` or `serialized`"
            )),
        }
    }
}

/// Gate entered at the start of each cycle and released when the guard drops.
///
/// Clones share the same lock, so every service built from one gate is
/// serialized against the others.
#[derive(Debug, Clone, Default)]
pub struct CycleGate {
    lock: Option<Arc<Mutex<()>>>,
}

impl CycleGate {
    pub fn new(policy: AccessPolicy) -> Self {
        match policy {
            AccessPolicy::Unsynchronized => Self { lock: None },
            AccessPolicy::Serialized => Self {
                lock: Some(Arc::new(Mutex::new(()))),
            },
        }
    }

    pub fn policy(&self) -> AccessPolicy {
        if self.lock.is_some() {
            AccessPolicy::Serialized
        } else {
            AccessPolicy::Unsynchronized
        }
    }

    /// Waits for exclusive access when serialized; returns immediately otherwise.
    pub async fn enter(&self) -> Option<MutexGuard<'_, ()>> {
        match &self.lock {
            Some(lock) => Some(lock.lock().await),
            None => None,
        }
    }
}
