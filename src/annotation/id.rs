use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Process-wide monotonic component of generated ids.
static NEXT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Identity shared by an annotation's marker, guide line and tooltip.
///
/// Combines the issue time, a monotonic sequence and a random suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnnotationId {
    issued_at_ms: i64,
    sequence: u64,
    nonce: u32,
}

impl AnnotationId {
    #[must_use]
    pub fn generate() -> Self {
        Self {
            issued_at_ms: Utc::now().timestamp_millis(),
            sequence: NEXT_SEQUENCE.fetch_add(1, Ordering::Relaxed),
            nonce: rand::random(),
        }
    }

    #[must_use]
    pub fn issued_at_ms(self) -> i64 {
        self.issued_at_ms
    }

    #[must_use]
    pub fn sequence(self) -> u64 {
        self.sequence
    }
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ann-{:x}-{:x}-{:08x}",
            self.issued_at_ms, self.sequence, self.nonce
        )
    }
}
