//! Server sequence counter.
//!
//! The seq is the only ordering authority across the network boundary.
//! A sequenced message is applied only if its seq is strictly greater than
//! every seq applied before it. Equal or older seqs are duplicates or
//! reorderings and are dropped without touching state. Messages that
//! carry no seq are not ordered against anything and always pass.

use serde::{Deserialize, Serialize};

/// Server-assigned sequence number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Seq(pub u64);

impl Seq {
    /// Create a new seq.
    #[must_use]
    pub const fn new(seq: u64) -> Self {
        Self(seq)
    }

    /// Get the raw value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Seq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seq({})", self.0)
    }
}

/// Outcome of offering a seq to the guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    /// Newer than anything applied; the guard now records it.
    Fresh(Seq),
    /// The message carries no seq.
    Unsequenced,
    /// Not newer than `last`; the message must be ignored.
    Stale { seq: Seq, last: Seq },
}

impl Admission {
    /// Should the message be applied?
    #[must_use]
    pub fn is_admitted(self) -> bool {
        !matches!(self, Admission::Stale { .. })
    }
}

/// Tracks the last applied seq.
///
/// ```
/// use fengsheng_core::phase::{Admission, Seq, SeqGuard};
///
/// let mut guard = SeqGuard::new();
/// assert_eq!(guard.admit(Some(Seq(3))), Admission::Fresh(Seq(3)));
/// assert!(!guard.admit(Some(Seq(3))).is_admitted());
/// assert!(!guard.admit(Some(Seq(2))).is_admitted());
/// assert_eq!(guard.admit(None), Admission::Unsequenced);
/// assert_eq!(guard.last(), Some(Seq(3)));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeqGuard {
    last: Option<Seq>,
}

impl SeqGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a seq. A fresh seq is recorded immediately.
    pub fn admit(&mut self, seq: Option<Seq>) -> Admission {
        let admission = self.check(seq);
        if let Admission::Fresh(seq) = admission {
            self.last = Some(seq);
        }
        admission
    }

    /// Classify a seq without recording it.
    #[must_use]
    pub fn check(&self, seq: Option<Seq>) -> Admission {
        match (seq, self.last) {
            (None, _) => Admission::Unsequenced,
            (Some(seq), Some(last)) if seq <= last => Admission::Stale { seq, last },
            (Some(seq), _) => Admission::Fresh(seq),
        }
    }

    /// The last applied seq, if any.
    #[must_use]
    pub fn last(&self) -> Option<Seq> {
        self.last
    }

    /// The seq to stamp on outbound requests.
    #[must_use]
    pub fn current(&self) -> Seq {
        self.last.unwrap_or_default()
    }
}
