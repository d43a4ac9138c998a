//! Phase/turn state machine and server sequence reconciliation.
//!
//! The server decides every transition. The local machine only records
//! what it is told, refuses redundant assignments, and guards against
//! stale or duplicated deliveries with the server's `seq` counter.
//!
//! ## Key Types
//!
//! - `GamePhase`: Phase enumeration
//! - `Seq` / `SeqGuard`: Monotonic freshness check
//! - `PhaseMachine`: Current phase, turn owner, seq and terminal flag

pub mod machine;
pub mod seq;

pub use machine::{GamePhase, PhaseMachine, PhaseTransition};
pub use seq::{Admission, Seq, SeqGuard};
