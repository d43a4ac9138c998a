//! Hidden identities.
//!
//! The local player learns their allegiance when character selection
//! starts. Mysterious persons (green) also receive a secret task. An
//! identity never changes once assigned.

use serde::{Deserialize, Serialize};

use crate::core::error::GameError;

/// Allegiance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentityType {
    Red,
    Blue,
    /// Mysterious person: wins by completing a secret task.
    Green,
}

/// Win condition of a mysterious person.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecretTask {
    Killer,
    Stealer,
    Collector,
    Mutator,
    Pioneer,
    Disturber,
    Sweeper,
}

/// The local player's identity.
///
/// ```
/// use fengsheng_core::characters::{Identity, IdentityType, SecretTask};
///
/// let red = Identity::new(IdentityType::Red, None).unwrap();
/// assert_eq!(red.task(), None);
///
/// let green = Identity::new(IdentityType::Green, Some(SecretTask::Collector)).unwrap();
/// assert_eq!(green.task(), Some(SecretTask::Collector));
///
/// assert!(Identity::new(IdentityType::Green, None).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    kind: IdentityType,
    task: Option<SecretTask>,
}

impl Identity {
    /// Build an identity. A secret task is required for, and only for,
    /// mysterious persons.
    pub fn new(kind: IdentityType, task: Option<SecretTask>) -> Result<Self, GameError> {
        match (kind, task) {
            (IdentityType::Green, None) => Err(GameError::InvalidIdentity(
                "mysterious person without a secret task".into(),
            )),
            (IdentityType::Red | IdentityType::Blue, Some(task)) => Err(GameError::InvalidIdentity(
                format!("{:?} identity with secret task {:?}", kind, task),
            )),
            _ => Ok(Self { kind, task }),
        }
    }

    #[must_use]
    pub fn kind(&self) -> IdentityType {
        self.kind
    }

    #[must_use]
    pub fn task(&self) -> Option<SecretTask> {
        self.task
    }
}
