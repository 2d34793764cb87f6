use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated caller. Anonymous callers are represented as `None`
/// wherever an operation accepts `Option<&Identity>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
}

impl Identity {
    pub fn new(id: Uuid, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }

    /// Whether this identity is the owner recorded on a record.
    pub fn owns(&self, owner: Option<Uuid>) -> bool {
        owner == Some(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ownership() {
        let me = Identity::new(Uuid::new_v4(), "me@example.com");
        assert!(me.owns(Some(me.id)));
        assert!(!me.owns(Some(Uuid::new_v4())));
        assert!(!me.owns(None));
    }
}
