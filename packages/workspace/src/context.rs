//! Explicit session identity.
//!
//! Identity is resolved once at process start (`uninitialized` is simply
//! "no context constructed yet") and threaded through to whatever needs
//! it. Nothing in this workspace reads ambient global auth state.

/// Signed-in tenant profile.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    /// Tenant profile id; also the site document id (one site per tenant)
    pub id: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Identity {
    Anonymous,
    User(UserProfile),
}

/// Resolved session context, ready for use.
#[derive(Debug, Clone)]
pub struct SessionContext {
    identity: Identity,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self {
            identity: Identity::Anonymous,
        }
    }

    pub fn signed_in(profile: UserProfile) -> Self {
        Self {
            identity: Identity::User(profile),
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn user(&self) -> Option<&UserProfile> {
        match &self.identity {
            Identity::User(profile) => Some(profile),
            Identity::Anonymous => None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.user().is_some()
    }
}
