/// Current-user identity signal
///
/// The store never authenticates anyone. It only asks, at the time of each
/// operation, whether the active session is a signed-in account, because
/// that decides whether snapshots are mirrored remotely.

use std::sync::RwLock;

/// Snapshot of who is using the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Identity {
    /// Local-only guest session
    pub is_guest_session: bool,
    /// A remote account is signed in
    pub is_authenticated: bool,
}

impl Identity {
    pub fn guest() -> Self {
        Self {
            is_guest_session: true,
            is_authenticated: false,
        }
    }

    pub fn signed_in() -> Self {
        Self {
            is_guest_session: false,
            is_authenticated: true,
        }
    }

    /// Nobody signed in and no guest session started
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// Whether snapshots should be pushed to remote sync
    pub fn syncs_remotely(&self) -> bool {
        !self.is_guest_session && self.is_authenticated
    }
}

/// Read-only access to the current identity
pub trait IdentitySource: Send + Sync {
    fn current(&self) -> Identity;
}

impl IdentitySource for Identity {
    fn current(&self) -> Identity {
        *self
    }
}

/// Shared identity that the sign-in flow updates while the store reads it
#[derive(Debug, Default)]
pub struct SessionIdentity {
    inner: RwLock<Identity>,
}

impl SessionIdentity {
    pub fn new(identity: Identity) -> Self {
        Self {
            inner: RwLock::new(identity),
        }
    }

    pub fn set(&self, identity: Identity) {
        match self.inner.write() {
            Ok(mut guard) => *guard = identity,
            Err(poisoned) => *poisoned.into_inner() = identity,
        }
        tracing::debug!("Identity changed: {:?}", identity);
    }
}

impl IdentitySource for SessionIdentity {
    fn current(&self) -> Identity {
        match self.inner.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
