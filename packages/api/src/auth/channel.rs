//! # Session-change channel
//!
//! [`SessionChannel`] is the single source of session-change notifications. It wraps
//! a [`tokio::sync::watch`] channel, so only the most recent [`AuthEvent`] is kept:
//! a slow subscriber skips straight to the latest state rather than replaying a queue.
//!
//! A [`SessionSubscription`] is a scoped handle. It stops receiving as soon as it is
//! dropped (or [`unsubscribe`](SessionSubscription::unsubscribe)d), so a torn-down
//! consumer is never called back.

use tokio::sync::watch;

use crate::models::{AuthChange, AuthEvent, Session};

/// Publisher side of session-change notifications.
#[derive(Debug)]
pub struct SessionChannel {
    tx: watch::Sender<AuthEvent>,
}

impl SessionChannel {
    pub fn new(initial: Option<Session>) -> Self {
        let (tx, _) = watch::channel(AuthEvent {
            change: AuthChange::InitialSession,
            session: initial,
        });
        Self { tx }
    }

    /// The session carried by the latest event.
    pub fn current(&self) -> Option<Session> {
        self.tx.borrow().session.clone()
    }

    /// Replace the current state and wake every subscriber.
    pub fn publish(&self, change: AuthChange, session: Option<Session>) {
        tracing::debug!(?change, signed_in = session.is_some(), "auth state change");
        self.tx.send_replace(AuthEvent { change, session });
    }

    /// Subscribe to events published from now on.
    pub fn subscribe(&self) -> SessionSubscription {
        SessionSubscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for SessionChannel {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Receiving side of a [`SessionChannel`].
#[derive(Debug)]
pub struct SessionSubscription {
    rx: watch::Receiver<AuthEvent>,
}

impl SessionSubscription {
    /// Wait for the next change and return the latest event.
    /// `None` once the publishing side is gone.
    pub async fn next(&mut self) -> Option<AuthEvent> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// The latest event, without waiting.
    pub fn latest(&self) -> AuthEvent {
        self.rx.borrow().clone()
    }

    /// Release the subscription.
    pub fn unsubscribe(self) {}
}
