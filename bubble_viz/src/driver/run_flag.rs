// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::Arc;

use tokio::sync::watch;

/// The user's intent: "advance the sort". It is toggled by the user at any time, and
/// polled by the [`crate::SortDriver`] at every comparison boundary.
///
/// It is backed by a [`watch`] channel so that a driver that is suspended between steps
/// can be woken up as soon as the flag is lowered, instead of waiting out the delay.
/// Clones share the same flag.
#[derive(Debug, Clone)]
pub struct RunFlag {
    sender: Arc<watch::Sender<bool>>,
}

impl Default for RunFlag {
    fn default() -> Self { Self::new(false) }
}

impl RunFlag {
    #[must_use]
    pub fn new(raised: bool) -> Self {
        let (sender, _) = watch::channel(raised);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn raise(&self) { self.sender.send_replace(true); }

    pub fn lower(&self) { self.sender.send_replace(false); }

    /// Flips the flag and returns its new value.
    pub fn toggle(&self) -> bool {
        let mut new_value = false;
        self.sender.send_modify(|raised| {
            *raised = !*raised;
            new_value = *raised;
        });
        new_value
    }

    #[must_use]
    pub fn is_raised(&self) -> bool { *self.sender.borrow() }

    /// Resolves as soon as the flag is lowered (immediately if it already is).
    pub async fn lowered(&self) {
        let mut receiver = self.sender.subscribe();
        // The sender lives as long as `self`, so this can't fail.
        drop(receiver.wait_for(|raised| !*raised).await);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_toggle() {
        let flag = RunFlag::default();
        assert!(!flag.is_raised());
        assert!(flag.toggle());
        assert!(flag.is_raised());
        assert!(!flag.toggle());
        flag.raise();
        let clone = flag.clone();
        clone.lower();
        assert!(!flag.is_raised());
    }

    #[tokio::test(start_paused = true)]
    async fn test_lowered_wakes_up_waiter() {
        let flag = RunFlag::new(true);
        let flag_clone = flag.clone();

        let waiter = tokio::spawn(async move { flag_clone.lowered().await });

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!waiter.is_finished());

        flag.lower();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_lowered_resolves_immediately_when_already_lowered() {
        RunFlag::new(false).lowered().await;
    }
}
