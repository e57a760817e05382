//! Bounded toast queue with explicit expiry.
//!
//! # Responsibility
//! - Hold transient feedback messages for the UI shell.
//!
//! # Invariants
//! - The queue never holds more than `limit` toasts; newest wins.
//! - Dismissal stamps an expiry deadline; removal happens on purge.
//! - The queue owns no clock: callers pass epoch-millisecond timestamps.

/// Monotonic toast identifier, unique within one queue.
pub type ToastId = u64;

const DEFAULT_TOAST_LIMIT: usize = 1;
const DEFAULT_DISMISS_TTL_MS: i64 = 5_000;

/// One transient feedback message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Queue-assigned id.
    pub id: ToastId,
    /// Short headline.
    pub title: String,
    /// Optional longer body.
    pub description: Option<String>,
    /// `false` once dismissed; the toast stays until purged.
    pub open: bool,
    /// Epoch-ms deadline after which a dismissed toast is purged.
    pub expires_at: Option<i64>,
}

/// Bounded FIFO-evicting toast queue (newest first).
#[derive(Debug)]
pub struct ToastQueue {
    limit: usize,
    dismiss_ttl_ms: i64,
    next_id: ToastId,
    toasts: Vec<Toast>,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastQueue {
    /// Creates a queue with the default limit of one visible toast.
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_TOAST_LIMIT, DEFAULT_DISMISS_TTL_MS)
    }

    /// Creates a queue with explicit capacity and dismissal time-to-live.
    ///
    /// A zero `limit` is clamped to one so a pushed toast is always
    /// observable.
    pub fn with_limits(limit: usize, dismiss_ttl_ms: i64) -> Self {
        Self {
            limit: limit.max(1),
            dismiss_ttl_ms,
            next_id: 0,
            toasts: Vec::new(),
        }
    }

    /// Pushes a toast to the front, evicting the oldest beyond capacity.
    pub fn push(&mut self, title: impl Into<String>, description: Option<String>) -> ToastId {
        self.next_id = self.next_id.wrapping_add(1);
        let id = self.next_id;
        self.toasts.insert(
            0,
            Toast {
                id,
                title: title.into(),
                description,
                open: true,
                expires_at: None,
            },
        );
        self.toasts.truncate(self.limit);
        id
    }

    /// Dismisses one toast, stamping its removal deadline.
    ///
    /// Returns `false` when the id is unknown (already evicted or purged).
    pub fn dismiss(&mut self, id: ToastId, now_ms: i64) -> bool {
        match self.toasts.iter_mut().find(|toast| toast.id == id) {
            Some(toast) => {
                toast.open = false;
                toast.expires_at = Some(now_ms + self.dismiss_ttl_ms);
                true
            }
            None => false,
        }
    }

    /// Dismisses every queued toast.
    pub fn dismiss_all(&mut self, now_ms: i64) {
        for toast in &mut self.toasts {
            toast.open = false;
            toast.expires_at = Some(now_ms + self.dismiss_ttl_ms);
        }
    }

    /// Removes one toast immediately, bypassing the expiry window.
    pub fn remove(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        self.toasts.len() != before
    }

    /// Drops dismissed toasts whose deadline has passed.
    ///
    /// Returns how many toasts were removed.
    pub fn purge_expired(&mut self, now_ms: i64) -> usize {
        let before = self.toasts.len();
        self.toasts.retain(|toast| match toast.expires_at {
            Some(deadline) => toast.open || deadline > now_ms,
            None => true,
        });
        before - self.toasts.len()
    }

    /// Current toasts, newest first.
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::ToastQueue;

    #[test]
    fn push_evicts_oldest_beyond_limit() {
        let mut queue = ToastQueue::with_limits(1, 5_000);
        queue.push("first", None);
        let second = queue.push("second", None);

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.toasts()[0].id, second);
        assert_eq!(queue.toasts()[0].title, "second");
    }

    #[test]
    fn dismissed_toast_survives_until_deadline() {
        let mut queue = ToastQueue::with_limits(2, 1_000);
        let id = queue.push("saved", None);

        assert!(queue.dismiss(id, 10_000));
        assert_eq!(queue.purge_expired(10_500), 0);
        assert_eq!(queue.len(), 1);
        assert!(!queue.toasts()[0].open);

        assert_eq!(queue.purge_expired(11_000), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn unknown_id_dismiss_is_a_noop() {
        let mut queue = ToastQueue::new();
        queue.push("only", None);
        assert!(!queue.dismiss(999, 0));
    }
}
