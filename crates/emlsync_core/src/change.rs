//! Upward change propagation ("trickle-up").
//!
//! # Responsibility
//! - Carry a payload-free "document modified" signal from a leaf model to the
//!   aggregate that owns it, and from there to the package root.
//!
//! # Invariants
//! - Every externally visible model mutation emits exactly one signal.
//! - Signals are neither batched nor deduplicated; a redundant signal is
//!   harmless.
//! - The notification target is injected at construction; nothing looks up a
//!   global root.

use std::fmt::{Debug, Formatter};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Receiver of "something changed" signals.
pub trait ChangeListener: Send + Sync {
    fn notify_changed(&self);
}

/// Handle a model uses to signal its owner.
///
/// A detached notifier drops signals; it is what standalone models and tests
/// use.
#[derive(Clone, Default)]
pub struct ChangeNotifier {
    listener: Option<Arc<dyn ChangeListener>>,
}

impl ChangeNotifier {
    pub fn new(listener: Arc<dyn ChangeListener>) -> Self {
        Self {
            listener: Some(listener),
        }
    }

    /// Notifier with no owner.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn is_attached(&self) -> bool {
        self.listener.is_some()
    }

    /// Emits one signal to the owner, if any.
    pub fn notify_changed(&self) {
        if let Some(listener) = &self.listener {
            listener.notify_changed();
        }
    }
}

impl Debug for ChangeNotifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// Lets an intermediate aggregate forward signals to its own owner.
impl ChangeListener for ChangeNotifier {
    fn notify_changed(&self) {
        ChangeNotifier::notify_changed(self);
    }
}

/// Package-level dirty flag owned by the aggregate root.
#[derive(Debug, Default)]
pub struct PackageDirtyFlag {
    changed: AtomicBool,
    signals: AtomicUsize,
}

impl PackageDirtyFlag {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Whether any model reported a change since the last `clear`.
    pub fn is_changed(&self) -> bool {
        self.changed.load(Ordering::SeqCst)
    }

    /// Total signals received, including redundant ones.
    pub fn signal_count(&self) -> usize {
        self.signals.load(Ordering::SeqCst)
    }

    /// Resets the flag after the package was saved.
    pub fn clear(&self) {
        self.changed.store(false, Ordering::SeqCst);
    }

    /// Notifier that reports into this flag.
    pub fn notifier(self: &Arc<Self>) -> ChangeNotifier {
        ChangeNotifier::new(self.clone())
    }
}

impl ChangeListener for PackageDirtyFlag {
    fn notify_changed(&self) {
        self.signals.fetch_add(1, Ordering::SeqCst);
        self.changed.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::{ChangeNotifier, PackageDirtyFlag};
    use std::sync::Arc;

    #[test]
    fn detached_notifier_is_a_no_op() {
        let notifier = ChangeNotifier::detached();
        assert!(!notifier.is_attached());
        notifier.notify_changed();
    }

    #[test]
    fn signals_reach_the_flag_without_dedup() {
        let flag = PackageDirtyFlag::new();
        let notifier = flag.notifier();

        notifier.notify_changed();
        notifier.notify_changed();

        assert!(flag.is_changed());
        assert_eq!(flag.signal_count(), 2);

        flag.clear();
        assert!(!flag.is_changed());
        assert_eq!(flag.signal_count(), 2);
    }

    #[test]
    fn notifiers_chain_through_intermediate_aggregates() {
        let flag = PackageDirtyFlag::new();
        let attribute_level = flag.notifier();
        let leaf = ChangeNotifier::new(Arc::new(attribute_level));

        leaf.notify_changed();
        assert_eq!(flag.signal_count(), 1);
    }
}
