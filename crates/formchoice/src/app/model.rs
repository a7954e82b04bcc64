//! Shared model handle binding a component to the value it edits.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

/// Holder of at most one selected object.
///
/// Clones share the same slot, so a page can keep a handle and observe what a component wrote
/// during submission.
pub struct Model<T> {
    slot: Arc<RwLock<Option<T>>>,
}

impl<T> Model<T> {
    pub fn new(object: Option<T>) -> Self {
        Self {
            slot: Arc::new(RwLock::new(object)),
        }
    }

    pub fn of(object: T) -> Self {
        Self::new(Some(object))
    }

    pub fn empty() -> Self {
        Self::new(None)
    }

    pub fn set_object(&self, object: Option<T>) {
        *self.slot.write() = object;
    }

    pub fn is_empty(&self) -> bool {
        self.slot.read().is_none()
    }
}

impl<T: Clone> Model<T> {
    pub fn object(&self) -> Option<T> {
        self.slot.read().clone()
    }
}

impl<T> Default for Model<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Clone for Model<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Model<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Model").field(&*self.slot.read()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_slot() {
        let page_handle = Model::of("draft");
        let component_handle = page_handle.clone();

        component_handle.set_object(Some("final"));
        assert_eq!(page_handle.object(), Some("final"));

        component_handle.set_object(None);
        assert!(page_handle.is_empty());
    }
}
