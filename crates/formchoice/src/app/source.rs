//! Where a choice component gets its candidates from.

use std::fmt;
use std::sync::Arc;

type Supplier<T> = Arc<dyn Fn() -> Vec<T> + Send + Sync>;

/// Ordered candidates for a choice component.
///
/// A static list is shared, never copied. A supplied list is produced again on every load, so it
/// reflects the latest state of whatever backs it.
pub enum ChoiceSource<T> {
    Static(Arc<[T]>),
    Supplied(Supplier<T>),
}

impl<T> ChoiceSource<T> {
    /// Wrap a closure that produces the candidates on demand.
    pub fn supplied<F>(supplier: F) -> Self
    where
        F: Fn() -> Vec<T> + Send + Sync + 'static,
    {
        Self::Supplied(Arc::new(supplier))
    }

    /// Current candidates, in order.
    pub fn load(&self) -> Arc<[T]> {
        match self {
            Self::Static(choices) => Arc::clone(choices),
            Self::Supplied(supplier) => Arc::from(supplier()),
        }
    }
}

impl<T> Default for ChoiceSource<T> {
    fn default() -> Self {
        Self::Static(Arc::from(Vec::new()))
    }
}

impl<T> Clone for ChoiceSource<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Static(choices) => Self::Static(Arc::clone(choices)),
            Self::Supplied(supplier) => Self::Supplied(Arc::clone(supplier)),
        }
    }
}

impl<T> From<Vec<T>> for ChoiceSource<T> {
    fn from(choices: Vec<T>) -> Self {
        Self::Static(Arc::from(choices))
    }
}

impl<T> From<Arc<[T]>> for ChoiceSource<T> {
    fn from(choices: Arc<[T]>) -> Self {
        Self::Static(choices)
    }
}

impl<T: fmt::Debug> fmt::Debug for ChoiceSource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(choices) => f.debug_tuple("Static").field(choices).finish(),
            Self::Supplied(_) => f.write_str("Supplied(..)"),
        }
    }
}
