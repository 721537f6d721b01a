use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::rc::Rc;

/// Names a resource of type `T` held by a [`ResourceCache`](super::ResourceCache).
///
/// A handle owns nothing and may outlive the resource it names, resolving it through the cache
/// then simply yields `None`. Identity is the logical name: two handles are equal iff their names
/// are, and a handle with an empty name is null.
///
/// Handles are `Clone` but not `Copy`: cloning bumps the reference count of the shared name and
/// never allocates.
pub struct Handle<T> {
    key: Option<Rc<str>>,
    // Slot index in the cache that handed out this handle. Only a lookup hint, never identity.
    slot: Option<usize>,
    _ty: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    pub fn new(name: &str) -> Self {
        if name.is_empty() {
            return Self::null();
        }

        Self {
            key: Some(Rc::from(name)),
            slot: None,
            _ty: PhantomData,
        }
    }

    pub fn null() -> Self {
        Self {
            key: None,
            slot: None,
            _ty: PhantomData,
        }
    }

    pub(crate) fn with_slot(key: Rc<str>, slot: usize) -> Self {
        debug_assert!(!key.is_empty());
        Self {
            key: Some(key),
            slot: Some(slot),
            _ty: PhantomData,
        }
    }

    pub fn is_null(&self) -> bool {
        self.key.is_none()
    }

    /// The logical name, empty for a null handle.
    pub fn name(&self) -> &str {
        self.key.as_deref().unwrap_or("")
    }

    pub(crate) fn key(&self) -> Option<&Rc<str>> {
        self.key.as_ref()
    }

    pub(crate) fn slot(&self) -> Option<usize> {
        self.slot
    }
}

impl<T> Default for Handle<T> {
    fn default() -> Self {
        Self::null()
    }
}

// Manual impls: deriving would put bounds on T.
impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            slot: self.slot,
            _ty: PhantomData,
        }
    }
}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
    }
}

impl<T> std::fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.key {
            Some(key) => write!(f, "Handle<{}>({:?})", std::any::type_name::<T>(), key),
            None => write!(f, "Handle<{}>(null)", std::any::type_name::<T>()),
        }
    }
}

impl<T> std::fmt::Display for Handle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
