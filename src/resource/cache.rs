use std::collections::HashMap;
use std::rc::Rc;

use super::handle::Handle;
use super::loader::{LoadRecord, Loader};

struct Slot<L: Loader> {
    name: Rc<str>,
    record: LoadRecord<L::Options>,
    resource: Option<L::Resource>,
}

/// Loads resources through `L` at most once per logical name and keeps them, together with the
/// parameters they were loaded with, until the cache is dropped.
///
/// Slots are never removed, so a slot index stays valid for the lifetime of the cache and can be
/// handed out as a lookup hint inside [`Handle`]s.
///
/// Reload policy: if the loader fails while reloading, the previously loaded resource is kept and
/// existing handles keep resolving to it.
pub struct ResourceCache<L: Loader> {
    loader: Rc<L>,
    slots: Vec<Slot<L>>,
    index: HashMap<Rc<str>, usize>,
    loaded: usize,
}

impl<L: Loader> ResourceCache<L> {
    pub fn new(loader: Rc<L>) -> Self {
        Self {
            loader,
            slots: Vec::new(),
            index: HashMap::new(),
            loaded: 0,
        }
    }

    pub fn from_loader(loader: L) -> Self {
        Self::new(Rc::new(loader))
    }

    pub fn loader(&self) -> &Rc<L> {
        &self.loader
    }

    /// Load `filename` under its own name with default options.
    pub fn load(&mut self, filename: &str) -> Handle<L::Resource>
    where
        L::Options: Default,
    {
        self.load_as(filename, filename, L::Options::default())
    }

    pub fn load_with(&mut self, filename: &str, options: L::Options) -> Handle<L::Resource> {
        self.load_as(filename, filename, options)
    }

    /// Load `filename` under the logical name `name`.
    ///
    /// If `name` is already cached this returns its handle without calling the loader, whatever
    /// `filename` and `options` are. Returns a null handle for an empty name or if the loader
    /// fails.
    pub fn load_as(
        &mut self,
        filename: &str,
        name: &str,
        options: L::Options,
    ) -> Handle<L::Resource> {
        if name.is_empty() {
            return Handle::null();
        }

        let idx = match self.index.get(name) {
            Some(&idx) => {
                let slot = &mut self.slots[idx];
                if slot.resource.is_some() {
                    return Handle::with_slot(Rc::clone(&slot.name), idx);
                }
                // Previous attempt failed, the new parameters replace the old ones
                slot.record = LoadRecord::new(filename, options);
                idx
            }
            None => {
                let name: Rc<str> = Rc::from(name);
                let idx = self.slots.len();
                self.slots.push(Slot {
                    name: Rc::clone(&name),
                    record: LoadRecord::new(filename, options),
                    resource: None,
                });
                self.index.insert(name, idx);
                idx
            }
        };

        if self.force_load(idx) {
            Handle::with_slot(Rc::clone(&self.slots[idx].name), idx)
        } else {
            Handle::null()
        }
    }

    /// Handle for `name` if it is cached, otherwise a null handle. Never loads.
    pub fn handle(&self, name: &str) -> Handle<L::Resource> {
        match self.cached_slot(name) {
            Some(idx) => Handle::with_slot(Rc::clone(&self.slots[idx].name), idx),
            None => Handle::null(),
        }
    }

    pub fn get(&self, handle: &Handle<L::Resource>) -> Option<&L::Resource> {
        let key = handle.key()?;

        if let Some(slot) = handle.slot().and_then(|idx| self.slots.get(idx)) {
            if Rc::ptr_eq(&slot.name, key) || *slot.name == **key {
                return slot.resource.as_ref();
            }
        }

        let idx = *self.index.get(&**key)?;
        self.slots[idx].resource.as_ref()
    }

    pub fn get_by_name(&self, name: &str) -> Option<&L::Resource> {
        let idx = *self.index.get(name)?;
        self.slots[idx].resource.as_ref()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cached_slot(name).is_some()
    }

    /// The parameters `name` was last requested with, also present if that load failed.
    pub fn load_record(&self, name: &str) -> Option<&LoadRecord<L::Options>> {
        let idx = *self.index.get(name)?;
        Some(&self.slots[idx].record)
    }

    /// Reload `name` from its load record. Returns whether a new resource replaced the old one.
    pub fn reload(&mut self, name: &str) -> bool {
        match self.index.get(name) {
            Some(&idx) => self.force_load(idx),
            None => {
                log::warn!("No load record for resource '{}', nothing to reload", name);
                false
            }
        }
    }

    /// Reload every cached resource. Returns how many were replaced.
    pub fn reload_all(&mut self) -> usize {
        let mut reloaded = 0;
        for idx in 0..self.slots.len() {
            if self.slots[idx].resource.is_some() && self.force_load(idx) {
                reloaded += 1;
            }
        }

        log::debug!("Reloaded {}/{} resources", reloaded, self.loaded);
        reloaded
    }

    /// Number of cached resources.
    pub fn count(&self) -> usize {
        self.loaded
    }

    pub fn is_empty(&self) -> bool {
        self.loaded == 0
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.slots
            .iter()
            .filter(|slot| slot.resource.is_some())
            .map(|slot| &*slot.name)
    }

    fn cached_slot(&self, name: &str) -> Option<usize> {
        let idx = *self.index.get(name)?;
        self.slots[idx].resource.as_ref().map(|_| idx)
    }

    fn force_load(&mut self, idx: usize) -> bool {
        let slot = &mut self.slots[idx];
        match self
            .loader
            .load(slot.record.filename(), slot.record.options())
        {
            Ok(resource) => {
                if slot.resource.replace(resource).is_none() {
                    self.loaded += 1;
                }
                true
            }
            Err(e) => {
                if slot.resource.is_some() {
                    log::warn!(
                        "Keeping previously loaded '{}', reload failed: {}",
                        slot.name,
                        e
                    );
                } else {
                    log::warn!("Resource '{}' could not be loaded: {}", slot.name, e);
                }
                false
            }
        }
    }
}

impl<L: Loader + Default> Default for ResourceCache<L> {
    fn default() -> Self {
        Self::from_loader(L::default())
    }
}
