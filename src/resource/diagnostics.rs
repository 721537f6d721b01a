use std::fmt::Display;
use std::path::Path;

/// Receives lifecycle notifications from loaders. Purely observational.
pub trait DiagnosticSink {
    fn loading(&self, path: &Path);
    fn loaded(&self, path: &Path);
    fn failed(&self, path: &Path, reason: &dyn Display);
}

/// Forwards notifications to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn loading(&self, path: &Path) {
        log::debug!("Loading resource '{}'...", path.display());
    }

    fn loaded(&self, path: &Path) {
        log::info!("Loaded resource '{}'", path.display());
    }

    fn failed(&self, path: &Path, reason: &dyn Display) {
        log::warn!("Failed to load resource '{}' ({})", path.display(), reason);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Event {
        Loading(PathBuf),
        Loaded(PathBuf),
        Failed(PathBuf),
    }

    #[derive(Default)]
    pub struct RecordingSink {
        pub events: RefCell<Vec<Event>>,
    }

    impl DiagnosticSink for RecordingSink {
        fn loading(&self, path: &Path) {
            self.events.borrow_mut().push(Event::Loading(path.into()));
        }

        fn loaded(&self, path: &Path) {
            self.events.borrow_mut().push(Event::Loaded(path.into()));
        }

        fn failed(&self, path: &Path, _reason: &dyn Display) {
            self.events.borrow_mut().push(Event::Failed(path.into()));
        }
    }
}
