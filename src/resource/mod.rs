pub mod cache;
pub mod diagnostics;
pub mod handle;
pub mod loader;

pub use cache::ResourceCache;
pub use diagnostics::{DiagnosticSink, LogSink};
pub use handle::Handle;
pub use loader::{LoadRecord, Loader, DEFAULT_RESOURCE_DIR};

/// Loading and lookup for one kind of resource, implemented per kind by an owner of several
/// caches.
pub trait ResourceManager<Resource> {
    type Options;

    fn get_resource(&self, handle: &Handle<Resource>) -> Option<&Resource>;
    fn load_resource(
        &mut self,
        filename: &str,
        name: &str,
        options: Self::Options,
    ) -> Handle<Resource>;
}
