pub mod copy;
pub mod destination;
pub mod manifest;

pub use copy::{materialize, CopyReport};
pub use destination::{destination_path, ensure_destination_available};
pub use manifest::{patch_manifest, INITIAL_VERSION};
