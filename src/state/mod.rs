//! State owned by the document controller.

mod recent;
mod session;
mod view;

pub use recent::RecentFiles;
pub use session::{LoadedDocument, Session, sidecar_path_for};
pub use view::{ScrollShift, ViewTransform};
