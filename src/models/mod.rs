pub mod document;
pub mod storage;
pub mod tab;
pub mod tab_set;

pub use document::Document;
pub use storage::{DocumentBackend, FileBackend, TabSetStore};
pub use tab::TabReference;
pub use tab_set::{NewTabSet, Scope, TabSet, sort_for_display};
