//! Page state machines.
//!
//! Each view owns its state for as long as it is mounted and synchronizes it
//! with the collection resource on its own; views share nothing. Dropping a
//! view is unmounting it.

mod collection;
mod creator;
mod editor;

pub use collection::{CollectionView, DeleteConfirmation};
pub use creator::CreatorView;
pub use editor::{EditorView, NotFound};
