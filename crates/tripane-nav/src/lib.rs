//! Navigation state for tripane.
//!
//! Owns the three cascading navigation levels, the single-entry clipboard
//! and the transfer engine and launcher the levels act through. Selecting a
//! directory in one level re-roots the next; copy, paste, open and drop are
//! routed from here to `tripane-ops`.

mod clipboard;
mod state;

pub use clipboard::{ClipEntry, ClipMode, ClipboardSlot};
pub use state::{Level, NavigationLevel, NavigationState, PastePlan};
