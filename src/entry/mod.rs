//! Entry editing: state engine, errors and the sync controller

mod error;
mod state;
mod sync;

pub use error::SubmitError;
pub use state::EditableEntryState;
#[cfg(test)]
pub use state::{initialize_state, set_field_value};
pub use sync::{EntrySession, EntrySyncController, SessionPhase};
