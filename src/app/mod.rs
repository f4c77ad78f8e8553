//! App layer - central state management and workflow orchestration
//!
//! The App actor receives UI events and network responses,
//! updates state, and emits network commands and render state.

pub mod actor;
pub mod commands;
pub mod state;
pub mod store;

pub use actor::AppActor;
pub use state::AppState;
pub use store::ViewModelStore;
