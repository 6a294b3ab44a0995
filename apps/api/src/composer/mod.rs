//! Composition sessions: the per-entry state machine, the registry of open
//! sessions, and the HTTP handlers that drive them.

pub mod handlers;
pub mod registry;
pub mod session;

pub use registry::{submit_analysis, SessionRegistry, SessionSlot};
pub use session::{AnalysisState, AnalysisTicket, ComposerSession, ComposerSnapshot};
