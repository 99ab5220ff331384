//! Browser session management for registry verification runs.
//!
//! One session per batch, one page scope per candidate. The execution mode
//! (container, devcontainer, local) selects the launch flags; an
//! unrecognized mode never reaches this crate because configuration
//! rejects it first.

pub mod actions;
pub mod error;
pub mod session;

pub use error::{BrowserError, Result};
pub use session::{BrowserSession, PageScope};
