//! Static problem model.
//!
//! A [`Project`] is read-only for the duration of a run: requirement
//! costs and risks, customer profits and risks, the requirements each
//! customer declares, and the precedence edges between requirements.

mod project;
mod reader;

pub use project::{Project, ProjectBuilder};
pub use reader::{load_instance, read_instance};
