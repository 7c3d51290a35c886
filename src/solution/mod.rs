//! Incremental solution state.
//!
//! A [`Solution`] tracks cost, profit and risk aggregates of a customer
//! selection under single-customer flips. Requirements are shared
//! between customers, so each requirement keeps a reference count of the
//! selected customers that need it and contributes to the aggregates
//! only while that count is positive.
//!
//! The per-customer requirement closures are computed once into a
//! [`ClosureTable`] and shared by every clone.

mod closure;
mod selection;
mod state;

pub use closure::ClosureTable;
pub use selection::{format_selection, parse_selection};
pub use state::Solution;
