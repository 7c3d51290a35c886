//! Fixed-width textual form of a customer selection.
//!
//! `[S-S--]`: one character per customer between brackets, `S` when the
//! customer is attended and `-` otherwise.

use crate::error::{NrpError, Result};

const SELECTED: char = 'S';
const NOT_SELECTED: char = '-';

/// Formats a selection as `[` + one char per customer + `]`.
pub fn format_selection(selection: &[bool]) -> String {
    let mut s = String::with_capacity(selection.len() + 2);
    s.push('[');
    s.extend(
        selection
            .iter()
            .map(|&x| if x { SELECTED } else { NOT_SELECTED }),
    );
    s.push(']');
    s
}

/// Parses the textual form back into a selection of `customer_count`
/// customers.
///
/// Fails when the string length is not `customer_count + 2`, when the
/// brackets are missing, or on any character other than `S` and `-`.
pub fn parse_selection(text: &str, customer_count: usize) -> Result<Vec<bool>> {
    let found = text.chars().count();
    if found != customer_count + 2 {
        return Err(NrpError::SelectionLength {
            expected: customer_count + 2,
            found,
        });
    }

    let inner = text
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .ok_or_else(|| NrpError::InvalidSelection("missing brackets".into()))?;

    inner
        .chars()
        .enumerate()
        .map(|(i, ch)| match ch {
            SELECTED => Ok(true),
            NOT_SELECTED => Ok(false),
            other => Err(NrpError::InvalidSelection(format!(
                "unexpected `{other}` for customer #{i}"
            ))),
        })
        .collect()
}
