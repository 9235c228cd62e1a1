// SPDX-FileCopyrightText: 2026 IcyHider Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structural eligibility check for node classes.
//!
//! A class qualifies for wrapping when its name is not reserved and it
//! exposes both the input-specification and output-specification accessors.
//! Nothing else about the class is inspected.

use icyhider_core::NodeClass;
use strum::Display;

/// Names starting with this marker are private to their namespace.
pub const RESERVED_MARKER: char = '_';

/// Why a class was excluded. Exclusion is silent, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Rejection {
    #[strum(serialize = "reserved name")]
    Reserved,
    #[strum(serialize = "no input specification")]
    MissingInputTypes,
    #[strum(serialize = "no output specification")]
    MissingReturnTypes,
}

/// Check `class`, registered under `name`, against the structural contract.
pub fn check(name: &str, class: &dyn NodeClass) -> Result<(), Rejection> {
    if name.starts_with(RESERVED_MARKER) {
        return Err(Rejection::Reserved);
    }
    if class.input_types().is_none() {
        return Err(Rejection::MissingInputTypes);
    }
    if class.return_types().is_none() {
        return Err(Rejection::MissingReturnTypes);
    }
    Ok(())
}

/// Returns true if the class is eligible for wrapping.
pub fn qualifies(name: &str, class: &dyn NodeClass) -> bool {
    check(name, class).is_ok()
}
