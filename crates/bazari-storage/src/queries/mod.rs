// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules, one per table group.
//!
//! Every function takes a [`crate::database::Database`] and runs inside the
//! single writer thread via `connection().call()`.

pub mod action_log;
pub mod ads;
pub mod payments;
pub mod stats;
pub mod support;
pub mod users;

/// Parse a stored enum string (status columns) back into its typed form.
///
/// Stored values are produced by the enum `Display` impls, so a parse failure
/// means the database was edited out-of-band.
pub(crate) fn parse_stored<T: std::str::FromStr>(idx: usize, value: String) -> rusqlite::Result<T> {
    value.parse().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            format!("unrecognized stored value: {value}").into(),
        )
    })
}
