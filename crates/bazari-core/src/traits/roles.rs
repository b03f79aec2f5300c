// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Role resolution for privileged operations.

use crate::types::{Role, UserId};

/// Resolves platform user ids to operator roles.
///
/// The moderation workflow and admin panels authorize every operation
/// through this seam; role assignment lives in configuration, never in
/// workflow logic.
pub trait RoleResolver: Send + Sync {
    /// The role held by this user, if any.
    fn role_of(&self, user: UserId) -> Option<Role>;

    /// The user currently assigned to a role, if any.
    fn user_for(&self, role: Role) -> Option<UserId>;

    /// True when the user holds any operator role.
    fn is_operator(&self, user: UserId) -> bool {
        self.role_of(user).is_some()
    }
}
