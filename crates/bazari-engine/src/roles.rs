// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Role resolution from the `[admins]` configuration section.

use bazari_config::model::AdminsConfig;
use bazari_core::traits::RoleResolver;
use bazari_core::types::{Role, UserId};

/// Resolves operator roles from configured user ids.
pub struct ConfigRoles {
    primary: UserId,
    secondary: Option<UserId>,
}

impl ConfigRoles {
    pub fn new(admins: &AdminsConfig) -> Self {
        Self {
            primary: UserId(admins.primary),
            secondary: admins.secondary.map(UserId),
        }
    }
}

impl RoleResolver for ConfigRoles {
    fn role_of(&self, user: UserId) -> Option<Role> {
        if user == self.primary {
            Some(Role::Primary)
        } else if self.secondary == Some(user) {
            Some(Role::Secondary)
        } else {
            None
        }
    }

    fn user_for(&self, role: Role) -> Option<UserId> {
        match role {
            Role::Primary => Some(self.primary),
            Role::Secondary => self.secondary,
        }
    }
}
