//! Permission role tokens.
//!
//! The platform authorizes every document-store operation against a list of
//! permission grants attached to the collection. Grants are transmitted as
//! strings such as `read("any")` or `update("user:abc123")`. This module
//! keeps the token grammar in one place; nothing else in the workspace
//! concatenates permission strings by hand.

use serde::{Serialize, Serializer};
use std::fmt;

/// Who a permission grant applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    /// Any caller, authenticated or not.
    Any,
    /// A single specific user.
    User(String),
}

impl Role {
    /// Grant to any caller.
    #[must_use]
    pub const fn any() -> Self {
        Self::Any
    }

    /// Grant to one specific user.
    #[must_use]
    pub fn user(user_id: impl Into<String>) -> Self {
        Self::User(user_id.into())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "any"),
            Self::User(id) => write!(f, "user:{id}"),
        }
    }
}

/// A single permission grant on a collection.
///
/// # Examples
///
/// ```
/// use gatherly_platform::{Permission, Role};
///
/// assert_eq!(Permission::read(Role::any()).to_string(), r#"read("any")"#);
/// assert_eq!(
///     Permission::update(Role::user("abc123")).to_string(),
///     r#"update("user:abc123")"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Permission {
    /// Permission to read documents.
    Read(Role),
    /// Permission to create documents.
    Create(Role),
    /// Permission to update documents.
    Update(Role),
    /// Permission to delete documents.
    Delete(Role),
}

impl Permission {
    /// Grant read access to `role`.
    #[must_use]
    pub const fn read(role: Role) -> Self {
        Self::Read(role)
    }

    /// Grant create access to `role`.
    #[must_use]
    pub const fn create(role: Role) -> Self {
        Self::Create(role)
    }

    /// Grant update access to `role`.
    #[must_use]
    pub const fn update(role: Role) -> Self {
        Self::Update(role)
    }

    /// Grant delete access to `role`.
    #[must_use]
    pub const fn delete(role: Role) -> Self {
        Self::Delete(role)
    }

    /// The action half of the token (`read`, `create`, `update`, `delete`).
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::Read(_) => "read",
            Self::Create(_) => "create",
            Self::Update(_) => "update",
            Self::Delete(_) => "delete",
        }
    }

    /// The role the grant applies to.
    #[must_use]
    pub const fn role(&self) -> &Role {
        match self {
            Self::Read(role) | Self::Create(role) | Self::Update(role) | Self::Delete(role) => role,
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(\"{}\")", self.action(), self.role())
    }
}

impl Serialize for Permission {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_tokens() {
        assert_eq!(Role::any().to_string(), "any");
        assert_eq!(Role::user("u1").to_string(), "user:u1");
    }

    #[test]
    fn test_permission_tokens() {
        assert_eq!(Permission::read(Role::any()).to_string(), r#"read("any")"#);
        assert_eq!(
            Permission::create(Role::any()).to_string(),
            r#"create("any")"#
        );
        assert_eq!(
            Permission::update(Role::user("owner-1")).to_string(),
            r#"update("user:owner-1")"#
        );
        assert_eq!(
            Permission::delete(Role::user("owner-1")).to_string(),
            r#"delete("user:owner-1")"#
        );
    }

    #[test]
    fn test_permission_serializes_as_wire_token() {
        let grants = vec![
            Permission::read(Role::any()),
            Permission::update(Role::user("u9")),
        ];
        let json = serde_json::to_string(&grants).unwrap_or_default();
        assert_eq!(json, r#"["read(\"any\")","update(\"user:u9\")"]"#);
    }

    #[test]
    fn test_action_and_role_accessors() {
        let grant = Permission::delete(Role::user("u2"));
        assert_eq!(grant.action(), "delete");
        assert_eq!(grant.role(), &Role::user("u2"));
    }
}
