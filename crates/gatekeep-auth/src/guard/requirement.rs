//! Role requirements checked by the last gate.

use std::fmt;

use gatekeep_entity::user::UserRole;

/// What role an operation demands of an authenticated, active subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleRequirement {
    /// Any role is enough.
    AnyAuthenticated,
    /// The role's privilege must be at least this one's.
    AtLeast(UserRole),
    /// The role must be one of these.
    OneOf(Vec<UserRole>),
}

impl RoleRequirement {
    /// Admins only.
    pub fn admin_only() -> Self {
        Self::OneOf(vec![UserRole::Admin])
    }

    /// Moderators and admins.
    pub fn moderator_or_above() -> Self {
        Self::AtLeast(UserRole::Moderator)
    }

    /// Checks whether `role` satisfies the requirement.
    pub fn is_satisfied_by(&self, role: UserRole) -> bool {
        match self {
            Self::AnyAuthenticated => true,
            Self::AtLeast(minimum) => role.has_at_least(minimum),
            Self::OneOf(allowed) => allowed.contains(&role),
        }
    }
}

impl fmt::Display for RoleRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnyAuthenticated => write!(f, "any authenticated user"),
            Self::AtLeast(role) => write!(f, "at least '{role}'"),
            Self::OneOf(roles) => {
                let names: Vec<&str> = roles.iter().map(UserRole::as_str).collect();
                write!(f, "one of [{}]", names.join(", "))
            }
        }
    }
}
