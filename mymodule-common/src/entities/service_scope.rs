use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// An isolated site sharing the host deployment, usually backed by its own database.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tenant {
    /// Name of the tenant, unique in a host deployment.
    pub name: String,
}

impl Tenant {
    /// `Tenant` factory
    pub fn new<T: Into<String>>(name: T) -> Self {
        Self { name: name.into() }
    }
}

impl Display for Tenant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The unit of work a service instance is bound to: which tenant it works on and which user
/// it works for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceScope {
    /// Tenant targeted by the operations.
    pub tenant: Tenant,

    /// User issuing the operations, `None` when anonymous.
    pub user: Option<String>,
}

impl ServiceScope {
    /// Scope of an anonymous user on the given tenant.
    pub fn anonymous(tenant: Tenant) -> Self {
        Self { tenant, user: None }
    }

    /// Scope of the given user on the given tenant.
    pub fn for_user<T: Into<String>>(tenant: Tenant, user: T) -> Self {
        Self {
            tenant,
            user: Some(user.into()),
        }
    }
}
