//! Tenant naming policies.
//!
//! The module only knows logical table names (ie: `TheCompanyMyModule`). The physical name of a
//! table in a tenant database is computed by a [TableNamePolicy] every time a statement is built,
//! so nothing ties a physical name to a tenant outside of the statement using it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use mymodule_common::entities::Tenant;

/// Turns a logical table name into the physical name used in a tenant database.
pub trait TableNamePolicy: Send + Sync {
    /// Physical name of the given logical table for the given tenant
    fn physical_name(&self, tenant: &Tenant, logical_name: &str) -> String;
}

/// Physical names are the logical names, used when every tenant has its own database.
#[derive(Debug, Default, Clone, Copy)]
pub struct VerbatimTableNames;

impl TableNamePolicy for VerbatimTableNames {
    fn physical_name(&self, _tenant: &Tenant, logical_name: &str) -> String {
        logical_name.to_string()
    }
}

/// Physical names are prefixed with the tenant name, used when tenants share a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct TenantPrefixedTableNames;

impl TableNamePolicy for TenantPrefixedTableNames {
    fn physical_name(&self, tenant: &Tenant, logical_name: &str) -> String {
        format!("{}_{logical_name}", tenant.name)
    }
}

/// Configuration value selecting a [TableNamePolicy].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableNaming {
    /// [VerbatimTableNames]
    #[default]
    Verbatim,

    /// [TenantPrefixedTableNames]
    TenantPrefix,
}

impl TableNaming {
    /// Build the policy selected by this value
    pub fn policy(&self) -> Arc<dyn TableNamePolicy> {
        match self {
            Self::Verbatim => Arc::new(VerbatimTableNames),
            Self::TenantPrefix => Arc::new(TenantPrefixedTableNames),
        }
    }
}

/// Quote an identifier so it can be used as is in a SQL statement.
pub fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbatim_names_ignore_the_tenant() {
        let name = VerbatimTableNames.physical_name(&Tenant::new("main"), "TheCompanyMyModule");

        assert_eq!("TheCompanyMyModule", name);
    }

    #[test]
    fn prefixed_names_differ_per_tenant() {
        let policy = TenantPrefixedTableNames;

        assert_eq!(
            "alpha_TheCompanyMyModule",
            policy.physical_name(&Tenant::new("alpha"), "TheCompanyMyModule")
        );
        assert_eq!(
            "beta_TheCompanyMyModule",
            policy.physical_name(&Tenant::new("beta"), "TheCompanyMyModule")
        );
    }

    #[test]
    fn table_naming_selects_its_policy() {
        let tenant = Tenant::new("alpha");

        assert_eq!("Module", TableNaming::Verbatim.policy().physical_name(&tenant, "Module"));
        assert_eq!(
            "alpha_Module",
            TableNaming::TenantPrefix.policy().physical_name(&tenant, "Module")
        );
    }

    #[test]
    fn table_naming_deserializes_from_snake_case() {
        let naming: TableNaming = serde_json::from_str(r#""tenant_prefix""#).unwrap();

        assert_eq!(TableNaming::TenantPrefix, naming);
    }

    #[test]
    fn quote_identifier_escapes_quotes() {
        assert_eq!(r#""Module""#, quote_identifier("Module"));
        assert_eq!(r#""odd""name""#, quote_identifier(r#"odd"name"#));
    }
}
