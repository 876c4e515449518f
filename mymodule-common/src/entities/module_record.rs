use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a [ModuleRecord], assigned by the database.
pub type RecordId = i64;

/// Identifier of the host container (module instance) owning records.
pub type ContainerId = i64;

/// Audit attributes stamped on every persisted record by host convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditInfo {
    /// Identity of the user who created the record.
    pub created_by: Option<String>,

    /// Date and time when the record was created.
    pub created_on: DateTime<Utc>,

    /// Identity of the user who last modified the record.
    pub modified_by: Option<String>,

    /// Date and time when the record was last modified.
    pub modified_on: DateTime<Utc>,

    /// Soft-delete flag.
    pub is_deleted: bool,
}

impl AuditInfo {
    /// Audit attributes of a record created now by the given user.
    pub fn created_by<T: Into<String>>(user: Option<T>, now: DateTime<Utc>) -> Self {
        let user = user.map(Into::into);

        Self {
            created_by: user.clone(),
            created_on: now,
            modified_by: user,
            modified_on: now,
            is_deleted: false,
        }
    }
}

/// A record of the module, owned by a host container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    /// Surrogate key, immutable once assigned.
    pub id: RecordId,

    /// Container owning this record.
    pub container_id: ContainerId,

    /// Free text name.
    pub name: Option<String>,

    /// Host audit attributes.
    pub audit: AuditInfo,
}

impl ModuleRecord {
    /// Return a copy of this record with its name replaced.
    pub fn with_name<T: Into<String>>(mut self, name: Option<T>) -> Self {
        self.name = name.map(Into::into);
        self
    }

    /// Check that both records carry the same business fields, ignoring the id and the audit
    /// attributes.
    pub fn has_same_content(&self, other: &Self) -> bool {
        self.container_id == other.container_id && self.name == other.name
    }
}

/// Data needed to create a new [ModuleRecord].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewModuleRecord {
    /// Container the record will belong to.
    pub container_id: ContainerId,

    /// Free text name.
    pub name: Option<String>,
}

impl NewModuleRecord {
    /// `NewModuleRecord` factory
    pub fn new<T: Into<String>>(container_id: ContainerId, name: Option<T>) -> Self {
        Self {
            container_id,
            name: name.map(Into::into),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn record(id: RecordId, container_id: ContainerId, name: Option<&str>) -> ModuleRecord {
        ModuleRecord {
            id,
            container_id,
            name: name.map(str::to_string),
            audit: AuditInfo::created_by(Some("admin"), Utc.timestamp_opt(1_700_000_000, 0).unwrap()),
        }
    }

    #[test]
    fn created_audit_stamps_creator_as_modifier() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

        let audit = AuditInfo::created_by(Some("admin"), now);

        assert_eq!(Some("admin".to_string()), audit.created_by);
        assert_eq!(audit.created_by, audit.modified_by);
        assert_eq!(now, audit.created_on);
        assert_eq!(now, audit.modified_on);
        assert!(!audit.is_deleted);
    }

    #[test]
    fn same_content_ignores_id_and_audit() {
        let mut other = record(2, 42, Some("Alpha"));
        other.audit.modified_by = Some("someone else".to_string());

        assert!(record(1, 42, Some("Alpha")).has_same_content(&other));
        assert!(!record(1, 42, Some("Alpha")).has_same_content(&record(1, 42, Some("Beta"))));
        assert!(!record(1, 42, Some("Alpha")).has_same_content(&record(1, 43, Some("Alpha"))));
    }

    #[test]
    fn with_name_replaces_name_only() {
        let original = record(1, 42, Some("Alpha"));

        let renamed = original.clone().with_name(Some("Beta"));

        assert_eq!(Some("Beta".to_string()), renamed.name);
        assert_eq!(original.id, renamed.id);
        assert_eq!(original.audit, renamed.audit);
    }
}
