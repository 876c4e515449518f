use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::{Context, anyhow};

use mymodule_common::{StdError, StdResult};

/// Identity of a schema migration: `<package>.<major>.<minor>.<patch>.<build>`, ie:
/// `TheCompany.Module.MyModule.01.00.00.00`.
///
/// Version numbers are written with two digits. Migrations are ordered by package, then by
/// version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MigrationId {
    package: String,
    version: [u8; 4],
}

impl MigrationId {
    /// `MigrationId` factory, fails if the package is empty or if a number exceeds two digits
    pub fn new<T: Into<String>>(
        package: T,
        major: u8,
        minor: u8,
        patch: u8,
        build: u8,
    ) -> StdResult<Self> {
        let package = package.into();
        if package.is_empty() || package.starts_with('.') || package.ends_with('.') {
            return Err(anyhow!("Invalid migration package '{package}'"));
        }
        let version = [major, minor, patch, build];
        if let Some(number) = version.iter().find(|number| **number > 99) {
            return Err(anyhow!("Migration version numbers have two digits, got '{number}'"));
        }

        Ok(Self { package, version })
    }

    /// Package the migration belongs to
    pub fn package(&self) -> &str {
        &self.package
    }

    /// `[major, minor, patch, build]`
    pub fn version(&self) -> [u8; 4] {
        self.version
    }

    /// Parse an identifier, the exact inverse of its string representation
    pub fn parse(id: &str) -> StdResult<Self> {
        let segments: Vec<&str> = id.rsplitn(5, '.').collect();
        let [build, patch, minor, major, package] = segments[..] else {
            return Err(anyhow!(
                "Migration id '{id}' must be formatted '<package>.<major>.<minor>.<patch>.<build>'"
            ));
        };

        let parse_number = |segment: &str| -> StdResult<u8> {
            if segment.len() != 2 || !segment.bytes().all(|b| b.is_ascii_digit()) {
                return Err(anyhow!("'{segment}' is not a two digits number"));
            }
            Ok(segment.parse()?)
        };

        Self::new(
            package,
            parse_number(major)?,
            parse_number(minor)?,
            parse_number(patch)?,
            parse_number(build)?,
        )
        .with_context(|| format!("Invalid migration id '{id}'"))
    }
}

impl Display for MigrationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let [major, minor, patch, build] = self.version;
        write!(f, "{}.{major:02}.{minor:02}.{patch:02}.{build:02}", self.package)
    }
}

impl FromStr for MigrationId {
    type Err = StdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_pads_numbers_with_two_digits() {
        let id = MigrationId::new("TheCompany.Module.MyModule", 1, 0, 0, 0).unwrap();

        assert_eq!("TheCompany.Module.MyModule.01.00.00.00", id.to_string());
    }

    #[test]
    fn parse_then_format_gives_back_the_id() {
        let id = MigrationId::parse("TheCompany.Module.MyModule.01.02.10.99").unwrap();

        assert_eq!("TheCompany.Module.MyModule", id.package());
        assert_eq!([1, 2, 10, 99], id.version());
        assert_eq!("TheCompany.Module.MyModule.01.02.10.99", id.to_string());
    }

    #[test]
    fn parse_rejects_malformed_ids() {
        for id in [
            "",
            "01.00.00.00",
            "Package.1.00.00.00",
            "Package.01.00.00",
            "Package.01.00.00.0a",
            "Package.01.00.00.100",
            ".01.00.00.00",
        ] {
            MigrationId::parse(id).expect_err(&format!("'{id}' should be rejected"));
        }
    }

    #[test]
    fn new_rejects_three_digits_numbers() {
        MigrationId::new("Package", 100, 0, 0, 0).expect_err("100 has three digits");
    }

    #[test]
    fn ids_are_ordered_by_package_then_version() {
        let mut ids = vec![
            MigrationId::parse("B.01.00.00.00").unwrap(),
            MigrationId::parse("A.02.00.00.00").unwrap(),
            MigrationId::parse("A.01.10.00.00").unwrap(),
            MigrationId::parse("A.01.02.00.00").unwrap(),
        ];

        ids.sort();

        assert_eq!(
            vec!["A.01.02.00.00", "A.01.10.00.00", "A.02.00.00.00", "B.01.00.00.00"],
            ids.iter().map(ToString::to_string).collect::<Vec<_>>()
        );
    }
}
