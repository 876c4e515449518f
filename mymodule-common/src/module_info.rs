//! Module descriptor read by the host at startup to discover and wire the module.

use anyhow::{Context, anyhow};
use semver::Version;
use serde::{Deserialize, Serialize};

use crate::StdResult;

/// Package identity of the module, prefix of all its migration identifiers.
pub const MY_MODULE_PACKAGE_NAME: &str = "TheCompany.Module.MyModule";

/// Fully qualified name of the type managing the module on the server side.
pub const MY_MODULE_SERVER_MANAGER_TYPE: &str = "mymodule_server::manager::MyModuleManager";

/// Static description of a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDefinition {
    /// Display name of the module
    pub name: String,

    /// Human readable description
    pub description: String,

    /// Current version, semver formatted
    pub version: String,

    /// Fully qualified name of the server side manager
    pub server_manager_type: String,

    /// Comma separated list of every version released so far
    pub release_versions: String,

    /// Comma separated list of the packages this module depends on
    pub dependencies: String,

    /// Package identity
    pub package_name: String,
}

impl ModuleDefinition {
    /// Parsed current version
    pub fn parsed_version(&self) -> StdResult<Version> {
        Version::parse(&self.version)
            .with_context(|| format!("Invalid version '{}' for module '{}'", self.version, self.name))
    }

    /// Parsed release versions, in declaration order
    pub fn parsed_release_versions(&self) -> StdResult<Vec<Version>> {
        split_list(&self.release_versions)
            .map(|version| {
                Version::parse(version).with_context(|| {
                    format!("Invalid release version '{version}' for module '{}'", self.name)
                })
            })
            .collect()
    }

    /// Dependencies, in declaration order
    pub fn dependency_list(&self) -> Vec<&str> {
        split_list(&self.dependencies).collect()
    }

    /// Check that the versions are well formed and that the current version was released
    pub fn validate(&self) -> StdResult<()> {
        if self.name.trim().is_empty() {
            return Err(anyhow!("Module name must not be empty"));
        }
        if self.package_name.trim().is_empty() {
            return Err(anyhow!("Package name of module '{}' must not be empty", self.name));
        }

        let version = self.parsed_version()?;
        let release_versions = self.parsed_release_versions()?;
        if !release_versions.contains(&version) {
            return Err(anyhow!(
                "Version '{version}' of module '{}' is not listed in its release versions '{}'",
                self.name,
                self.release_versions
            ));
        }

        Ok(())
    }
}

fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|item| !item.is_empty())
}

/// Implemented by every module to expose its descriptor to the host.
pub trait ModuleInfo: Send + Sync {
    /// The descriptor of the module
    fn module_definition(&self) -> ModuleDefinition;
}

/// Descriptor of MyModule
#[derive(Debug, Default, Clone, Copy)]
pub struct MyModuleInfo;

impl ModuleInfo for MyModuleInfo {
    fn module_definition(&self) -> ModuleDefinition {
        ModuleDefinition {
            name: "MyModule".to_string(),
            description: "The Company MyModule module".to_string(),
            version: "1.0.0".to_string(),
            server_manager_type: MY_MODULE_SERVER_MANAGER_TYPE.to_string(),
            release_versions: "1.0.0".to_string(),
            dependencies: "mymodule-common".to_string(),
            package_name: MY_MODULE_PACKAGE_NAME.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition() -> ModuleDefinition {
        MyModuleInfo.module_definition()
    }

    #[test]
    fn my_module_descriptor_is_valid() {
        let definition = definition();

        definition.validate().unwrap();
        assert_eq!("MyModule", definition.name);
        assert_eq!(Version::new(1, 0, 0), definition.parsed_version().unwrap());
        assert_eq!(vec!["mymodule-common"], definition.dependency_list());
        assert_eq!(MY_MODULE_PACKAGE_NAME, definition.package_name);
    }

    #[test]
    fn release_versions_and_dependencies_are_trimmed() {
        let definition = ModuleDefinition {
            release_versions: " 0.9.0, 1.0.0 ,".to_string(),
            dependencies: "first , second,,".to_string(),
            ..definition()
        };

        assert_eq!(
            vec![Version::new(0, 9, 0), Version::new(1, 0, 0)],
            definition.parsed_release_versions().unwrap()
        );
        assert_eq!(vec!["first", "second"], definition.dependency_list());
    }

    #[test]
    fn validate_fails_when_version_is_not_released() {
        let definition = ModuleDefinition {
            version: "1.1.0".to_string(),
            ..definition()
        };

        definition
            .validate()
            .expect_err("An unreleased version should be rejected");
    }

    #[test]
    fn validate_fails_on_malformed_version() {
        let definition = ModuleDefinition {
            version: "one".to_string(),
            ..definition()
        };

        definition
            .validate()
            .expect_err("A malformed version should be rejected");
    }

    #[test]
    fn validate_fails_on_empty_package_name() {
        let definition = ModuleDefinition {
            package_name: " ".to_string(),
            ..definition()
        };

        definition
            .validate()
            .expect_err("An empty package name should be rejected");
    }
}
