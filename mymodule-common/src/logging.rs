//! Logging helpers shared by the MyModule crates.

use slog::Logger;

/// Extension trait for `slog::Logger`
pub trait LoggerExtensions {
    /// Child logger tagged with the short type name of `T` under the `src` key.
    fn new_with_component_name<T>(&self) -> Self;

    /// Child logger tagged with the given name under the `src` key.
    fn new_with_name(&self, name: &str) -> Self;
}

impl LoggerExtensions for Logger {
    fn new_with_component_name<T>(&self) -> Self {
        self.new_with_name(short_type_name::<T>())
    }

    fn new_with_name(&self, name: &str) -> Self {
        self.new(slog::o!("src" => name.to_owned()))
    }
}

/// Type name of `T` stripped from its module path and its generic parameters.
fn short_type_name<T>() -> &'static str {
    let full_name = std::any::type_name::<T>();
    let base_name = full_name.split('<').next().unwrap_or(full_name);

    base_name.rsplit("::").next().unwrap_or(base_name)
}

#[cfg(test)]
mod tests {
    use slog::info;

    use crate::test_utils::{TempDir, TestLogger};

    use super::*;

    struct Component;
    struct GenericComponent<T>(std::marker::PhantomData<T>);

    mod nested {
        pub enum NestedComponent {}
    }

    #[test]
    fn short_type_name_drops_module_path_and_generics() {
        assert_eq!("Component", short_type_name::<Component>());
        assert_eq!("NestedComponent", short_type_name::<nested::NestedComponent>());
        assert_eq!(
            "GenericComponent",
            short_type_name::<GenericComponent<nested::NestedComponent>>()
        );
        assert_eq!("GenericComponent", short_type_name::<GenericComponent<&str>>());
    }

    #[test]
    fn child_logger_carries_component_name() {
        let log_path = TempDir::create("common_logging", "child_logger_carries_component_name")
            .join("test.log");
        {
            let logger = TestLogger::file(&log_path).new_with_component_name::<Component>();
            info!(logger, "Hello from component");
        }

        let logs = std::fs::read_to_string(&log_path).unwrap();
        assert!(
            logs.contains("src") && logs.contains("Component"),
            "logs should carry the component name, logs:\n{logs}"
        );
    }

    #[test]
    fn child_logger_carries_given_name() {
        let log_path =
            TempDir::create("common_logging", "child_logger_carries_given_name").join("test.log");
        {
            let logger = TestLogger::file(&log_path).new_with_name("records store");
            info!(logger, "Hello from store");
        }

        let logs = std::fs::read_to_string(&log_path).unwrap();
        assert!(
            logs.contains("records store"),
            "logs should carry the given name, logs:\n{logs}"
        );
    }
}
