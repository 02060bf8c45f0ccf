//! Connection options

use std::env;

use crate::ffi;

/// Environment variable holding a colon-separated list of library names
/// to try instead of the built-in ones
pub const LIBRARY_ENV: &str = "XLIBWRAP_LIBRARY";

/// Environment variable turning on synchronous mode when set to a true value
pub const SYNC_ENV: &str = "XLIBWRAP_SYNC";

/// How [`Display::open_with`](super::Display::open_with) connects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectOptions {
    /// Display name; `None` uses `$DISPLAY`
    pub display_name: Option<String>,
    /// Shared library names tried in order
    pub library_names: Vec<String>,
    /// Report protocol errors at the request that caused them
    pub synchronous: bool,
    /// Call XInitThreads before connecting
    pub init_threads: bool,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        ConnectOptions {
            display_name: None,
            library_names: ffi::DEFAULT_LIBRARY_NAMES
                .iter()
                .map(|name| name.to_string())
                .collect(),
            synchronous: false,
            init_threads: false,
        }
    }
}

impl ConnectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `XLIBWRAP_LIBRARY` and `XLIBWRAP_SYNC`
    pub fn from_env() -> Self {
        Self::from_vars(env::var(LIBRARY_ENV).ok(), env::var(SYNC_ENV).ok())
    }

    fn from_vars(library: Option<String>, sync: Option<String>) -> Self {
        let mut options = Self::default();
        if let Some(list) = library {
            let names: Vec<String> = list
                .split(':')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(String::from)
                .collect();
            if names.is_empty() {
                log::warn!("{} is set but names no library, using defaults", LIBRARY_ENV);
            } else {
                options.library_names = names;
            }
        }
        if let Some(value) = sync {
            options.synchronous = parse_flag(&value);
        }
        options
    }

    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn library_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.library_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn synchronous(mut self, on: bool) -> Self {
        self.synchronous = on;
        self
    }

    pub fn init_threads(mut self, on: bool) -> Self {
        self.init_threads = on;
        self
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ConnectOptions::new();
        assert_eq!(options.display_name, None);
        assert!(!options.synchronous);
        assert!(!options.init_threads);
        assert_eq!(options.library_names.len(), ffi::DEFAULT_LIBRARY_NAMES.len());
    }

    #[test]
    fn test_builder() {
        let options = ConnectOptions::new()
            .display_name(":1")
            .library_names(["libX11.so.6"])
            .synchronous(true)
            .init_threads(true);
        assert_eq!(options.display_name.as_deref(), Some(":1"));
        assert_eq!(options.library_names, vec!["libX11.so.6".to_string()]);
        assert!(options.synchronous);
        assert!(options.init_threads);
    }

    #[test]
    fn test_environment_values() {
        let options = ConnectOptions::from_vars(
            Some("libfoo.so: libX11.so.6 ".to_string()),
            Some("Yes".to_string()),
        );
        assert_eq!(options.library_names, vec!["libfoo.so", "libX11.so.6"]);
        assert!(options.synchronous);

        let options = ConnectOptions::from_vars(Some("::".to_string()), Some("0".to_string()));
        assert_eq!(options, ConnectOptions::default());
    }
}
