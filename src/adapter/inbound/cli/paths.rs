//! Default file locations, relative to the working directory.

use std::path::PathBuf;

/// Default config file path (`./config.toml`).
pub fn default_config() -> PathBuf {
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_is_relative_to_cwd() {
        assert!(default_config().is_relative());
        assert_eq!(default_config().file_name().unwrap(), "config.toml");
    }
}
