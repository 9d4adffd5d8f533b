//! Catalogue settings loaded via OrthoConfig.
//!
//! Values are layered from defaults, configuration files, `ROBOT_CATALOG_*`
//! environment variables and command-line flags.

use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::token::DEFAULT_AVATAR_BASE;

/// Configuration values for creating robots.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ROBOT_CATALOG")]
pub struct CatalogSettings {
    /// Base URL that avatar tokens are appended to.
    pub avatar_base_url: Option<String>,
    /// Country lookup JSON replacing the bundled table.
    pub countries_path: Option<PathBuf>,
    /// Seed for reproducible avatar tokens.
    pub token_seed: Option<u64>,
}

impl CatalogSettings {
    /// Returns the configured avatar base, falling back to the default
    /// service.
    #[must_use]
    pub fn avatar_base_url(&self) -> &str {
        self.avatar_base_url
            .as_deref()
            .unwrap_or(DEFAULT_AVATAR_BASE)
    }

    /// Returns the configured country lookup path, if any.
    #[must_use]
    pub fn countries_path(&self) -> Option<&Path> {
        self.countries_path.as_deref()
    }

    /// Returns the configured token seed, if any.
    #[must_use]
    pub const fn token_seed(&self) -> Option<u64> {
        self.token_seed
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings layering.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> CatalogSettings {
        CatalogSettings::load_from_iter([OsString::from("robot-create")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("ROBOT_CATALOG_AVATAR_BASE_URL", None::<String>),
            ("ROBOT_CATALOG_COUNTRIES_PATH", None::<String>),
            ("ROBOT_CATALOG_TOKEN_SEED", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.avatar_base_url(), DEFAULT_AVATAR_BASE);
        assert!(settings.countries_path().is_none());
        assert!(settings.token_seed().is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "ROBOT_CATALOG_AVATAR_BASE_URL",
                Some("https://avatars.example.com/bots/".to_owned()),
            ),
            (
                "ROBOT_CATALOG_COUNTRIES_PATH",
                Some("/tmp/countries.json".to_owned()),
            ),
            ("ROBOT_CATALOG_TOKEN_SEED", Some("99".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.avatar_base_url(),
            "https://avatars.example.com/bots/"
        );
        assert_eq!(
            settings.countries_path(),
            Some(Path::new("/tmp/countries.json"))
        );
        assert_eq!(settings.token_seed(), Some(99));
    }
}
