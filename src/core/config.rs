use crate::core::errors::{Error, Result};
use crate::models::level_spec::LevelSpec;
use serde::{Deserialize, Serialize};

/// Options that must be present in every plugin definition.
pub const MANDATORY_OPTIONS: [&str; 2] = ["levels", "topdir"];

/// Keys consumed by the host's plugin loader rather than by the plugin.
const LOADER_KEYS: [&str; 2] = ["module_path", "module_name"];

/// Effective configuration of one generation job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginOptions {
    pub levels: LevelSpec,
    pub topdir: String,
    /// Pins the random sequence; `None` seeds from the OS entropy source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl PluginOptions {
    pub fn new(levels: LevelSpec, topdir: impl Into<String>) -> Self {
        Self {
            levels,
            topdir: topdir.into(),
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parses a plugin definition such as
    /// `python:module_name=gen-random-files:levels=1,2,3,4:topdir=/bench`.
    pub fn parse(plugindef: &str) -> Result<Self> {
        Self::parse_with_overrides(plugindef, &[])
    }

    /// Like [`PluginOptions::parse`], but `overrides` win over the definition.
    /// Override values are taken verbatim, so they may contain `:`.
    pub fn parse_with_overrides<'a>(
        plugindef: &'a str,
        overrides: &[(&'a str, &'a str)],
    ) -> Result<Self> {
        let mut levels = None;
        let mut topdir = None;
        let mut seed = None;

        let tokens = plugindef.split(':').filter_map(|token| match token.split_once('=') {
            Some((key, value)) if !value.is_empty() => Some((key.trim(), value)),
            _ => None,
        });
        for (key, value) in tokens.chain(overrides.iter().copied()) {
            if LOADER_KEYS.contains(&key) {
                continue;
            }
            match key {
                "levels" => levels = Some(value.to_string()),
                "topdir" => topdir = Some(value.to_string()),
                "seed" => seed = Some(value.to_string()),
                _ => tracing::debug!("Ignoring unknown plugin option {}={}", key, value),
            }
        }

        let missing: Vec<&str> = MANDATORY_OPTIONS
            .iter()
            .zip([levels.is_none(), topdir.is_none()])
            .filter_map(|(name, absent)| absent.then_some(*name))
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingOptions(missing.join(", ")));
        }

        let mut options = Self::new(
            levels.unwrap_or_default().parse::<LevelSpec>()?,
            topdir.unwrap_or_default(),
        );
        if let Some(seed) = seed {
            options.seed = Some(
                seed.trim()
                    .parse()
                    .map_err(|e| Error::invalid_option("seed", format!("'{seed}': {e}")))?,
            );
        }
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if self.topdir.trim().is_empty() {
            return Err(Error::invalid_option("topdir", "must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_plugin_definition() {
        let options = PluginOptions::parse(
            "python:module_path=/usr/lib/plugins:module_name=bareos-fd-gen-random-files:levels=2,3,4,5:topdir=/bench",
        )
        .unwrap();

        assert_eq!(options.levels, LevelSpec::new(2, 3, 4, 5));
        assert_eq!(options.topdir, "/bench");
        assert_eq!(options.seed, None);
    }

    #[test]
    fn parses_optional_seed() {
        let options = PluginOptions::parse("levels=1,1,1,1:topdir=/t:seed=99").unwrap();
        assert_eq!(options.seed, Some(99));
    }

    #[test]
    fn reports_every_missing_mandatory_option() {
        let err = PluginOptions::parse("python:module_name=x").unwrap_err();
        assert_eq!(err, Error::MissingOptions("levels, topdir".to_string()));

        let err = PluginOptions::parse("levels=1,1,1,1").unwrap_err();
        assert_eq!(err, Error::MissingOptions("topdir".to_string()));
    }

    #[test]
    fn empty_values_count_as_missing() {
        let err = PluginOptions::parse("levels=:topdir=/t").unwrap_err();
        assert_eq!(err, Error::MissingOptions("levels".to_string()));
    }

    #[test]
    fn malformed_levels_name_the_option() {
        let err = PluginOptions::parse("levels=1,2:topdir=/t").unwrap_err();
        assert!(err.to_string().contains("'levels'"), "{err}");
    }

    #[test]
    fn malformed_seed_names_the_option() {
        let err = PluginOptions::parse("levels=1,1,1,1:topdir=/t:seed=abc").unwrap_err();
        assert!(err.to_string().contains("'seed'"), "{err}");
    }

    #[test]
    fn blank_topdir_is_rejected() {
        let err = PluginOptions::parse("levels=1,1,1,1:topdir=  ").unwrap_err();
        assert!(err.to_string().contains("'topdir'"), "{err}");
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let options = PluginOptions::parse("levels=0,0,0,0:topdir=/t:filesize=10").unwrap();
        assert_eq!(options, PluginOptions::new(LevelSpec::default(), "/t"));
    }

    #[test]
    fn overrides_win_and_keep_colons() {
        let options = PluginOptions::parse_with_overrides(
            "levels=1,1,1,1:topdir=/a",
            &[("topdir", "/mnt/c:/bench"), ("levels", "2,0,0,0")],
        )
        .unwrap();
        assert_eq!(options.topdir, "/mnt/c:/bench");
        assert_eq!(options.levels, LevelSpec::new(2, 0, 0, 0));
    }

    #[test]
    fn overrides_supply_missing_mandatory_options() {
        let options =
            PluginOptions::parse_with_overrides("python:levels=1,2,3,4", &[("topdir", "/x:y")]).unwrap();
        assert_eq!(options.topdir, "/x:y");
    }

    #[test]
    fn options_round_trip_through_json() {
        let options = PluginOptions::new(LevelSpec::new(1, 2, 3, 4), "/bench").with_seed(5);
        let json = serde_json::to_string(&options).unwrap();
        let back: PluginOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }
}
