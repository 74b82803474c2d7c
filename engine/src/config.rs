use serde::Deserialize;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

use readmore_types::{AffordanceColor, TrimMode, TrimPolicy};

/// Overrides `trim.mode` when the config file leaves it unset.
pub const TRIM_MODE_ENV: &str = "READMORE_TRIM_MODE";

#[derive(Debug, Default, Deserialize)]
pub struct ReadMoreConfig {
    pub app: Option<AppConfig>,
    pub trim: Option<TrimConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Use ASCII-only glyphs for focus markers.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
}

/// Trim policy settings.
///
/// ```toml
/// [trim]
/// mode = "lines"
/// max_lines = 2
/// max_length = 240
/// collapsed_text = "Read more"
/// expanded_text = "Read less"
/// show_expanded_text = true
/// color = "#7fb4ca"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct TrimConfig {
    pub mode: Option<TrimMode>,
    pub max_lines: Option<usize>,
    pub max_length: Option<usize>,
    /// Supports `${VAR}` expansion.
    pub collapsed_text: Option<String>,
    /// Supports `${VAR}` expansion.
    pub expanded_text: Option<String>,
    /// Default: true.
    pub show_expanded_text: Option<bool>,
    /// "accent" (default) or "#rrggbb".
    pub color: Option<AffordanceColor>,
}

impl TrimConfig {
    /// Build a policy, filling gaps with widget defaults and the environment.
    #[must_use]
    pub fn to_policy(&self) -> TrimPolicy {
        let env_mode = env::var(TRIM_MODE_ENV).ok();
        self.to_policy_with_env_mode(env_mode.as_deref())
    }

    fn to_policy_with_env_mode(&self, env_mode: Option<&str>) -> TrimPolicy {
        let mut policy = TrimPolicy::default();

        let mode = self.mode.or_else(|| {
            let raw = env_mode?;
            match raw.parse::<TrimMode>() {
                Ok(mode) => Some(mode),
                Err(err) => {
                    tracing::warn!("Ignoring {TRIM_MODE_ENV}: {err}");
                    None
                }
            }
        });
        if let Some(mode) = mode {
            policy = policy.with_mode(mode);
        }
        if let Some(max_lines) = self.max_lines {
            policy = policy.with_max_lines(max_lines);
        }
        if let Some(max_length) = self.max_length {
            policy = policy.with_max_length(max_length);
        }
        if let Some(text) = &self.collapsed_text {
            policy = policy.with_collapsed_text(expand_env_vars(text));
        }
        if let Some(text) = &self.expanded_text {
            policy = policy.with_expanded_text(expand_env_vars(text));
        }
        if let Some(show) = self.show_expanded_text {
            policy = policy.with_show_expanded_affordance(show);
        }
        if let Some(color) = self.color {
            policy = policy.with_affordance_color(color);
        }
        policy
    }
}

pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let var = &after[..end];
        if !var.is_empty() {
            out.push_str(&env::var(var).unwrap_or_default());
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

impl ReadMoreConfig {
    /// Load from the default location. A missing file is `Ok(None)`.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Policy from `[trim]`, or defaults when the table is absent.
    #[must_use]
    pub fn trim_policy(&self) -> TrimPolicy {
        self.trim.as_ref().map_or_else(
            || TrimConfig::default().to_policy(),
            TrimConfig::to_policy,
        )
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".readmore").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use readmore_types::{AffordanceColor, TrimMode, TrimPolicy};

    use super::{ConfigError, ReadMoreConfig, TrimConfig, expand_env_vars};

    // expand_env_vars tests

    #[test]
    fn expand_env_vars_no_vars() {
        assert_eq!(expand_env_vars("Read more"), "Read more");
    }

    #[test]
    fn expand_env_vars_single_var() {
        unsafe {
            std::env::set_var("READMORE_TEST_LABEL", "Mehr");
        }
        assert_eq!(expand_env_vars("${READMORE_TEST_LABEL} lesen"), "Mehr lesen");
        unsafe {
            std::env::remove_var("READMORE_TEST_LABEL");
        }
    }

    #[test]
    fn expand_env_vars_missing_var_becomes_empty() {
        unsafe {
            std::env::remove_var("READMORE_MISSING_FOR_TEST");
        }
        assert_eq!(
            expand_env_vars("before ${READMORE_MISSING_FOR_TEST} after"),
            "before  after"
        );
    }

    #[test]
    fn expand_env_vars_unterminated_is_literal() {
        assert_eq!(expand_env_vars("keep ${OPEN"), "keep ${OPEN");
    }

    #[test]
    fn expand_env_vars_keeps_multibyte_text() {
        assert_eq!(expand_env_vars("Leer más ${}"), "Leer más ");
    }

    // policy construction

    #[test]
    fn empty_trim_table_gives_defaults() {
        let policy = TrimConfig::default().to_policy_with_env_mode(None);
        assert_eq!(policy, TrimPolicy::default());
    }

    #[test]
    fn full_trim_table_overrides_everything() {
        let config: ReadMoreConfig = toml::from_str(
            r##"
            [trim]
            mode = "length"
            max_lines = 4
            max_length = 80
            collapsed_text = "More"
            expanded_text = "Less"
            show_expanded_text = false
            color = "#ff8800"
            "##,
        )
        .unwrap();
        let trim = config.trim.as_ref().unwrap();
        let policy = trim.to_policy_with_env_mode(None);
        assert_eq!(policy.mode(), TrimMode::Length);
        assert_eq!(policy.max_lines(), 4);
        assert_eq!(policy.max_length(), 80);
        assert_eq!(policy.collapsed_text(), "More");
        assert_eq!(policy.expanded_text(), "Less");
        assert!(!policy.show_expanded_affordance());
        assert_eq!(policy.affordance_color(), AffordanceColor::Rgb(0xff, 0x88, 0));
    }

    #[test]
    fn env_mode_applies_only_when_unset() {
        let unset = TrimConfig::default();
        assert_eq!(
            unset.to_policy_with_env_mode(Some("length")).mode(),
            TrimMode::Length
        );

        let set = TrimConfig {
            mode: Some(TrimMode::Lines),
            ..TrimConfig::default()
        };
        assert_eq!(
            set.to_policy_with_env_mode(Some("length")).mode(),
            TrimMode::Lines
        );
    }

    #[test]
    fn invalid_env_mode_is_ignored() {
        let policy = TrimConfig::default().to_policy_with_env_mode(Some("pages"));
        assert_eq!(policy.mode(), TrimMode::Lines);
    }

    #[test]
    fn bad_color_fails_parse() {
        let parsed: Result<ReadMoreConfig, _> = toml::from_str("[trim]\ncolor = \"blue\"\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn app_section_flags() {
        let config: ReadMoreConfig =
            toml::from_str("[app]\nhigh_contrast = true\n").unwrap();
        let app = config.app.unwrap();
        assert!(app.high_contrast);
        assert!(!app.ascii_only);
    }

    // loading

    #[test]
    fn load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = ReadMoreConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[trim]\nmax_lines = 3\n").unwrap();

        let config = ReadMoreConfig::load_from(&path).unwrap().unwrap();
        assert_eq!(config.trim.unwrap().max_lines, Some(3));
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[trim\nmax_lines = ").unwrap();

        let err = ReadMoreConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.path(), &path);
    }

    #[test]
    fn missing_trim_table_uses_defaults() {
        let config: ReadMoreConfig = toml::from_str("").unwrap();
        assert_eq!(config.trim_policy().max_lines(), 2);
    }
}
