//! Configuration file support for the mdtree tools
//!
//! Loads settings from `_mdtree.toml`. Command-line flags take precedence
//! over the file, and the file over built-in defaults.

use anyhow::{Context, Result};
use mdtree_ast::WrapPolicy;
use mdtree_pandoc::{Format, Pandoc};
use mdtree_probe::ProbeOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "_mdtree.toml";

/// Schema URL for the configuration file
pub const SCHEMA_URL: &str =
    "https://raw.githubusercontent.com/mdtree/mdtree/main/crates/mdtree-cli/schema/mdtree.schema.json";

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// Converter invocation
    #[serde(skip_serializing_if = "PandocConfig::is_empty")]
    pub pandoc: PandocConfig,
    /// JSON output formatting
    #[serde(skip_serializing_if = "OutputConfig::is_empty")]
    pub output: OutputConfig,
    /// Span probe settings
    #[serde(skip_serializing_if = "ProbeConfig::is_empty")]
    pub probe: ProbeConfig,
}

/// Converter invocation configuration
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct PandocConfig {
    /// Path to the pandoc executable (default: $MDTREE_PANDOC, then pandoc on PATH)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<PathBuf>,
    /// Arguments passed before --from/--to on every invocation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_args: Option<Vec<String>>,
    /// Reader format for source text (default: "markdown")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reader: Option<String>,
}

impl PandocConfig {
    fn is_empty(&self) -> bool {
        self.program.is_none() && self.extra_args.is_none() && self.reader.is_none()
    }
}

/// JSON output configuration
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty: Option<bool>,
}

impl OutputConfig {
    fn is_empty(&self) -> bool {
        self.pretty.is_none()
    }
}

/// Span probe configuration
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct ProbeConfig {
    /// Wrap policy: "inline-runs" or "plain-blocks" (default: "inline-runs")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
    /// Formats both trees are rendered to (default: ["markdown", "html"])
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<String>>,
    /// Directory for trees and renderings; nothing is written when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifacts_dir: Option<PathBuf>,
}

impl ProbeConfig {
    fn is_empty(&self) -> bool {
        self.policy.is_none() && self.targets.is_none() && self.artifacts_dir.is_none()
    }
}

impl Config {
    /// Load configuration from a specific file path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Try to load configuration from a directory (looks for `_mdtree.toml`)
    ///
    /// Returns `Ok(None)` if the config file doesn't exist.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Load the explicit config file if given, else `_mdtree.toml` from the
    /// working directory, else defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        match Self::load_from_dir(&cwd)? {
            Some(config) => {
                log::debug!("using {}", cwd.join(CONFIG_FILE_NAME).display());
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Build the converter, preferring `program` over the configured path
    pub fn pandoc(&self, program: Option<&Path>) -> Result<Pandoc> {
        let pandoc = match program.or(self.pandoc.program.as_deref()) {
            Some(path) => Pandoc::new(path),
            None => Pandoc::locate()?,
        };
        Ok(pandoc.with_args(self.pandoc.extra_args.iter().flatten().cloned()))
    }

    /// Reader format, preferring `reader` over the configured one
    pub fn reader(&self, reader: Option<Format>) -> Result<Format> {
        match (reader, &self.pandoc.reader) {
            (Some(format), _) => Ok(format),
            (None, Some(name)) => name
                .parse::<Format>()
                .with_context(|| format!("Invalid reader in config: {name}")),
            (None, None) => Ok(Format::Markdown),
        }
    }

    /// Whether JSON output is pretty-printed when no flag says otherwise
    pub fn pretty(&self) -> bool {
        self.output.pretty.unwrap_or(true)
    }

    /// Probe options from flags, falling back to the config file
    pub fn probe_options(
        &self,
        reader: Option<Format>,
        policy: Option<WrapPolicy>,
        targets: Vec<Format>,
    ) -> Result<ProbeOptions> {
        let defaults = ProbeOptions::default();

        let policy = match (policy, &self.probe.policy) {
            (Some(policy), _) => policy,
            (None, Some(name)) => name
                .parse::<WrapPolicy>()
                .with_context(|| format!("Invalid policy in config: {name}"))?,
            (None, None) => defaults.policy,
        };

        let targets = match (targets.is_empty(), &self.probe.targets) {
            (false, _) => targets,
            (true, Some(names)) => names
                .iter()
                .map(|name| {
                    name.parse::<Format>()
                        .with_context(|| format!("Invalid target in config: {name}"))
                })
                .collect::<Result<_>>()?,
            (true, None) => defaults.targets,
        };

        Ok(ProbeOptions {
            reader: self.reader(reader)?,
            policy,
            targets,
        })
    }

    /// Generate JSON schema for the configuration
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Generate JSON schema as a string
    pub fn json_schema_string() -> Result<String> {
        let schema = Self::json_schema();
        serde_json::to_string_pretty(&schema).context("Failed to serialize JSON schema")
    }

    /// Serialize configuration to TOML string with schema directive
    pub fn to_toml_with_schema(&self) -> Result<String> {
        let toml_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        Ok(format!("#:schema {}\n\n{}", SCHEMA_URL, toml_content))
    }

    /// Create a sample configuration with common defaults for init command
    pub fn sample() -> Self {
        Config {
            pandoc: PandocConfig {
                program: None, // $MDTREE_PANDOC or PATH
                extra_args: None,
                reader: Some("markdown".to_string()),
            },
            output: OutputConfig { pretty: Some(true) },
            probe: ProbeConfig {
                policy: Some("inline-runs".to_string()),
                targets: Some(vec!["markdown".to_string(), "html".to_string()]),
                artifacts_dir: None, // print only
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.pandoc.program.is_none());
        assert!(config.output.pretty.is_none());
        assert!(config.pretty());
    }

    #[test]
    fn test_parse_pandoc_section() {
        let config: Config = toml::from_str(
            r#"
            [pandoc]
            program = "/opt/pandoc/bin/pandoc"
            extra_args = ["--wrap=none", "--columns=72"]
            reader = "commonmark_x"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.pandoc.program,
            Some(PathBuf::from("/opt/pandoc/bin/pandoc"))
        );
        assert_eq!(
            config.pandoc.extra_args,
            Some(vec!["--wrap=none".to_string(), "--columns=72".to_string()])
        );
        assert_eq!(config.reader(None).unwrap(), Format::CommonMarkX);
    }

    #[test]
    fn test_parse_probe_section() {
        let config: Config = toml::from_str(
            r#"
            [probe]
            policy = "plain-blocks"
            targets = ["gfm", "html"]
            artifacts_dir = "probe-output"
            "#,
        )
        .unwrap();

        let options = config.probe_options(None, None, Vec::new()).unwrap();
        assert_eq!(options.policy, WrapPolicy::PlainBlocks);
        assert_eq!(options.targets, vec![Format::Gfm, Format::Html]);
        assert_eq!(options.reader, Format::Markdown);
        assert_eq!(
            config.probe.artifacts_dir,
            Some(PathBuf::from("probe-output"))
        );
    }

    #[test]
    fn test_flags_override_config() {
        let config: Config = toml::from_str(
            r#"
            [pandoc]
            reader = "gfm"

            [output]
            pretty = false

            [probe]
            policy = "plain-blocks"
            targets = ["gfm"]
            "#,
        )
        .unwrap();

        assert!(!config.pretty());
        let options = config
            .probe_options(
                Some(Format::Markdown),
                Some(WrapPolicy::InlineRuns),
                vec![Format::Html],
            )
            .unwrap();
        assert_eq!(options.reader, Format::Markdown);
        assert_eq!(options.policy, WrapPolicy::InlineRuns);
        assert_eq!(options.targets, vec![Format::Html]);
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let config: Config = toml::from_str(
            r#"
            [probe]
            policy = "everything"
            "#,
        )
        .unwrap();
        let err = config.probe_options(None, None, Vec::new()).unwrap_err();
        assert!(err.to_string().contains("Invalid policy in config: everything"));

        let config: Config = toml::from_str(
            r#"
            [pandoc]
            reader = "not a format"
            "#,
        )
        .unwrap();
        assert!(config.reader(None).is_err());
    }

    #[test]
    fn test_explicit_program_and_args() {
        let config: Config = toml::from_str(
            r#"
            [pandoc]
            program = "/usr/local/bin/pandoc"
            extra_args = ["--wrap=none"]
            "#,
        )
        .unwrap();

        let pandoc = config.pandoc(None).unwrap();
        assert_eq!(pandoc.program(), Path::new("/usr/local/bin/pandoc"));

        let pandoc = config.pandoc(Some(Path::new("/bin/other"))).unwrap();
        assert_eq!(pandoc.program(), Path::new("/bin/other"));
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from_dir(dir.path()).unwrap().is_none());

        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[output]\npretty = false\n",
        )
        .unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap().unwrap();
        assert_eq!(config.output.pretty, Some(false));
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[output]\npretty = \"yes\"\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse config file"));
    }

    #[test]
    fn test_serialize_empty_config() {
        let config = Config::default();
        let toml = config.to_toml_with_schema().unwrap();
        assert!(toml.starts_with("#:schema"));
        // Empty config should have minimal content
        assert!(!toml.contains("[pandoc]"));
    }

    #[test]
    fn test_serialize_sample_config() {
        let config = Config::sample();
        let toml = config.to_toml_with_schema().unwrap();
        assert!(toml.starts_with("#:schema"));
        assert!(toml.contains("[probe]"));
        assert!(toml.contains("policy = \"inline-runs\""));
    }

    #[test]
    fn test_json_schema_generation() {
        let schema = Config::json_schema_string().unwrap();
        assert!(schema.contains("\"title\""));
        assert!(schema.contains("ProbeConfig"));
    }

    #[test]
    fn test_roundtrip() {
        let config = Config::sample();
        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(config.probe.targets, parsed.probe.targets);
        assert_eq!(config.output.pretty, parsed.output.pretty);
    }
}
