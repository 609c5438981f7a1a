//! User configuration, read from `assurance.yaml`.
//!
//! ```yaml
//! color: auto        # auto | always | never
//! log: debug         # tracing filter, overridden by ASSURANCE_LOG
//! theme:
//!   keyword: magenta
//!   identifier: cyan
//!   string: green
//!   comment: "128,128,128"
//!   invalid: red
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use termcolor::{Color, ColorChoice};

use crate::errors::AssuranceError;
use crate::highlight::HighlightCategory;

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "assurance.yaml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub color: ColorMode,
    pub log: Option<String>,
    pub theme: Theme,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn choice(self) -> ColorChoice {
        match self {
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
            ColorMode::Auto if atty::is(atty::Stream::Stdout) => ColorChoice::Auto,
            ColorMode::Auto => ColorChoice::Never,
        }
    }
}

/// Colour names as understood by `termcolor` (`red`, `12`, `255,128,0`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Theme {
    pub keyword: String,
    pub identifier: String,
    pub string: String,
    pub comment: String,
    pub invalid: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            keyword: "magenta".into(),
            identifier: "cyan".into(),
            string: "green".into(),
            comment: "blue".into(),
            invalid: "red".into(),
        }
    }
}

impl Theme {
    fn name(&self, category: HighlightCategory) -> Option<&str> {
        match category {
            HighlightCategory::Keyword => Some(self.keyword.as_str()),
            HighlightCategory::Identifier => Some(self.identifier.as_str()),
            HighlightCategory::String => Some(self.string.as_str()),
            HighlightCategory::Comment => Some(self.comment.as_str()),
            HighlightCategory::Invalid => Some(self.invalid.as_str()),
            HighlightCategory::None => None,
        }
    }

    /// Colour for `category`; `None` for [`HighlightCategory::None`] and for
    /// names that do not parse.
    pub fn color(&self, category: HighlightCategory) -> Option<Color> {
        self.name(category)?.parse().ok()
    }

    fn check(&self) -> Result<(), AssuranceError> {
        for category in HighlightCategory::EMITTED {
            let Some(name) = self.name(category) else {
                continue;
            };
            if let Err(e) = name.parse::<Color>() {
                return Err(AssuranceError::Config {
                    message: format!("invalid {category} colour '{name}': {e}"),
                    help: Some(
                        "use a colour name, an ANSI number (0-255) or 'r,g,b'".to_string(),
                    ),
                });
            }
        }
        Ok(())
    }
}

impl Config {
    /// Loads `path`, or `assurance.yaml` in the working directory when
    /// `path` is `None`. Only an explicitly named file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, AssuranceError> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        if !required && !path.is_file() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(&path).map_err(|e| AssuranceError::io(&path, e))?;
        Self::from_yaml(&text, &path.display().to_string())
    }

    pub fn from_yaml(text: &str, origin: &str) -> Result<Self, AssuranceError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(text)
            .map_err(|e| AssuranceError::config(format!("{origin}: {e}")))?;
        config.theme.check()?;
        Ok(config)
    }
}
