//! Saved default flags.
//!
//! A flag file holds CLI flags, one or more per line. `#` starts a comment
//! line. The global file lives in the platform config directory and a local
//! `.essayistrc` overrides it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Which projection of the essay to print.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Normalized markdown
    #[default]
    Markdown,
    /// Section outline
    Outline,
    /// Rendered preview
    Preview,
    /// Full document model (JSON only)
    Model,
}

impl View {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Outline => "outline",
            Self::Preview => "preview",
            Self::Model => "model",
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub watch: bool,
    pub json: bool,
    pub write: bool,
    pub view: Option<View>,
}

impl ConfigFlags {
    /// Merge `other` over `self`: booleans are OR-ed, `other` wins for values.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            watch: self.watch || other.watch,
            json: self.json || other.json,
            write: self.write || other.write,
            view: other.view.or(self.view),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("essayist").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("essayist")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("essayist").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("essayist")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".essayistrc")
}

/// Load flags from `path`. A missing file yields the defaults.
///
/// # Errors
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// # Errors
/// Returns an error if the config directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# essayist defaults (saved with --save)".to_string()];
    if flags.watch {
        lines.push("--watch".to_string());
    }
    if flags.json {
        lines.push("--json".to_string());
    }
    if flags.write {
        lines.push("--write".to_string());
    }
    if let Some(view) = flags.view {
        lines.push(format!("--view {}", view.as_str()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// # Errors
/// Returns an error if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the known flags out of raw argument tokens. Unknown tokens are
/// skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        match token {
            "--watch" | "-w" => flags.watch = true,
            "--json" => flags.json = true,
            "--write" => flags.write = true,
            "--view" => {
                if let Some(next) = tokens.get(i + 1) {
                    flags.view = parse_view(next);
                    i += 1;
                }
            }
            _ => {
                if let Some(value) = token.strip_prefix("--view=") {
                    flags.view = parse_view(value);
                }
            }
        }
        i += 1;
    }
    flags
}

fn parse_view(s: &str) -> Option<View> {
    match s {
        "markdown" => Some(View::Markdown),
        "outline" => Some(View::Outline),
        "preview" => Some(View::Preview),
        "model" => Some(View::Model),
        _ => None,
    }
}
