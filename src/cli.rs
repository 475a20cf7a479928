/// Command-line flags
///
/// Flags win over the config file and the environment.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{AppConfig, MANIFEST_ENV};

#[derive(Debug, Parser)]
#[command(name = "smart-notes")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// URL or path of materials.json
    #[arg(long, env = MANIFEST_ENV)]
    pub manifest: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// View to open first
    #[arg(long, value_enum, default_value_t = StartView::Catalog)]
    pub view: StartView,

    /// Start in dark mode
    #[arg(long)]
    pub dark: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StartView {
    #[default]
    Catalog,
    Admin,
}

impl Cli {
    /// Load the config file and apply the flags on top
    pub fn resolve_config(&self) -> AppConfig {
        let mut config = AppConfig::load(self.config.as_deref());
        self.apply(&mut config);
        config
    }

    pub fn apply(&self, config: &mut AppConfig) {
        config.apply_manifest_override(self.manifest.clone());
        if self.dark {
            config.dark_mode = true;
        }
    }
}
