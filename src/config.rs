use clap::Parser;
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_LOCATION: &str = "Ciudad de México";

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "clima")]
#[command(about = "Terminal weather dashboard with city/country search (simulated data)")]
pub struct Cli {
    /// Location shown at startup. Example: "Morelia"
    #[arg(long)]
    pub location: Option<String>,

    /// Replace the built-in catalog with a file of names, one per line
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Seed for the weather generator (repeatable output)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start in Fahrenheit
    #[arg(long, default_value_t = false)]
    pub fahrenheit: bool,

    /// Force monochrome (no colors)
    #[arg(long, default_value_t = false)]
    pub mono: bool,

    /// Do not capture the mouse
    #[arg(long, default_value_t = false)]
    pub no_mouse: bool,

    /// Settings file (default: platform config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log file (default: platform cache dir)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// More log detail (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Optional `settings.json`. Read once at startup, never written back.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub default_location: Option<String>,
    pub mono: bool,
    pub fahrenheit: bool,
    pub mouse: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_location: None,
            mono: false,
            fahrenheit: false,
            mouse: true,
        }
    }
}

pub struct Paths {
    pub settings_path: PathBuf,
    pub log_path: PathBuf,
}

pub fn project_paths() -> Option<Paths> {
    let proj = ProjectDirs::from("mx", "tecnm", "clima")?;
    let cache = proj.cache_dir().to_path_buf();
    fs::create_dir_all(&cache).ok();
    Some(Paths {
        settings_path: proj.config_dir().join("settings.json"),
        log_path: cache.join("clima.log"),
    })
}

/// Missing or unreadable settings fall back to defaults.
pub fn load_settings(path: &Path) -> Settings {
    if let Ok(s) = fs::read_to_string(path) {
        match serde_json::from_str::<Settings>(&s) {
            Ok(v) => return v,
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "ignoring bad settings"),
        }
    }
    Settings::default()
}

/// Everything the dashboard needs after merging CLI and settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub location: String,
    pub catalog: Option<PathBuf>,
    pub seed: Option<u64>,
    pub fahrenheit: bool,
    pub mono: bool,
    pub mouse: bool,
}

impl Options {
    pub fn resolve(cli: &Cli, settings: &Settings) -> Self {
        let location = cli
            .location
            .as_deref()
            .or(settings.default_location.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_LOCATION)
            .to_string();

        Self {
            location,
            catalog: cli.catalog.clone(),
            seed: cli.seed,
            fahrenheit: cli.fahrenheit || settings.fahrenheit,
            mono: cli.mono || settings.mono,
            mouse: settings.mouse && !cli.no_mouse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "clima",
            "--location",
            "Mérida",
            "--seed",
            "9",
            "--mono",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.location.as_deref(), Some("Mérida"));
        assert_eq!(cli.seed, Some(9));
        assert!(cli.mono);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn defaults_without_anything() {
        let o = Options::resolve(&Cli::default(), &Settings::default());
        assert_eq!(o.location, DEFAULT_LOCATION);
        assert!(o.mouse);
        assert!(!o.mono && !o.fahrenheit);
    }

    #[test]
    fn cli_overrides_settings() {
        let settings = Settings {
            default_location: Some("Tepic".into()),
            mono: false,
            fahrenheit: true,
            mouse: true,
        };
        let cli = Cli {
            location: Some("Colima".into()),
            no_mouse: true,
            ..Cli::default()
        };
        let o = Options::resolve(&cli, &settings);
        assert_eq!(o.location, "Colima");
        assert!(o.fahrenheit);
        assert!(!o.mouse);

        let o = Options::resolve(&Cli::default(), &settings);
        assert_eq!(o.location, "Tepic");
    }

    #[test]
    fn blank_location_falls_back() {
        let cli = Cli {
            location: Some("   ".into()),
            ..Cli::default()
        };
        assert_eq!(
            Options::resolve(&cli, &Settings::default()).location,
            DEFAULT_LOCATION
        );
    }

    #[test]
    fn settings_file_partial_and_broken() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        assert_eq!(load_settings(&path), Settings::default());

        fs::write(&path, r#"{ "mono": true, "default_location": "Zacatecas" }"#).unwrap();
        let s = load_settings(&path);
        assert!(s.mono);
        assert!(s.mouse);
        assert_eq!(s.default_location.as_deref(), Some("Zacatecas"));

        fs::write(&path, "not json").unwrap();
        assert_eq!(load_settings(&path), Settings::default());
    }
}
