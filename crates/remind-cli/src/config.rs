use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Name of the optional configuration file inside the root directory.
pub const CONFIG_FILE_NAME: &str = "remind.toml";

/// Runtime configuration, built once at startup and passed by reference.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory the db and log folders live in
    pub root_dir: PathBuf,
    /// Log everything instead of errors only
    #[serde(default)]
    pub verbose: bool,
    #[serde(default = "default_db_dir")]
    pub db_dir: String,
    #[serde(default = "default_db_name")]
    pub db_name: String,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    /// Column headings for `event list`, keyed by column name
    #[serde(default)]
    pub column_titles: BTreeMap<String, String>,
}

fn default_db_dir() -> String {
    "db".to_string()
}

fn default_db_name() -> String {
    "maindb".to_string()
}

fn default_log_dir() -> String {
    "log".to_string()
}

impl AppConfig {
    pub fn with_root(root_dir: PathBuf) -> Self {
        Self {
            root_dir,
            verbose: false,
            db_dir: default_db_dir(),
            db_name: default_db_name(),
            log_dir: default_log_dir(),
            column_titles: BTreeMap::new(),
        }
    }

    /// Resolves the configuration.
    ///
    /// The root directory comes from `root_flag`, then `REMIND_ROOT_DIR`, then
    /// the executable's directory. Inside it, `remind.toml` and `REMIND_*`
    /// variables are layered over the defaults; `--verbose` can only turn
    /// verbose mode on.
    pub fn load(root_flag: Option<&Path>, verbose_flag: bool) -> Result<Self, figment::Error> {
        let root_dir = match root_flag {
            Some(root) => root.to_path_buf(),
            None => std::env::var_os("REMIND_ROOT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(executable_dir),
        };

        let mut config: AppConfig = Figment::from(Serialized::defaults(AppConfig::with_root(root_dir.clone())))
            .merge(Toml::file(root_dir.join(CONFIG_FILE_NAME)))
            .merge(Env::prefixed("REMIND_"))
            .extract()?;

        if root_flag.is_some() {
            config.root_dir = root_dir;
        }
        config.verbose |= verbose_flag;
        Ok(config)
    }
}

/// Directory containing the running executable, or the working directory if unknown.
fn executable_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.canonicalize().ok())
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
