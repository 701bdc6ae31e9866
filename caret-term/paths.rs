use std::path::PathBuf;

use etcetera::base_strategy::{
  BaseStrategy,
  choose_base_strategy,
};

pub const CONFIG_DIR_ENV: &str = "CARET_CONFIG_DIR";

/// Directory holding `config.toml`. `$CARET_CONFIG_DIR` wins over the
/// platform default.
pub fn config_dir() -> Option<PathBuf> {
  if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
    return Some(PathBuf::from(dir));
  }
  let strategy = choose_base_strategy().ok()?;
  let mut path = strategy.config_dir();
  path.push("caret");
  Some(path)
}

pub fn config_file() -> Option<PathBuf> {
  config_dir().map(|dir| dir.join("config.toml"))
}
