//! Runtime configuration read from the environment (and `.env` if present).

use std::env;
use std::path::PathBuf;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_DATA_FILE: &str = "josaa2024_cutoff.csv";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: String,
    pub data_file: PathBuf,
    pub static_dir: PathBuf,
    pub index_file: PathBuf,
    pub plot_dir: PathBuf,
    /// Upper bound on preference computations running at the same time.
    pub workers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind: DEFAULT_BIND.to_string(),
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            static_dir: PathBuf::from("static"),
            index_file: PathBuf::from("index.html"),
            plot_dir: PathBuf::from("static"),
            workers: std::cmp::max(1, num_cpus::get()),
        }
    }
}

impl Config {
    pub fn from_env() -> Config {
        let _ = dotenv::dotenv();
        let mut cfg = Config::default();

        if let Ok(v) = env::var("JOSAA_BIND") {
            if !v.trim().is_empty() {
                cfg.bind = v.trim().to_string();
            }
        }
        if let Some(p) = path_var("JOSAA_DATA_FILE") {
            cfg.data_file = p;
        }
        if let Some(p) = path_var("JOSAA_STATIC_DIR") {
            cfg.static_dir = p;
        }
        if let Some(p) = path_var("JOSAA_INDEX_FILE") {
            cfg.index_file = p;
        }
        if let Some(p) = path_var("JOSAA_PLOT_DIR") {
            cfg.plot_dir = p;
        }
        if let Ok(v) = env::var("JOSAA_WORKERS") {
            match v.trim().parse::<usize>() {
                Ok(n) if n > 0 => cfg.workers = n,
                _ => tracing::warn!(value = %v, "ignoring invalid JOSAA_WORKERS"),
            }
        }
        cfg
    }
}

fn path_var(name: &str) -> Option<PathBuf> {
    env::var(name)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(|s| PathBuf::from(s.trim()))
}
