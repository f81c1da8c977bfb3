// File: src/paths.rs
use directories::ProjectDirs;
use std::env;
use std::path::PathBuf;

pub struct AppPaths;

impl AppPaths {
    fn get_proj_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "recurfreq", "recurfreq")
    }

    /// Config directory, honouring the `RECURFREQ_CONFIG_DIR` override.
    ///
    /// Nothing is created on disk: the tool only ever reads from here.
    pub fn get_config_dir() -> Option<PathBuf> {
        if let Ok(dir) = env::var("RECURFREQ_CONFIG_DIR") {
            return Some(PathBuf::from(dir));
        }
        Self::get_proj_dirs().map(|p| p.config_dir().to_path_buf())
    }

    pub fn get_config_file_path() -> Option<PathBuf> {
        Self::get_config_dir().map(|p| p.join("config.toml"))
    }
}
