use hpfold::engine::config::FoldConfig;
use std::path::PathBuf;

#[derive(Debug)]
pub struct AppConfig {
    pub output_path: PathBuf,
    pub core_config: FoldConfig,
}
