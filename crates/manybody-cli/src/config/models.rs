use manybody::engine::config::SimulationConfig;
use std::path::PathBuf;

pub struct AppConfig {
    pub output_path: PathBuf,
    pub show_progress: bool,
    pub core_config: SimulationConfig,
}
