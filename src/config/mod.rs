pub mod settings;
pub mod validate;

pub use settings::Settings;
pub use validate::{validate_config, PipelineConfig, ToolValidator, PATH_TOOLS, SMRT_BIN_TOOLS};
