/// External programs: argument-list invocation with exit-code checking.
pub mod command;
/// Runtime settings and pipeline config validation.
pub mod config;
/// Common error types: codec, logging, settings; re-exports of `unzip-error`.
pub mod error;
/// FOFN (file of file names) reader.
pub mod fofn;
/// Filesystem helpers: mkdirs, rm, touch, sizes.
pub mod fs_util;
/// Flexible logging (formatting, filters, sinks).
pub mod logging;
/// Serialization gateway for `.msgpack` and `.json` files.
pub mod serde_io;

// -----------------------------------------------------------------------------
//  Frequently used public types
// -----------------------------------------------------------------------------

/// Process runner and its result.
pub use command::{CommandOutput, CommandRunner};
/// config
pub use config::{validate_config, PipelineConfig, Settings, ToolValidator};
/// Operation errors and result types.
pub use error::{
    CodecError, CommandError, ConfigError, GatewayError, LoggingError, SettingsError, StackError,
    StatusCode, UnzipResult,
};
/// FOFN iteration.
pub use fofn::{read_fofn, FofnReader};
/// Filesystem helpers.
pub use fs_util::{eng, exists_and_not_empty, filesize, mkdirs, rm, touch};
/// Logging setup and per-component context.
pub use logging::{init_logging, LogContext, LoggingConfig, LoggingHandle};
/// Serialization gateway and formats.
pub use serde_io::{deserialize, serialize, Codec, Format, Gateway, Value};
