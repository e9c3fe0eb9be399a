//! Ошибки `unzip-io`: коды статуса, трейт [`ErrorExt`], [`StackError`] с
//! цепочкой пояснений и типы ошибок по подсистемам.

pub mod ext;
pub mod macros;
pub mod stack;
pub mod status_code;
pub mod types;

pub use ext::ErrorExt;
pub use macros::ResultExt;
pub use stack::{ErrorContext, StackError};
#[cfg(feature = "serde")]
pub use stack::ErrorReport;
pub use status_code::{Category, LogLevel, StatusCode};
pub use types::{io_status, CommandError, ConfigError, GatewayError, GenericError};

pub type UnzipResult<T> = Result<T, StackError>;
