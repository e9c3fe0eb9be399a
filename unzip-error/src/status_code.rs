use std::fmt;

use num_enum::TryFromPrimitive;
#[cfg(feature = "serde")]
use serde_repr::{Deserialize_repr, Serialize_repr};
#[cfg(feature = "strum")]
use strum_macros::{AsRefStr, EnumIter};

/// Числовой код ошибки. Тысячи задают [`Category`]:
///
/// | диапазон | категория |
/// |---|---|
/// | 0 | успех |
/// | 1xxx | общие |
/// | 2xxx | форматы `.msgpack` / `.json` |
/// | 3xxx | файловая система |
/// | 4xxx | внешние команды |
/// | 5xxx | конфигурация пайплайна |
///
/// В JSON-отчёте сериализуется числом (`serde_repr`, feature `serde`).
#[cfg_attr(feature = "strum", derive(AsRefStr, EnumIter))]
#[cfg_attr(feature = "serde", derive(Serialize_repr, Deserialize_repr))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[repr(u32)]
#[non_exhaustive]
pub enum StatusCode {
    Success = 0,

    Unknown = 1000,
    Unsupported = 1001,
    Unexpected = 1002,
    Internal = 1003,
    InvalidArgs = 1004,

    UnsupportedFormat = 2000,
    DecodingFailed = 2001,
    EncodingFailed = 2002,
    InvalidData = 2003,
    InvalidUtf8 = 2004,

    NotFound = 3000,
    AlreadyExists = 3001,
    PermissionDenied = 3002,
    NotADirectory = 3003,
    Io = 3004,
    UnexpectedEof = 3005,

    CommandFailed = 4000,
    SpawnFailed = 4001,
    MissingTool = 4002,
    Interrupted = 4003,

    InvalidConfig = 5000,
}

/// Группа кодов по разряду тысяч.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Success,
    General,
    Format,
    Filesystem,
    Command,
    Config,
}

/// Уровень, с которым CLI логирует ошибку данного кода.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl StatusCode {
    pub const fn code(self) -> u32 {
        self as u32
    }

    pub fn from_u32(v: u32) -> Option<Self> {
        Self::try_from(v).ok()
    }

    pub const fn category(self) -> Category {
        match self.code() / 1000 {
            0 => Category::Success,
            2 => Category::Format,
            3 => Category::Filesystem,
            4 => Category::Command,
            5 => Category::Config,
            _ => Category::General,
        }
    }

    /// Сбой самой программы, а не входных данных или окружения.
    pub fn is_internal(self) -> bool {
        matches!(self, Self::Unknown | Self::Internal | Self::Unexpected)
    }

    pub fn is_critical(self) -> bool {
        self.is_internal() || self == Self::Io
    }

    pub fn log_level(self) -> LogLevel {
        match self {
            Self::Success => LogLevel::Trace,
            Self::NotFound | Self::AlreadyExists => LogLevel::Debug,
            Self::InvalidArgs | Self::UnsupportedFormat | Self::InvalidConfig => LogLevel::Info,
            _ if self.is_critical() || self == Self::PermissionDenied => LogLevel::Error,
            _ => LogLevel::Warn,
        }
    }

    /// Код завершения процесса по `sysexits.h`.
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::InvalidArgs | Self::UnsupportedFormat => 64,
            Self::DecodingFailed | Self::InvalidData | Self::InvalidUtf8 => 65,
            Self::NotFound | Self::NotADirectory => 66,
            Self::MissingTool => 69,
            Self::Internal | Self::Unexpected | Self::Unknown => 70,
            Self::SpawnFailed => 71,
            Self::EncodingFailed
            | Self::Io
            | Self::UnexpectedEof
            | Self::AlreadyExists
            | Self::Unsupported => 74,
            Self::CommandFailed | Self::Interrupted => 75,
            Self::PermissionDenied => 77,
            Self::InvalidConfig => 78,
        }
    }
}

impl From<StatusCode> for u32 {
    fn from(c: StatusCode) -> Self {
        c.code()
    }
}

/// `NotFound (3000)`
impl fmt::Display for StatusCode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        #[cfg(feature = "strum")]
        let name: &str = self.as_ref();
        #[cfg(not(feature = "strum"))]
        let name = format!("{self:?}");
        write!(f, "{name} ({})", self.code())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
