use std::{ffi::OsStr, fmt, path::Path, str::FromStr};

use super::codec::{Codec, JsonCodec, MsgPackCodec};
use crate::error::GatewayError;

/// Формат файла, выбирается по суффиксу.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// `.msgpack`: компактный самоописывающий бинарный формат.
    MsgPack,
    /// `.json`: текст UTF-8, отступ в два пробела.
    Json,
}

impl Format {
    pub const ALL: [Format; 2] = [Format::MsgPack, Format::Json];

    /// Формат по суффиксу пути.
    ///
    /// Учитывается только последнее расширение: `p_ctg.json.msgpack` это
    /// msgpack, а `reads.txt` отклоняется.
    pub fn from_path(path: &Path) -> Result<Self, GatewayError> {
        path.extension()
            .and_then(OsStr::to_str)
            .and_then(Self::from_extension)
            .ok_or_else(|| GatewayError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.extension() == ext)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Format::MsgPack => "msgpack",
            Format::Json => "json",
        }
    }

    pub const fn extension(self) -> &'static str {
        self.name()
    }

    /// Кодек этого формата.
    pub fn codec(self) -> &'static dyn Codec {
        match self {
            Format::MsgPack => &MsgPackCodec,
            Format::Json => &JsonCodec,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim_start_matches('.');
        Self::from_extension(&s.to_ascii_lowercase())
            .ok_or_else(|| format!("unknown format {s:?}, expected msgpack or json"))
    }
}
