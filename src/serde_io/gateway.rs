use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::info;

use super::{record_count, Format};
use crate::{
    error::{GatewayError, UnzipResult},
    fs_util::{eng, mkdirs},
    logging::LogContext,
};

/// Читает и пишет значения в файлы `.msgpack` / `.json`.
///
/// Формат выбирается по суффиксу пути один раз, до любого обращения к
/// файловой системе. Вся диагностика вызова идёт внутри span-а из
/// [`LogContext`], переданного при создании.
#[derive(Debug, Clone, Default)]
pub struct Gateway {
    log: LogContext,
}

impl Gateway {
    pub fn new(log: LogContext) -> Self {
        Self { log }
    }

    pub fn log_context(&self) -> &LogContext {
        &self.log
    }

    /// Читает весь файл и декодирует его форматом, заданным суффиксом.
    pub fn read<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> UnzipResult<Value> {
        let path = path.as_ref();
        self.log.in_scope(|| read_value(path))
    }

    /// [`read`](Self::read) с преобразованием в типизированное значение.
    pub fn read_as<T, P>(
        &self,
        path: P,
    ) -> UnzipResult<T>
    where
        T: DeserializeOwned,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        let value = self.read(path)?;
        serde_json::from_value(value).map_err(|e| {
            GatewayError::Decode {
                path: path.to_path_buf(),
                format: format.name(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Кодирует значение и перезаписывает файл, создавая родительскую
    /// директорию при необходимости.
    pub fn write<P: AsRef<Path>>(
        &self,
        path: P,
        value: &Value,
    ) -> UnzipResult<()> {
        let path = path.as_ref();
        self.log.in_scope(|| write_value(path, value))
    }

    /// [`write`](Self::write) для любого `Serialize`; порядок полей
    /// структуры сохраняется.
    pub fn write_from<T, P>(
        &self,
        path: P,
        value: &T,
    ) -> UnzipResult<()>
    where
        T: Serialize + ?Sized,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        let value = serde_json::to_value(value).map_err(|e| GatewayError::Encode {
            path: path.to_path_buf(),
            format: format.name(),
            reason: e.to_string(),
        })?;
        self.write(path, &value)
    }
}

fn read_value(path: &Path) -> UnzipResult<Value> {
    let format = Format::from_path(path)?;

    info!("Deserializing from {:?}", path.display().to_string());
    let mut file = File::open(path).map_err(|e| GatewayError::from_io(path, "open", &e))?;
    info!("  Opened for read: {:?}", path.display().to_string());

    let mut content = Vec::new();
    file.read_to_end(&mut content)
        .map_err(|e| GatewayError::from_io(path, "read", &e))?;
    info!("  Read {} as {}", eng(content.len() as u64), format);

    let value = format
        .codec()
        .decode(&content)
        .map_err(|e| GatewayError::Decode {
            path: path.to_path_buf(),
            format: format.name(),
            reason: e.to_string(),
        })?;
    info!("  Deserialized {} records", record_count(&value));
    Ok(value)
}

fn write_value(
    path: &Path,
    value: &Value,
) -> UnzipResult<()> {
    let format = Format::from_path(path)?;

    info!("Serializing {} records", record_count(value));
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        mkdirs(&[dir])?;
    }

    let content = format
        .codec()
        .encode(value)
        .map_err(|e| GatewayError::Encode {
            path: path.to_path_buf(),
            format: format.name(),
            reason: e.to_string(),
        })?;
    info!("  Serialized to {} as {}", eng(content.len() as u64), format);

    let mut file = File::create(path).map_err(|e| GatewayError::from_io(path, "create", &e))?;
    info!("  Opened for write: {:?}", path.display().to_string());
    file.write_all(&content)
        .and_then(|()| file.flush())
        .map_err(|e| GatewayError::from_io(path, "write", &e))?;
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
