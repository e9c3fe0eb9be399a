//! Ранняя проверка конфига пайплайна: `smrt_bin` и внешние программы,
//! которые вызывают стадии фазирования.

use std::{
    env,
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::{
    error::{ensure, ConfigError, ResultExt, UnzipResult},
    serde_io::Gateway,
};

/// Программы, которые должны лежать в `smrt_bin`.
pub const SMRT_BIN_TOOLS: [&str; 4] = ["blasr", "samtools", "pbalign", "variantCaller"];

/// Программы, которые ищутся по пути поиска.
pub const PATH_TOOLS: [&str; 3] = ["nucmer", "show-coords", "fc_rr_hctg_track2.exe"];

/// Конфигурация пайплайна: обязательный `smrt_bin` и прочие ключи как есть.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub smrt_bin: PathBuf,
    /// Остальные ключи в исходном порядке.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PipelineConfig {
    pub fn new<P: Into<PathBuf>>(smrt_bin: P) -> Self {
        Self {
            smrt_bin: smrt_bin.into(),
            extra: Map::new(),
        }
    }

    /// Загружает конфиг из `.json` / `.msgpack` файла.
    pub fn load<P: AsRef<Path>>(
        gateway: &Gateway,
        path: P,
    ) -> UnzipResult<Self> {
        let path = path.as_ref();
        let value = gateway
            .read(path)
            .with_context(|| format!("Loading pipeline config {}", path.display()))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> UnzipResult<Self> {
        serde_json::from_value(value).map_err(|e| {
            ConfigError::Invalid {
                reason: e.to_string(),
            }
            .into()
        })
    }
}

/// Поиск исполняемых файлов по явно заданному пути поиска.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolValidator {
    search_path: Vec<PathBuf>,
}

impl ToolValidator {
    pub fn new<I, P>(search_path: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            search_path: search_path.into_iter().map(Into::into).collect(),
        }
    }

    /// Путь поиска из `$PATH` текущего процесса.
    pub fn from_env() -> Self {
        Self::from_path_var(env::var_os("PATH").unwrap_or_default())
    }

    /// Путь поиска из строки в формате `$PATH`.
    pub fn from_path_var(var: impl Into<OsString>) -> Self {
        Self::new(env::split_paths(&var.into()))
    }

    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }

    /// Имя с разделителем пути проверяется напрямую, иначе ищется в каждой
    /// директории пути поиска по порядку. Первое совпадение побеждает.
    pub fn find_executable(
        &self,
        name: &str,
    ) -> Option<PathBuf> {
        let candidate = Path::new(name);
        if candidate.components().count() > 1 {
            return is_executable(candidate).then(|| candidate.to_path_buf());
        }
        self.search_path
            .iter()
            .map(|dir| dir.join(name))
            .find(|path| is_executable(path))
    }

    /// [`find_executable`](Self::find_executable), отсутствие инструмента
    /// считается ошибкой.
    pub fn require(
        &self,
        name: &str,
    ) -> UnzipResult<PathBuf> {
        match self.find_executable(name) {
            Some(path) => {
                debug!("Found {name}: {}", path.display());
                Ok(path)
            }
            None => Err(ConfigError::MissingTool {
                tool: name.to_string(),
            }
            .into()),
        }
    }
}

/// Проверяет `smrt_bin` и наличие всех внешних инструментов.
///
/// Возвращает найденные пути в порядке проверки; первая отсутствующая
/// программа прерывает проверку.
pub fn validate_config(
    config: &PipelineConfig,
    source: Option<&Path>,
    tools: &ToolValidator,
) -> UnzipResult<Vec<PathBuf>> {
    let pretty = serde_json::to_string_pretty(config).unwrap_or_else(|e| format!("<{e}>"));
    let source = source.map_or_else(|| "None".to_string(), |s| format!("'{}'", s.display()));
    info!("From {source}, config={pretty}");

    ensure!(
        config.smrt_bin.is_dir(),
        ConfigError::NotADirectory {
            key: "smrt_bin".to_string(),
            path: config.smrt_bin.clone(),
        }
    );

    let smrt_bin_tools = SMRT_BIN_TOOLS
        .iter()
        .map(|tool| config.smrt_bin.join(tool).to_string_lossy().into_owned());
    let path_tools = PATH_TOOLS.iter().map(|tool| tool.to_string());

    smrt_bin_tools
        .chain(path_tools)
        .map(|tool| tools.require(&tool))
        .collect()
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    fs::metadata(path).map(|meta| meta.is_file()).unwrap_or(false)
}
