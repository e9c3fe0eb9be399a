//! FOFN ("file of file names"): текстовый список путей, по одному на строку.

use std::{
    env,
    fs::File,
    io::{BufRead, BufReader, Lines},
    path::{Component, Path, PathBuf},
};

use tracing::info;

use crate::error::{GatewayError, UnzipResult};

/// Одноразовый ленивый итератор по путям из FOFN.
///
/// Относительные записи разрешаются от директории самого FOFN, а не от
/// текущей рабочей директории процесса. Абсолютные отдаются как есть.
/// Пустые строки пропускаются.
pub struct FofnReader {
    path: PathBuf,
    base: PathBuf,
    lines: Lines<BufReader<File>>,
}

impl FofnReader {
    pub fn open<P: AsRef<Path>>(path: P) -> UnzipResult<Self> {
        let path = path.as_ref();
        info!("Reading names from FOFN {:?}", path.display().to_string());

        let file = File::open(path).map_err(|e| GatewayError::from_io(path, "open", &e))?;
        let base = absolute(path.parent().unwrap_or(Path::new("")))?;

        Ok(Self {
            path: path.to_path_buf(),
            base,
            lines: BufReader::new(file).lines(),
        })
    }

    /// Путь к самому FOFN.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Директория, от которой разрешаются относительные записи.
    pub fn base_dir(&self) -> &Path {
        &self.base
    }
}

impl Iterator for FofnReader {
    type Item = UnzipResult<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(GatewayError::from_io(&self.path, "read", &e).into())),
            };
            let entry = line.trim();
            if entry.is_empty() {
                continue;
            }
            let entry = Path::new(entry);
            if entry.is_absolute() {
                return Some(Ok(entry.to_path_buf()));
            }
            return Some(Ok(normalize(&self.base.join(entry))));
        }
    }
}

/// Все записи FOFN сразу.
pub fn read_fofn<P: AsRef<Path>>(path: P) -> UnzipResult<Vec<PathBuf>> {
    FofnReader::open(path)?.collect()
}

fn absolute(dir: &Path) -> UnzipResult<PathBuf> {
    if dir.is_absolute() {
        return Ok(normalize(dir));
    }
    let cwd = env::current_dir().map_err(|e| GatewayError::from_io(".", "resolve", &e))?;
    Ok(normalize(&cwd.join(dir)))
}

/// Лексическая нормализация: убирает `.` и сворачивает `..` без обращения к
/// файловой системе (симлинки не раскрываются).
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `/..` это `/`
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out
}
