//! Small filesystem helpers shared by the pipeline stages.

use std::{
    fs::{self, OpenOptions},
    io,
    path::Path,
};

use filetime::FileTime;
use tracing::{debug, info};

use crate::error::{GatewayError, UnzipResult};

const MIB: f64 = (1u64 << 20) as f64;

/// Creates every missing directory in `dirnames`, ancestors included.
///
/// Existing directories are left alone. The `mkdir -p` line is logged only
/// when a single directory was requested. Returns how many directories were
/// created.
pub fn mkdirs<P: AsRef<Path>>(dirnames: &[P]) -> UnzipResult<usize> {
    let mut created = 0;
    for dirname in dirnames {
        let dirname = dirname.as_ref();
        if dirname.is_dir() {
            continue;
        }
        fs::create_dir_all(dirname)
            .map_err(|e| GatewayError::from_io(dirname, "create directory", &e))?;
        created += 1;
        if dirnames.len() == 1 {
            info!("mkdir -p {:?}", dirname.display().to_string());
        }
    }
    Ok(created)
}

/// Human-readable size class in mebibytes, e.g. `1.5MB`.
pub fn eng(bytes: u64) -> String {
    format!("{:.1}MB", bytes as f64 / MIB)
}

/// Size of the file at `path` in bytes.
pub fn filesize<P: AsRef<Path>>(path: P) -> UnzipResult<u64> {
    let path = path.as_ref();
    let meta = fs::metadata(path).map_err(|e| GatewayError::from_io(path, "stat", &e))?;
    Ok(meta.len())
}

/// `true` when `path` exists and holds at least one byte.
pub fn exists_and_not_empty<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    match fs::metadata(path) {
        Ok(meta) if meta.len() == 0 => {
            debug!("File {} is empty.", path.display());
            false
        }
        Ok(_) => true,
        Err(_) => false,
    }
}

/// Removes a file; a missing file is not an error.
pub fn rm<P: AsRef<Path>>(path: P) -> UnzipResult<()> {
    let path = path.as_ref();
    debug!("rm -f {}", path.display());
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(GatewayError::from_io(path, "remove", &e).into()),
    }
}

/// Creates the file if absent, otherwise bumps its modification time.
pub fn touch<P: AsRef<Path>>(path: P) -> UnzipResult<()> {
    let path = path.as_ref();
    debug!("touch {}", path.display());
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| GatewayError::from_io(path, "open", &e))?;
    filetime::set_file_mtime(path, FileTime::now())
        .map_err(|e| GatewayError::from_io(path, "set mtime of", &e))?;
    Ok(())
}
