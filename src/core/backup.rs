use crate::config::{Config, StorageKind};
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::{ensure_parent, ensure_writable};
use crate::store::{RecordStore, log_quietly};
use crate::ui::messages::{info, success, warning};
use crate::utils::path::expand_tilde;
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database file to `dest_file`, optionally zipped.
    /// Returns the path actually written.
    pub fn backup(
        store: &mut dyn RecordStore,
        cfg: &Config,
        dest_file: &str,
        compress: bool,
        force: bool,
    ) -> AppResult<PathBuf> {
        if cfg.storage == StorageKind::Memory {
            return Err(AppError::Config(
                "the in-memory store has no database file to back up".to_string(),
            ));
        }

        let src = Path::new(&cfg.database);
        let dest = expand_tilde(dest_file);

        if !src.exists() {
            return Err(AppError::from(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )));
        }

        ensure_parent(&dest)?;
        let final_path = if compress {
            dest.with_extension("zip")
        } else {
            dest.clone()
        };
        ensure_writable(&final_path, force)?;

        if compress {
            compress_into(src, &final_path)?;
            info(format!("Compressed: {}", final_path.display()));
        } else {
            fs::copy(src, &final_path)?;
        }
        success(format!("Backup created: {}", final_path.display()));

        log_quietly(
            store,
            "backup",
            &final_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        );

        Ok(final_path)
    }
}

/// Write `src` as the single entry of a new zip archive at `zip_path`.
pub(crate) fn compress_into(src: &Path, zip_path: &Path) -> AppResult<()> {
    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let entry_name = src
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "database.sqlite".to_string());

    let mut f = fs::File::open(src)?;
    zip.start_file(entry_name, options)
        .map_err(std::io::Error::other)?;

    std::io::copy(&mut f, &mut zip)?;
    if let Err(e) = zip.finish() {
        warning(format!("Failed to finalize archive: {e}"));
        return Err(AppError::from(std::io::Error::other(e)));
    }

    Ok(())
}
