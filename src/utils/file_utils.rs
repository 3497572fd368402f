use std::fs;
use std::path::Path;

use log::debug;

/// UTF-8 byte order mark, written so spreadsheet applications detect the
/// encoding of exported tables
pub const UTF8_BOM: &str = "\u{feff}";

/// Create a directory if it doesn't exist
pub fn ensure_dir_exists(dir: impl AsRef<Path>) -> std::io::Result<()> {
    let dir = dir.as_ref();
    if !dir.as_os_str().is_empty() && !dir.exists() {
        debug!("Creating directory: {}", dir.display());
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Create the parent directory of `path` if needed
pub fn ensure_parent_exists(path: impl AsRef<Path>) -> std::io::Result<()> {
    match path.as_ref().parent() {
        Some(parent) => ensure_dir_exists(parent),
        None => Ok(()),
    }
}

/// Read a file to string, dropping a leading byte order mark
pub fn read_text_without_bom(path: impl AsRef<Path>) -> std::io::Result<String> {
    let content = fs::read_to_string(path)?;
    Ok(match content.strip_prefix(UTF8_BOM) {
        Some(stripped) => stripped.to_string(),
        None => content,
    })
}
