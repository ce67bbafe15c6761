use crate::data::Error;
use std::path::PathBuf;

/// Checks every input path up front, before any loading starts, so a typo
/// in the last argument doesn't waste work on the first ones.
pub(crate) fn validate_files_exist(paths: &[PathBuf]) -> Result<(), Error> {
    for path in paths {
        if !path.exists() {
            return Err(Error::FileNotFound(path.clone()));
        }
        if !path.is_file() {
            return Err(Error::NotAFile(path.clone()));
        }
    }
    Ok(())
}
