use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{CodegenError, Snippet};

/// Write every snippet below `dir`, creating `dir` and any nested parents.
///
/// Existing files are overwritten and later duplicates win. The first failure
/// aborts, files written before it are left in place.
pub fn write_snippets(dir: &Path, snippets: &[Snippet]) -> Result<Vec<PathBuf>, CodegenError> {
    create_dir(dir)?;

    let mut written = Vec::with_capacity(snippets.len());
    for snippet in snippets {
        let path = dir.join(&snippet.name);
        if let Some(parent) = path.parent() {
            create_dir(parent)?;
        }
        fs::write(&path, &snippet.code).map_err(|source| CodegenError::Filesystem {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = snippet.code.len(), "Wrote snippet");
        written.push(path);
    }

    Ok(written)
}

fn create_dir(dir: &Path) -> Result<(), CodegenError> {
    fs::create_dir_all(dir).map_err(|source| CodegenError::Filesystem {
        path: dir.to_path_buf(),
        source,
    })
}
