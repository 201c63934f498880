use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::{EYE_CASCADE_FILE, FACE_CASCADE_FILE};

#[derive(Error, Debug)]
pub enum CascadeLocateError {
    #[error("cascade directory does not exist: {0}")]
    DirMissing(PathBuf),
    #[error("cascade model file missing: {0}")]
    FileMissing(PathBuf),
}

/// Locations of the two pre-trained cascade models.
///
/// Built once at startup from an explicit directory (the CLI resolves the
/// `--cascade-dir` flag and the environment fallback; nothing in here
/// reads the environment). Missing files are a startup-fatal error, never
/// a deferred one: an unloaded classifier must not reach the loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CascadePaths {
    pub face: PathBuf,
    pub eye: PathBuf,
}

impl CascadePaths {
    pub fn locate(dir: &Path) -> Result<Self, CascadeLocateError> {
        if !dir.is_dir() {
            return Err(CascadeLocateError::DirMissing(dir.to_path_buf()));
        }

        let face = dir.join(FACE_CASCADE_FILE);
        let eye = dir.join(EYE_CASCADE_FILE);
        for path in [&face, &eye] {
            if !path.is_file() {
                return Err(CascadeLocateError::FileMissing(path.clone()));
            }
        }

        Ok(Self { face, eye })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn dir_with(files: &[&str]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        for name in files {
            fs::write(tmp.path().join(name), b"<cascade/>").unwrap();
        }
        tmp
    }

    #[test]
    fn test_locate_finds_both_models() {
        let tmp = dir_with(&[FACE_CASCADE_FILE, EYE_CASCADE_FILE]);
        let paths = CascadePaths::locate(tmp.path()).unwrap();
        assert_eq!(paths.face, tmp.path().join(FACE_CASCADE_FILE));
        assert_eq!(paths.eye, tmp.path().join(EYE_CASCADE_FILE));
    }

    #[test]
    fn test_locate_missing_dir_errors() {
        let tmp = TempDir::new().unwrap();
        let gone = tmp.path().join("not-here");
        let err = CascadePaths::locate(&gone).unwrap_err();
        assert!(matches!(err, CascadeLocateError::DirMissing(p) if p == gone));
    }

    #[test]
    fn test_locate_missing_face_model_errors() {
        let tmp = dir_with(&[EYE_CASCADE_FILE]);
        let err = CascadePaths::locate(tmp.path()).unwrap_err();
        assert!(
            matches!(err, CascadeLocateError::FileMissing(p) if p.ends_with(FACE_CASCADE_FILE))
        );
    }

    #[test]
    fn test_locate_missing_eye_model_errors() {
        let tmp = dir_with(&[FACE_CASCADE_FILE]);
        let err = CascadePaths::locate(tmp.path()).unwrap_err();
        assert!(matches!(err, CascadeLocateError::FileMissing(p) if p.ends_with(EYE_CASCADE_FILE)));
    }

    #[test]
    fn test_error_message_names_the_path() {
        let tmp = dir_with(&[]);
        let err = CascadePaths::locate(tmp.path()).unwrap_err();
        assert!(err.to_string().contains(FACE_CASCADE_FILE));
    }
}
