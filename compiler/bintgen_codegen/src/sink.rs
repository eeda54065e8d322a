//! Output sink for generated units.

use std::io::Write as _;
use std::path::Path;

use crate::CodegenError;

/// Write a finished output unit to `dest`, or to stdout when there is none.
pub fn write_output(unit: &str, dest: Option<&Path>) -> Result<(), CodegenError> {
    match dest {
        Some(path) => {
            std::fs::write(path, unit).map_err(|source| CodegenError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::debug!(path = %path.display(), bytes = unit.len(), "output written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(unit.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|source| CodegenError::Io {
                    path: "<stdout>".into(),
                    source,
                })?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn writes_unit_to_destination() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("user_bintly.go");

        write_output("package model\n", Some(&path)).expect("written");
        let written = std::fs::read_to_string(&path).expect("readable");
        assert_eq!(written, "package model\n");
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.go");
        std::fs::write(&path, "stale contents that are longer").expect("seed");

        write_output("fresh\n", Some(&path)).expect("written");
        assert_eq!(std::fs::read_to_string(&path).expect("readable"), "fresh\n");
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("no_such_dir").join("out.go");

        let err = write_output("x", Some(&path)).unwrap_err();
        match err {
            CodegenError::Io { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
