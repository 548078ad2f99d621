use crate::codec::ResultCodec;
use crate::BenchError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File, Permissions};
use std::io::{self, BufReader, BufWriter};
use std::path::Path;
use tempfile::Builder;
use tracing::debug;

/// Write `value` to `path`, replacing any existing file.
///
/// The bytes go to a temporary file next to `path` that is renamed over it
/// once encoding has finished, so a failed write never leaves a partial
/// file behind and never clobbers the previous one. The containing
/// directory must already exist.
///
/// The new file keeps the mode of the file it replaces; a fresh file gets
/// the same mode `File::create` would give it.
pub fn save_results<T, C, P>(value: &T, path: P, codec: &C) -> Result<(), BenchError>
where
    T: Serialize,
    C: ResultCodec,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    if !dir.is_dir() {
        return Err(BenchError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("output directory {} does not exist", dir.display()),
        )));
    }

    let mut builder = Builder::new();
    if let Some(permissions) = target_permissions(path) {
        builder.permissions(permissions);
    }
    let mut temp = builder.tempfile_in(dir)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        codec.encode(value, &mut writer)?;
        writer.into_inner().map_err(|e| e.into_error())?;
    }
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    debug!(path = %path.display(), "results written");
    Ok(())
}

fn target_permissions(path: &Path) -> Option<Permissions> {
    if let Ok(metadata) = fs::metadata(path) {
        return Some(metadata.permissions());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Narrowed by the process umask on creation
        Some(Permissions::from_mode(0o666))
    }
    #[cfg(not(unix))]
    {
        None
    }
}

/// Read a results object previously written by [`save_results`].
pub fn load_results<T, C, P>(path: P, codec: &C) -> Result<T, BenchError>
where
    T: DeserializeOwned,
    C: ResultCodec,
    P: AsRef<Path>,
{
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    codec.decode(&mut reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JsonCodec;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.json");
        let value = vec![vec![1.0, 2.0], vec![3.0]];

        save_results(&value, &path, &JsonCodec::compact()).unwrap();
        let loaded: Vec<Vec<f64>> = load_results(&path, &JsonCodec::compact()).unwrap();

        assert_eq!(loaded, value);
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("results.json");

        let err = save_results(&vec![1.0], &path, &JsonCodec::compact()).unwrap_err();
        match err {
            BenchError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            other => panic!("expected I/O error, got {other}"),
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_failed_encode_keeps_previous_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.json");
        save_results(&vec![1.0], &path, &JsonCodec::compact()).unwrap();

        let mut bad = BTreeMap::new();
        bad.insert((1, 2), "tuple keys are not valid JSON keys");
        assert!(save_results(&bad, &path, &JsonCodec::compact()).is_err());

        let loaded: Vec<f64> = load_results(&path, &JsonCodec::compact()).unwrap();
        assert_eq!(loaded, vec![1.0]);

        // No stray temporary files remain next to the output
        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_new_file_mode_matches_file_create() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.json");
        let sibling = dir.path().join("plain.json");

        save_results(&vec![1.0], &path, &JsonCodec::compact()).unwrap();
        File::create(&sibling).unwrap();

        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&path), mode(&sibling));
    }

    #[cfg(unix)]
    #[test]
    fn test_overwrite_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.json");
        save_results(&vec![1.0], &path, &JsonCodec::compact()).unwrap();
        fs::set_permissions(&path, Permissions::from_mode(0o640)).unwrap();

        save_results(&vec![2.0], &path, &JsonCodec::compact()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result: Result<Vec<f64>, _> =
            load_results(dir.path().join("absent.json"), &JsonCodec::compact());
        assert!(matches!(result, Err(BenchError::Io(_))));
    }
}
