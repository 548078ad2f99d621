//! Process tensor fixtures required by a suite.

use crate::process_tensor::SpinBosonPt;
use crate::BenchError;
use std::path::{Path, PathBuf};
use tracing::info;

/// Produces a missing fixture file.
pub trait FixtureGenerator {
    fn generate(&self, name: &str, path: &Path) -> Result<(), BenchError>;
}

/// Directory of `<name>.hdf5` process tensor files.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureStore {
    dir: PathBuf,
}

impl FixtureStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.hdf5", name))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).is_file()
    }

    /// Names from `names` without a fixture file, in order.
    pub fn missing<'a>(&self, names: &[&'a str]) -> Vec<&'a str> {
        names.iter().copied().filter(|name| !self.exists(name)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixtureStatus {
    AlreadyExists(String),
    Generated(String),
}

/// Make sure every fixture in `names` exists, generating the missing ones in order.
///
/// Every name is validated before anything is generated. The store directory
/// is created if needed.
pub fn prepare<G: FixtureGenerator>(
    store: &FixtureStore,
    names: &[&str],
    generator: &G,
) -> Result<Vec<FixtureStatus>, BenchError> {
    for name in names {
        name.parse::<SpinBosonPt>()?;
    }

    std::fs::create_dir_all(store.dir())?;

    let mut statuses = Vec::with_capacity(names.len());
    for name in names {
        if store.exists(name) {
            info!(fixture = %name, "process tensor already exists");
            statuses.push(FixtureStatus::AlreadyExists(name.to_string()));
        } else {
            info!(fixture = %name, "generating process tensor");
            generator.generate(name, &store.path_for(name))?;
            statuses.push(FixtureStatus::Generated(name.to_string()));
        }
    }

    Ok(statuses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    const PT_A: &str =
        "spinBoson_alpha0.25_zeta1.0_T39.3_cutoff1.0expon_tcut227.9_dt10_steps06_epsrel15";
    const PT_B: &str =
        "spinBoson_alpha0.08_zeta1.0_T0.8_cutoff1.0gauss_tcut2.0_dt04_steps06_epsrel15";

    #[derive(Default)]
    struct RecordingGenerator {
        generated: RefCell<Vec<String>>,
    }

    impl FixtureGenerator for RecordingGenerator {
        fn generate(&self, name: &str, path: &Path) -> Result<(), BenchError> {
            self.generated.borrow_mut().push(name.to_string());
            fs::write(path, b"pt")?;
            Ok(())
        }
    }

    #[test]
    fn test_store_paths() {
        let store = FixtureStore::new("tests/data/process_tensors");
        assert_eq!(
            store.path_for("pt"),
            PathBuf::from("tests/data/process_tensors/pt.hdf5")
        );
    }

    #[test]
    fn test_prepare_generates_only_missing() {
        let dir = TempDir::new().unwrap();
        let store = FixtureStore::new(dir.path());
        fs::write(store.path_for(PT_A), b"existing").unwrap();

        let generator = RecordingGenerator::default();
        let statuses = prepare(&store, &[PT_A, PT_B], &generator).unwrap();

        assert_eq!(
            statuses,
            vec![
                FixtureStatus::AlreadyExists(PT_A.to_string()),
                FixtureStatus::Generated(PT_B.to_string()),
            ]
        );
        assert_eq!(*generator.generated.borrow(), vec![PT_B.to_string()]);
        assert!(store.missing(&[PT_A, PT_B]).is_empty());
        assert_eq!(fs::read(store.path_for(PT_A)).unwrap(), b"existing");
    }

    #[test]
    fn test_prepare_creates_store_dir() {
        let dir = TempDir::new().unwrap();
        let store = FixtureStore::new(dir.path().join("nested").join("pts"));

        let generator = RecordingGenerator::default();
        prepare(&store, &[PT_A], &generator).unwrap();

        assert!(store.exists(PT_A));
    }

    #[test]
    fn test_prepare_rejects_invalid_name_before_generating() {
        let dir = TempDir::new().unwrap();
        let store = FixtureStore::new(dir.path());

        let generator = RecordingGenerator::default();
        let result = prepare(&store, &[PT_A, "not_a_pt"], &generator);

        assert!(matches!(result, Err(BenchError::InvalidProcessTensorName(_))));
        assert!(generator.generated.borrow().is_empty());
    }
}
