//! Loading program graph snapshots from disk.
//!
//! The front end writes one `*.pgraph.json` file per source tree. Paths given
//! on the command line may name snapshot files directly or directories that
//! are searched recursively.
//!
//! Performance characteristics:
//! - Early directory pruning via `WalkDir::filter_entry`
//! - Snapshot files are read and deserialized in parallel
//!
//! Loading is all-or-nothing: any unreadable or malformed snapshot, a package
//! supplied twice, or a package with front-end diagnostics fails the run.

use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use super::ast::Program;
use crate::error::{ExhaustiveError, ExhaustiveResult, IoResultExt};

/// File name suffix identifying program graph snapshots.
pub const SNAPSHOT_SUFFIX: &str = ".pgraph.json";

/// Directories never searched for snapshots.
const EXCLUDED_DIRS: &[&str] = &["target", ".git", "node_modules"];

#[inline]
fn is_excluded_dir(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| EXCLUDED_DIRS.contains(&name))
}

fn is_snapshot(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(SNAPSHOT_SUFFIX))
}

/// Collects snapshot files under `root`, sorted by path.
///
/// A `root` that is itself a file is returned as-is regardless of its name.
pub fn gather_snapshot_files(root: &Path) -> ExhaustiveResult<Vec<PathBuf>> {
    let meta = fs::metadata(root).with_path(root)?;
    if meta.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| !is_excluded_dir(e))
        .par_bridge()
        .filter_map(|entry| match entry {
            Ok(e) if is_snapshot(e.path()) => Some(Ok(e.into_path())),
            Ok(_) => None,
            Err(e) => {
                let path = e.path().unwrap_or(root).to_path_buf();
                Some(Err(ExhaustiveError::io(path, e.into())))
            }
        })
        .collect::<ExhaustiveResult<Vec<_>>>()?;

    // par_bridge does not preserve walk order
    files.sort();
    Ok(files)
}

/// Reads and deserializes one snapshot file.
pub fn load_snapshot(path: &Path) -> ExhaustiveResult<Program> {
    let content = fs::read_to_string(path).with_path(path)?;
    serde_json::from_str(&content).map_err(|e| ExhaustiveError::snapshot(path, &e))
}

/// Loads every snapshot reachable from `roots` and merges them into a
/// single program.
pub fn load_program(roots: &[PathBuf]) -> ExhaustiveResult<Program> {
    if roots.is_empty() {
        return Err(ExhaustiveError::invalid_argument("no input paths given"));
    }

    let mut files = Vec::new();
    let mut seen = HashSet::new();
    for root in roots {
        for file in gather_snapshot_files(root)? {
            if seen.insert(file.clone()) {
                files.push(file);
            }
        }
    }

    if files.is_empty() {
        return Err(ExhaustiveError::invalid_argument(format!(
            "no *{} snapshots found under {}",
            SNAPSHOT_SUFFIX,
            roots
                .iter()
                .map(|r| r.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }

    let snapshots = files
        .par_iter()
        .map(|file| load_snapshot(file).map(|program| (file, program)))
        .collect::<ExhaustiveResult<Vec<_>>>()?;

    let mut merged = Program::default();
    let mut package_paths = HashSet::new();
    for (file, program) in snapshots {
        debug!(snapshot = %file.display(), packages = program.packages.len(), "loaded snapshot");
        for package in program.packages {
            if !package_paths.insert(package.path.clone()) {
                return Err(ExhaustiveError::DuplicatePackage {
                    package: package.path,
                    path: file.clone(),
                });
            }
            merged.packages.push(package);
        }
    }

    if let Some(failed) = merged.packages.iter().find(|p| !p.diagnostics.is_empty()) {
        return Err(ExhaustiveError::TypeCheck {
            package: failed.path.clone(),
            diagnostics: failed.diagnostics.clone(),
        });
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_dir(name: &str) -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "exhaustive_load_{}_{}_{}",
            name,
            std::process::id(),
            id
        ));
        if dir.exists() {
            fs::remove_dir_all(&dir).ok();
        }
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_gather_finds_nested_snapshots_sorted() {
        let dir = temp_dir("gather");
        write(&dir.join("b/two.pgraph.json"), r#"{"packages": []}"#);
        write(&dir.join("a/one.pgraph.json"), r#"{"packages": []}"#);
        write(&dir.join("a/notes.json"), "{}");
        write(&dir.join("target/stale.pgraph.json"), r#"{"packages": []}"#);

        let files = gather_snapshot_files(&dir).unwrap();
        assert_eq!(
            files,
            vec![dir.join("a/one.pgraph.json"), dir.join("b/two.pgraph.json")]
        );

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_gather_missing_path_is_io_error() {
        let err = gather_snapshot_files(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, ExhaustiveError::Io { .. }));
    }

    #[test]
    fn test_load_merges_packages() {
        let dir = temp_dir("merge");
        write(&dir.join("x.pgraph.json"), r#"{"packages": [{"path": "x"}]}"#);
        write(
            &dir.join("y.pgraph.json"),
            r#"{"packages": [{"path": "y", "initial": false}]}"#,
        );

        let program = load_program(&[dir.clone()]).unwrap();
        let paths: Vec<_> = program.packages.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(paths, vec!["x", "y"]);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_same_file_twice_is_loaded_once() {
        let dir = temp_dir("dedupe");
        let file = dir.join("x.pgraph.json");
        write(&file, r#"{"packages": [{"path": "x"}]}"#);

        let program = load_program(&[file.clone(), dir.clone()]).unwrap();
        assert_eq!(program.packages.len(), 1);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_duplicate_package_fails() {
        let dir = temp_dir("dup");
        write(&dir.join("a.pgraph.json"), r#"{"packages": [{"path": "x"}]}"#);
        write(&dir.join("b.pgraph.json"), r#"{"packages": [{"path": "x"}]}"#);

        let err = load_program(&[dir.clone()]).unwrap_err();
        assert!(matches!(err, ExhaustiveError::DuplicatePackage { ref package, .. } if package == "x"));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_diagnostics_fail_the_load() {
        let dir = temp_dir("diag");
        write(
            &dir.join("a.pgraph.json"),
            r#"{"packages": [{"path": "x", "diagnostics": ["x.go:1:1: expected 'package'"]}]}"#,
        );

        let err = load_program(&[dir.clone()]).unwrap_err();
        assert!(matches!(err, ExhaustiveError::TypeCheck { .. }));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_malformed_snapshot_fails() {
        let dir = temp_dir("malformed");
        write(&dir.join("a.pgraph.json"), r#"{"packages": [{"files": 3}]}"#);

        let err = load_program(&[dir.clone()]).unwrap_err();
        assert!(matches!(err, ExhaustiveError::Snapshot { .. }));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_empty_directory_is_invalid_argument() {
        let dir = temp_dir("empty");
        let err = load_program(&[dir.clone()]).unwrap_err();
        assert!(matches!(err, ExhaustiveError::InvalidArgument { .. }));
        fs::remove_dir_all(&dir).ok();

        assert!(load_program(&[]).is_err());
    }
}
