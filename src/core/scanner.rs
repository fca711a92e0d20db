use crate::domain::model::Package;
use crate::utils::error::{GenError, Result};
use std::collections::HashSet;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

pub const SETUP_PY: &str = "setup.py";
pub const PACKAGE_XML: &str = "package.xml";

pub const DEFAULT_EXCLUDED_DIRS: &[&str] =
    &["__pycache__", "build", "devel", "install", ".git", ".vscode"];

/// A Python ROS package carries both a `setup.py` and a `package.xml`.
pub fn is_python_ros_package(dir: &Path) -> bool {
    dir.join(SETUP_PY).is_file() && dir.join(PACKAGE_XML).is_file()
}

/// A failure on the scan root aborts; anything deeper is logged and skipped.
fn tolerate_walk_error(depth: usize, err: GenError) -> Result<()> {
    if depth == 0 {
        return Err(err);
    }
    tracing::warn!("⚠️ Skipping unreadable entry: {}", err);
    Ok(())
}

#[derive(Debug, Clone)]
pub struct PackageScanner {
    excluded_dirs: HashSet<String>,
    skip_hidden: bool,
}

impl Default for PackageScanner {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()), true)
    }
}

impl PackageScanner {
    pub fn new(excluded_dirs: impl IntoIterator<Item = String>, skip_hidden: bool) -> Self {
        Self {
            excluded_dirs: excluded_dirs.into_iter().collect(),
            skip_hidden,
        }
    }

    fn is_pruned(&self, entry: &DirEntry) -> bool {
        // 起始目錄本身永遠不剪枝
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }

        let name = entry.file_name().to_string_lossy();
        self.excluded_dirs.contains(name.as_ref()) || (self.skip_hidden && name.starts_with('.'))
    }

    /// Walks `src_root` top-down and returns every package found, in file-name order.
    pub fn scan(&self, src_root: &Path) -> Result<Vec<Package>> {
        let walker = WalkDir::new(src_root)
            .follow_links(false)
            .sort_by_file_name();

        let mut packages = Vec::new();

        for entry in walker.into_iter().filter_entry(|e| !self.is_pruned(e)) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tolerate_walk_error(err.depth(), GenError::from(err))?;
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            if is_python_ros_package(entry.path()) {
                let package = Package::from_dir(entry.path());
                tracing::debug!("📦 Found package '{}' at {}", package.name, package.path.display());
                packages.push(package);
            }
        }

        Ok(packages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn make_package(root: &Path, rel: &str, with_src: bool) {
        let dir = root.join(rel);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(SETUP_PY), "").unwrap();
        fs::write(dir.join(PACKAGE_XML), "<package/>").unwrap();
        if with_src {
            fs::create_dir_all(dir.join("src")).unwrap();
        }
    }

    fn names(packages: &[Package]) -> Vec<&str> {
        packages.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_marker_files_must_both_be_regular_files() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();

        fs::write(dir.join(PACKAGE_XML), "").unwrap();
        assert!(!is_python_ros_package(dir));

        fs::create_dir(dir.join(SETUP_PY)).unwrap();
        assert!(!is_python_ros_package(dir));

        fs::remove_dir(dir.join(SETUP_PY)).unwrap();
        fs::write(dir.join(SETUP_PY), "").unwrap();
        assert!(is_python_ros_package(dir));
    }

    #[test]
    fn test_scan_prunes_excluded_and_hidden_dirs() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        make_package(root, "nav/planner", true);
        make_package(root, "build/generated", true);
        make_package(root, "__pycache__/cached", true);
        make_package(root, ".hidden/secret", true);

        let packages = PackageScanner::default().scan(root).unwrap();
        assert_eq!(names(&packages), vec!["planner"]);
    }

    #[test]
    fn test_scan_includes_hidden_when_requested() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        make_package(root, ".hidden/secret", true);

        let scanner = PackageScanner::new(Vec::new(), false);
        let packages = scanner.scan(root).unwrap();
        assert_eq!(names(&packages), vec!["secret"]);
    }

    #[test]
    fn test_root_is_never_pruned() {
        let temp = TempDir::new().unwrap();
        make_package(temp.path(), "build", true);

        let root = temp.path().join("build");
        let packages = PackageScanner::default().scan(&root).unwrap();
        assert_eq!(names(&packages), vec!["build"]);
    }

    #[test]
    fn test_nested_packages_are_found_in_name_order() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        make_package(root, "zeta", true);
        make_package(root, "alpha", false);
        make_package(root, "alpha/inner", true);

        let packages = PackageScanner::default().scan(root).unwrap();
        assert_eq!(names(&packages), vec!["alpha", "inner", "zeta"]);
        assert!(packages[0].src_dir.is_none());
        assert_eq!(packages[1].src_dir, Some(root.join("alpha/inner/src")));
    }

    #[test]
    fn test_walk_errors_below_root_are_skipped() {
        let err = || GenError::Scan {
            path: PathBuf::from("/ws/src/locked"),
            message: "Permission denied".to_string(),
        };

        assert!(tolerate_walk_error(1, err()).is_ok());
        assert!(tolerate_walk_error(3, err()).is_ok());
        assert!(matches!(
            tolerate_walk_error(0, err()),
            Err(GenError::Scan { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_does_not_fail_scan() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let root = temp.path();
        make_package(root, "open_pkg", true);
        make_package(root, "locked/hidden_pkg", true);

        let locked = root.join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        // root 可無視權限，此時只驗證掃描不會失敗
        let enforced = fs::read_dir(&locked).is_err();

        let result = PackageScanner::default().scan(root);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let packages = result.unwrap();
        assert!(names(&packages).contains(&"open_pkg"));
        if enforced {
            assert_eq!(names(&packages), vec!["open_pkg"]);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_not_followed() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        let outside = temp.path().join("outside");
        make_package(&outside, "linked_pkg", true);

        let root = temp.path().join("src");
        make_package(&root, "real_pkg", true);
        symlink(outside.join("linked_pkg"), root.join("linked_pkg")).unwrap();
        // 指回自身的迴圈
        symlink(&root, root.join("real_pkg/loop")).unwrap();

        let packages = PackageScanner::default().scan(&root).unwrap();
        assert_eq!(names(&packages), vec!["real_pkg"]);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = PackageScanner::default().scan(&temp.path().join("missing"));
        assert!(matches!(result, Err(GenError::Scan { .. })));
    }
}
