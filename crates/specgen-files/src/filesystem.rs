//! Writing generated artifacts below a root directory.
//!
//! Generated files are overwritten on every run. Scaffolds are written only
//! when nothing exists at their path, so hand-written implementations survive
//! regeneration.
//!
//! # Examples
//!
//! ```
//! use specgen_codegen::{GeneratedCode, GeneratedFile, Sink};
//! use specgen_files::FileSystemSink;
//! # use tempfile::TempDir;
//!
//! # let temp_dir = TempDir::new().unwrap();
//! # let output_dir = temp_dir.path();
//! let mut code = GeneratedCode::new();
//! code.add_file(GeneratedFile::generated("src/spec/mod.rs", "pub mod v1;\n"));
//! code.add_file(GeneratedFile::scaffolded("src/services/mod.rs", "pub mod v1;\n"));
//!
//! let mut sink = FileSystemSink::new(output_dir);
//! let report = sink.accept(&code).unwrap();
//!
//! assert_eq!(report.written.len(), 2);
//! assert!(output_dir.join("src/spec/mod.rs").exists());
//! ```

use crate::error::{FilesError, Result};
use specgen_codegen::{FileKind, GeneratedCode, Sink};
use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Options of a filesystem write.
///
/// # Examples
///
/// ```
/// use specgen_files::ExportOptions;
///
/// let options = ExportOptions::default().with_atomic_writes(false);
/// assert!(!options.atomic);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Write to a temp file, then rename over the target
    pub atomic: bool,
}

impl ExportOptions {
    /// Creates the default options: atomic writes.
    #[must_use]
    pub const fn new() -> Self {
        Self { atomic: true }
    }

    /// Sets whether to use atomic writes.
    #[must_use]
    pub const fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one [`FileSystemSink::accept`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    /// Artifact paths written, in emission order
    pub written: Vec<String>,
    /// Scaffold paths left untouched because a file already existed
    pub skipped: Vec<String>,
}

/// Sink writing artifacts below a root directory.
#[derive(Debug, Clone)]
pub struct FileSystemSink {
    root: PathBuf,
    options: ExportOptions,
}

impl FileSystemSink {
    /// Creates a sink rooted at `root` with default options.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            options: ExportOptions::default(),
        }
    }

    /// Replaces the write options.
    #[must_use]
    pub const fn with_options(mut self, options: ExportOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves an artifact path below the root.
    fn disk_path(&self, relative: &str) -> Result<PathBuf> {
        check_relative(relative)?;
        Ok(self.root.join(relative))
    }
}

impl Sink for FileSystemSink {
    type Report = WriteReport;
    type Error = FilesError;

    /// Writes `code` below the root.
    ///
    /// Every path is checked before the first write, so a rejected path
    /// leaves the tree untouched.
    fn accept(&mut self, code: &GeneratedCode) -> Result<WriteReport> {
        tracing::info!(
            root = %self.root.display(),
            files = code.file_count(),
            "Writing generated code"
        );

        let targets = code
            .files()
            .map(|file| Ok((file, self.disk_path(file.path())?)))
            .collect::<Result<Vec<_>>>()?;

        let dirs: BTreeSet<&Path> = targets
            .iter()
            .filter_map(|(_, path)| path.parent())
            .collect();
        for dir in dirs {
            fs::create_dir_all(dir).map_err(|source| FilesError::Io {
                action: "create directory",
                path: dir.display().to_string(),
                source,
            })?;
        }

        let mut report = WriteReport::default();
        for (file, path) in &targets {
            if file.kind == FileKind::Scaffolded && path.exists() {
                tracing::debug!(path = file.path(), "Keeping existing scaffold");
                report.skipped.push(file.path().to_string());
                continue;
            }
            write_file(path, file.content(), self.options)?;
            tracing::debug!(path = file.path(), "Wrote file");
            report.written.push(file.path().to_string());
        }

        tracing::info!(
            written = report.written.len(),
            skipped = report.skipped.len(),
            "Finished writing generated code"
        );
        Ok(report)
    }
}

/// Accepts only relative `/`-separated paths without `.` or `..` segments.
fn check_relative(path: &str) -> Result<()> {
    if path.is_empty() || path.starts_with('/') || path.starts_with('\\') || path.contains(':') {
        return Err(FilesError::InvalidPath {
            path: path.to_string(),
        });
    }
    if path
        .split(['/', '\\'])
        .any(|segment| matches!(segment, "" | "." | ".."))
    {
        return Err(FilesError::InvalidPathComponent {
            path: path.to_string(),
        });
    }
    Ok(())
}

fn write_file(path: &Path, content: &str, options: ExportOptions) -> Result<()> {
    let io_error = |action: &'static str, path: &Path| {
        let path = path.display().to_string();
        move |source| FilesError::Io {
            action,
            path,
            source,
        }
    };

    if !options.atomic {
        return fs::write(path, content).map_err(io_error("write", path));
    }

    let mut temp_path = path.as_os_str().to_owned();
    temp_path.push(".tmp");
    let temp_path = PathBuf::from(temp_path);

    let mut file = fs::File::create(&temp_path).map_err(io_error("create", &temp_path))?;
    file.write_all(content.as_bytes())
        .map_err(io_error("write", &temp_path))?;
    file.sync_all().map_err(io_error("sync", &temp_path))?;
    fs::rename(&temp_path, path).map_err(io_error("rename", &temp_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use specgen_codegen::GeneratedFile;
    use tempfile::TempDir;

    fn code(files: Vec<GeneratedFile>) -> GeneratedCode {
        let mut code = GeneratedCode::new();
        for file in files {
            code.add_file(file);
        }
        code
    }

    #[test]
    fn test_check_relative() {
        assert!(check_relative("src/spec/mod.rs").is_ok());
        assert!(check_relative("").unwrap_err().is_invalid_path());
        assert!(check_relative("/etc/passwd").unwrap_err().is_invalid_path());
        assert!(check_relative("C:/spec.rs").unwrap_err().is_invalid_path());
        assert!(matches!(
            check_relative("src/../../etc"),
            Err(FilesError::InvalidPathComponent { .. })
        ));
        assert!(check_relative("src//mod.rs").is_err());
        assert!(check_relative("./mod.rs").is_err());
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let mut sink = FileSystemSink::new(temp.path());
        sink.accept(&code(vec![GeneratedFile::generated("a/mod.rs", "x")]))
            .unwrap();

        assert_eq!(fs::read_to_string(temp.path().join("a/mod.rs")).unwrap(), "x");
        assert!(!temp.path().join("a/mod.rs.tmp").exists());
    }

    #[test]
    fn test_direct_write() {
        let temp = TempDir::new().unwrap();
        let mut sink = FileSystemSink::new(temp.path())
            .with_options(ExportOptions::default().with_atomic_writes(false));
        let report = sink
            .accept(&code(vec![GeneratedFile::generated("mod.rs", "direct")]))
            .unwrap();

        assert_eq!(report.written, ["mod.rs"]);
        assert_eq!(fs::read_to_string(temp.path().join("mod.rs")).unwrap(), "direct");
    }

    #[test]
    fn test_rejected_path_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let mut sink = FileSystemSink::new(temp.path());
        let err = sink
            .accept(&code(vec![
                GeneratedFile::generated("src/ok.rs", ""),
                GeneratedFile::generated("../escape.rs", ""),
            ]))
            .unwrap_err();

        assert!(err.is_invalid_path());
        assert!(!temp.path().join("src").exists());
    }
}
