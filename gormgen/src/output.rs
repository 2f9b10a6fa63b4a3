//! Formatting and writing generated Go files.

use std::{fs, io::Write, path::Path, process::Command};

use eyre::{Context, Result, bail};
use log::debug;

/// Write `code` to `path`, creating parent directories.
///
/// When a formatter is given the code is run through it first and the
/// formatted text is what lands on disk.
pub fn write_go_file(code: &str, path: &Path, formatter: Option<&str>) -> Result<()> {
    let code = match formatter {
        Some(tool) => format_with(tool, code)?,
        None => code.to_string(),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, code).wrap_err_with(|| format!("Failed to write {}", path.display()))
}

/// Run `<tool> <file>` on a temporary copy of `code` and return its stdout.
pub fn format_with(tool: &str, code: &str) -> Result<String> {
    let mut file = tempfile::Builder::new()
        .prefix("gormgen")
        .suffix(".go")
        .tempfile()
        .wrap_err("Failed to create temporary file")?;
    file.write_all(code.as_bytes())
        .and_then(|_| file.flush())
        .wrap_err("Failed to write temporary file")?;

    debug!("running {} {}", tool, file.path().display());
    let output = Command::new(tool)
        .arg(file.path())
        .output()
        .wrap_err_with(|| format!("Failed to run formatter '{}'", tool))?;

    if !output.status.success() {
        bail!(
            "Formatter '{}' failed: {}",
            tool,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CODE: &str = "package models\n\ntype User struct {\n}\n";

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("models/nested/user.go");

        write_go_file(CODE, &path, None).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), CODE);
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.go");
        fs::write(&path, "stale").unwrap();

        write_go_file(CODE, &path, None).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), CODE);
    }

    #[cfg(unix)]
    #[test]
    fn test_formatter_output_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.go");

        // `cat` echoes the file back, standing in for goimports.
        write_go_file(CODE, &path, Some("cat")).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), CODE);
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_formatter_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.go");

        let err = write_go_file(CODE, &path, Some("false")).unwrap_err();
        assert!(err.to_string().contains("Formatter 'false' failed"));
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_formatter() {
        let err = format_with("gormgen-no-such-formatter", CODE).unwrap_err();
        assert!(err.to_string().contains("gormgen-no-such-formatter"));
    }
}
