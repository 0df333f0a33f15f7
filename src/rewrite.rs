//! In-place file rewriting.
//!
//! The new contents go to `<file>.tmp`, which replaces the file only once it
//! has been written completely. With a backup the original is first copied
//! to `<file>.bak`.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::Result;

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

pub fn temp_path(path: &Path) -> PathBuf {
    with_suffix(path, ".tmp")
}

pub fn backup_path(path: &Path) -> PathBuf {
    with_suffix(path, ".bak")
}

/// Replace `path` with what `write` produces from its current contents.
///
/// On error the temp file is removed and `path` is left as it was.
pub fn rewrite_in_place<F>(path: &Path, backup: bool, write: F) -> Result<()>
where
    F: FnOnce(BufReader<File>, File) -> Result<()>,
{
    let tmp = temp_path(path);
    tracing::info!(path = %path.display(), tmp = %tmp.display(), "rewriting in place");

    let permissions = fs::metadata(path)?.permissions();
    let source = BufReader::new(File::open(path)?);
    let target = File::create(&tmp)?;

    let written = target
        .set_permissions(permissions)
        .map_err(Into::into)
        .and_then(|()| write(source, target));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }

    // The source stays in place until the temp file replaces it.
    let replaced = if backup {
        fs::copy(path, backup_path(path)).map(drop)
    } else {
        Ok(())
    }
    .and_then(|()| fs::rename(&tmp, path));
    if let Err(e) = replaced {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::{Read, Write};

    fn uppercase(mut reader: BufReader<File>, mut out: File) -> Result<()> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        out.write_all(text.to_uppercase().as_bytes())?;
        Ok(())
    }

    #[test]
    fn suffixes_are_appended() {
        assert_eq!(temp_path(Path::new("a/b.txt")), PathBuf::from("a/b.txt.tmp"));
        assert_eq!(backup_path(Path::new("b")), PathBuf::from("b.bak"));
    }

    #[test]
    fn replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f.txt");
        fs::write(&path, "abc\n").unwrap();

        rewrite_in_place(&path, false, uppercase).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "ABC\n");
        assert!(!temp_path(&path).exists());
        assert!(!backup_path(&path).exists());
    }

    #[test]
    fn keeps_backup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f.txt");
        fs::write(&path, "abc\n").unwrap();

        rewrite_in_place(&path, true, uppercase).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "ABC\n");
        assert_eq!(fs::read_to_string(backup_path(&path)).unwrap(), "abc\n");
    }

    #[test]
    fn failure_leaves_source_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f.txt");
        fs::write(&path, "abc\n").unwrap();

        let err = rewrite_in_place(&path, true, |_, mut out| {
            out.write_all(b"partial")?;
            Err(Error::index_out_of_range())
        })
        .unwrap_err();

        assert!(err.is_index_out_of_range());
        assert_eq!(fs::read_to_string(&path).unwrap(), "abc\n");
        assert!(!temp_path(&path).exists());
        assert!(!backup_path(&path).exists());
    }

    #[test]
    fn failed_backup_leaves_source_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f.txt");
        fs::write(&path, "abc\n").unwrap();
        fs::create_dir(backup_path(&path)).unwrap();

        assert!(rewrite_in_place(&path, true, uppercase).is_err());

        assert_eq!(fs::read_to_string(&path).unwrap(), "abc\n");
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn stale_backup_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f.txt");
        fs::write(&path, "new\n").unwrap();
        fs::write(backup_path(&path), "old\n").unwrap();

        rewrite_in_place(&path, true, uppercase).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "NEW\n");
        assert_eq!(fs::read_to_string(backup_path(&path)).unwrap(), "new\n");
    }

    #[cfg(unix)]
    #[test]
    fn keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f.sh");
        fs::write(&path, "x\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o750)).unwrap();

        rewrite_in_place(&path, false, uppercase).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o750);
    }
}
