//! Capability-based file helpers for dataset input and report output.

use std::io;
use std::path::Component;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Open `path` for reading with ambient authority.
pub(crate) fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Report whether `path` names an existing regular file.
pub(crate) fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_parent(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

/// Create `path`'s parent directories, then replace the file with `contents`.
pub(crate) fn write_utf8_file(path: &Utf8Path, contents: &str) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_parent(path)?;
    dir.write(name.as_str(), contents)
}

fn open_parent(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent().filter(|parent| !parent.as_str().is_empty()) else {
        return Ok(());
    };
    let (base, relative) = split_anchor(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?.create_dir_all(&relative)
}

/// Split `path` into the directory it is anchored at and the remainder.
///
/// Absolute paths anchor at their root (and drive prefix on Windows);
/// relative paths anchor at the current directory.
fn split_anchor(path: &Utf8Path) -> io::Result<(Utf8PathBuf, Utf8PathBuf)> {
    let mut anchor = Utf8PathBuf::new();
    for component in path.as_std_path().components() {
        match component {
            Component::Prefix(prefix) => {
                let text = prefix
                    .as_os_str()
                    .to_str()
                    .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
                anchor.push(text);
            }
            Component::RootDir => anchor.push(std::path::MAIN_SEPARATOR_STR),
            _ => break,
        }
    }
    if anchor.as_str().is_empty() {
        return Ok((Utf8PathBuf::from("."), path.to_path_buf()));
    }
    let relative = path
        .strip_prefix(&anchor)
        .map_err(|_| io::Error::other(format!("cannot split {path} at {anchor}")))?;
    Ok((anchor, relative.to_path_buf()))
}
