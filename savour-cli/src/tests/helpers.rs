//! Test helpers for writing datasets into temporary workspaces.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// Six restaurants across three cities, one per line after the header.
pub(super) const SAMPLE_CSV: &str = "\
Restaurant Name,City,Primary Cuisine,Cost Category,Rating,Votes
Cafe A,Delhi,Indian,low,4.2,100
Cafe B,Delhi,Chinese,medium,4.0,500
Spice Route,Delhi,Indian,high,4.6,800
Harbour Grill,Mumbai,Seafood,high,4.4,1200
Bombay Tiffin,Mumbai,South Indian,low,3.9,300
Thai Orchid,Pune,Thai,medium,4.1,250
";

/// The sample dataset without its `Votes` column.
pub(super) const CSV_WITHOUT_VOTES: &str = "\
Restaurant Name,City,Primary Cuisine,Cost Category,Rating
Cafe A,Delhi,Indian,low,4.2
";

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directory");
    }
    fs::write(path, contents).expect("write file");
}

/// Temporary directory with UTF-8 paths.
#[derive(Debug)]
pub(super) struct Workspace {
    _tmp: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        Self { _tmp: tmp, root }
    }

    pub(super) fn path(&self, relative: &str) -> Utf8PathBuf {
        self.root.join(relative)
    }

    /// Write `contents` as `restaurants.csv` and return its path.
    pub(super) fn dataset(&self, contents: &str) -> Utf8PathBuf {
        let path = self.path("restaurants.csv");
        write_utf8(&path, contents.as_bytes());
        path
    }
}
