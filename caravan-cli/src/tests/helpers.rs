//! Test helpers for composing solve CLI fixtures on disk.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// Five-node instance small enough to reason about by hand.
pub(super) const TOY_INSTANCE: &str = "\
NAME : toy-n5-k2
COMMENT : hand-rolled
TYPE : CVRP
DIMENSION : 5
EDGE_WEIGHT_TYPE : EUC_2D
CAPACITY : 10
NODE_COORD_SECTION
1 0 0
2 3 4
3 0 5
4 6 8
5 5 0
DEMAND_SECTION
1 0
2 4
3 6
4 5
5 5
DEPOT_SECTION
1
EOF
";

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write test file");
}

/// Instance file in a temporary directory, removed on drop.
pub(super) struct InstanceFile {
    _dir: TempDir,
    pub(super) path: Utf8PathBuf,
}

impl InstanceFile {
    pub(super) fn new(contents: &str) -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
        let path = root.join("toy.vrp");
        write_utf8(&path, contents.as_bytes());
        Self { _dir: dir, path }
    }
}
