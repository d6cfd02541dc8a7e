//! Test helpers for writing park layouts to disk.

use camino::{Utf8Path, Utf8PathBuf};
use ridepark_core::test_support::{sample_rides, sample_visitors, sample_walkways};
use ridepark_core::{RideId, VisitorId};
use tempfile::TempDir;

use crate::{ParkLayout, RideVisit};

/// A layout file inside a temporary directory.
pub(super) struct LayoutFile {
    _dir: TempDir,
    root: Utf8PathBuf,
    path: Utf8PathBuf,
}

impl LayoutFile {
    /// Write `contents` as `layout.json` in a fresh directory.
    pub(super) fn with_contents(contents: &[u8]) -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let path = root.join("layout.json");
        write_utf8(&path, contents);
        Self {
            _dir: dir,
            root,
            path,
        }
    }

    /// Write a layout as JSON.
    pub(super) fn with_layout(layout: &ParkLayout) -> Self {
        let payload = serde_json::to_string_pretty(layout).expect("serialise layout");
        Self::with_contents(payload.as_bytes())
    }

    /// The sample park with Grace queued for ride 2 and Ada back from ride 4.
    pub(super) fn sample() -> Self {
        Self::with_layout(&sample_layout())
    }

    pub(super) fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }
}

pub(super) fn sample_layout() -> ParkLayout {
    ParkLayout {
        rides: sample_rides(),
        visitors: sample_visitors(),
        walkways: sample_walkways(),
        queues: vec![visit(2, 1002)],
        experiences: vec![visit(4, 1001)],
    }
}

pub(super) fn visit(ride: u32, visitor: u32) -> RideVisit {
    RideVisit {
        ride: RideId::new(ride),
        visitor: VisitorId::new(visitor).expect("valid visitor id"),
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write layout file");
}
