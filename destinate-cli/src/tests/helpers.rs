//! Test helpers for writing rank requests into temporary workspaces.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use destinate_core::{CandidateRecord, FieldValue, Location, RankRequest};
use tempfile::TempDir;

/// Temporary directory exposed as a UTF-8 path.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    let mut file = destinate_fs::create_utf8_file(path).expect("create file");
    file.write_all(contents).expect("write file");
}

/// Three Jakarta-area destinations with a textual price on one record.
pub(super) fn sample_request() -> RankRequest {
    let mut ancol = CandidateRecord::numeric("Ancol", 25_000.0, 4.3, 5_000.0, -6.1223, 106.8316);
    ancol.price = Some(FieldValue::from("25000"));
    RankRequest::new(
        Location::new(-6.2088, 106.8456).expect("valid origin"),
        vec![
            ancol,
            CandidateRecord::numeric("Kebun Raya Bogor", 15_000.0, 4.6, 30_000.0, -6.5976, 106.7997),
            CandidateRecord::numeric("Ubud", 50_000.0, 4.7, 1_500.0, -8.5069, 115.2625),
        ],
    )
}

pub(super) fn write_request(path: &Utf8Path, request: &RankRequest) {
    let payload = serde_json::to_string_pretty(request).expect("serialise request");
    write_utf8(path, payload.as_bytes());
}
