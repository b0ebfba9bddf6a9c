//! Built-in curator presets for `--quasarplay`.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CuratorPreset {
    pub key: &'static str,
    pub name: &'static str,
    pub curator_id: u64,
    /// File name under the data directory.
    pub output_file: &'static str,
}

impl CuratorPreset {
    pub(crate) fn output_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.output_file)
    }
}

pub(crate) const QUASARPLAY_PRESETS: [CuratorPreset; 2] = [
    CuratorPreset {
        key: "quasarplay",
        name: "퀘이사플레이",
        curator_id: 42_788_178,
        output_file: "quasarplay.json",
    },
    CuratorPreset {
        key: "quasarzone",
        name: "퀘이사존",
        curator_id: 30_894_603,
        output_file: "quasarzone.json",
    },
];
