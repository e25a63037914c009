use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildFile {
    pub filename: String,
    pub filepath: String,
    pub size: u64,
}

/// One downloadable build as served by the upstream feed. The file sequence
/// keeps upstream order; the first entry is the primary download artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Build {
    pub datetime: i64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub romtype: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub files: Vec<BuildFile>,
}

/// A build annotated for rendering: primary-artifact metadata from the first
/// file, plus the recovery image when the device expects one.
#[derive(Debug, Clone, Serialize)]
pub struct RomView {
    pub datetime: i64,
    pub date: String,
    pub romtype: String,
    pub version: String,
    pub filename: Option<String>,
    pub filepath: Option<String>,
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery: Option<BuildFile>,
}

impl RomView {
    /// Primary annotations are filled regardless of the recovery flag; only
    /// the recovery pick is gated on it.
    pub fn from_build(build: Build, wants_recovery: bool) -> Self {
        let recovery = if wants_recovery {
            select_recovery(&build.files).cloned()
        } else {
            None
        };
        let first = build.files.first();
        Self {
            datetime: build.datetime,
            filename: first.map(|f| f.filename.clone()),
            filepath: first.map(|f| f.filepath.clone()),
            size: first.map(|f| f.size),
            date: build.date,
            romtype: build.romtype,
            version: build.version,
            recovery,
        }
    }
}

/// `recovery.img` wins over `boot.img`; position in the file list does not
/// matter. Returns nothing when neither is present.
pub fn select_recovery(files: &[BuildFile]) -> Option<&BuildFile> {
    files
        .iter()
        .find(|f| f.filename == "recovery.img")
        .or_else(|| files.iter().find(|f| f.filename == "boot.img"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> BuildFile {
        BuildFile {
            filename: name.into(),
            filepath: format!("/full/bacon/20240115/{name}"),
            size: 1024,
        }
    }

    fn build(files: Vec<BuildFile>) -> Build {
        Build {
            datetime: 1_705_276_800,
            date: "2024-01-15".into(),
            romtype: "nightly".into(),
            version: "21.0".into(),
            files,
        }
    }

    #[test]
    fn recovery_img_wins_regardless_of_position() {
        let rom = RomView::from_build(
            build(vec![file("lineage.zip"), file("boot.img"), file("recovery.img")]),
            true,
        );
        assert_eq!(rom.recovery.unwrap().filename, "recovery.img");
    }

    #[test]
    fn boot_img_is_the_fallback() {
        let rom = RomView::from_build(build(vec![file("lineage.zip"), file("boot.img")]), true);
        assert_eq!(rom.recovery.unwrap().filename, "boot.img");
    }

    #[test]
    fn no_candidate_means_no_annotation() {
        let rom = RomView::from_build(build(vec![file("lineage.zip")]), true);
        assert!(rom.recovery.is_none());
    }

    #[test]
    fn primary_metadata_comes_from_the_first_file() {
        let rom = RomView::from_build(
            build(vec![file("lineage.zip"), file("recovery.img")]),
            true,
        );
        assert_eq!(rom.filename.as_deref(), Some("lineage.zip"));
        assert_eq!(
            rom.filepath.as_deref(),
            Some("/full/bacon/20240115/lineage.zip")
        );
        assert_eq!(rom.size, Some(1024));
    }

    #[test]
    fn opted_out_devices_keep_primary_annotations_only() {
        let rom = RomView::from_build(
            build(vec![file("lineage.zip"), file("recovery.img")]),
            false,
        );
        assert!(rom.recovery.is_none());
        assert_eq!(rom.filename.as_deref(), Some("lineage.zip"));
    }

    #[test]
    fn empty_file_list_yields_absent_annotations() {
        let rom = RomView::from_build(build(vec![]), true);
        assert!(rom.filename.is_none());
        assert!(rom.filepath.is_none());
        assert!(rom.size.is_none());
        assert!(rom.recovery.is_none());
    }
}
