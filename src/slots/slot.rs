//! Slot data model: lane identity, phase variants, and the file seam.

use std::fmt;

/// Minimal view of a locally picked file.
///
/// The manager only ever needs a display name and a byte size; the real
/// `web_sys::File` handle stays opaque behind this trait so the state
/// machine runs (and is tested) off the browser.
pub trait FileLike: Clone {
    /// File name as shown by the picker, including extension.
    fn name(&self) -> String;
    /// Size in bytes.
    fn size(&self) -> u64;
}

/// Unique identifier for an upload lane.
///
/// Random hex token, stable for the lifetime of the lane. Clearing a lane
/// resets its contents but keeps its id, so keyed rendering and in-flight
/// transport callbacks stay attached to the right lane.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SlotId(String);

impl SlotId {
    /// Generate a fresh id token.
    pub(crate) fn generate() -> Self {
        Self(hex::encode(rand::random::<[u8; 6]>()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where an upload lane is in its life cycle.
///
/// The tagged variants make illegal field combinations unrepresentable: a
/// lane cannot hold both an unsent file and a confirmed upload, except for
/// the explicit `Replacing` staging state, which remembers the previous
/// location until the swap upload confirms.
#[derive(Clone, Debug, PartialEq)]
pub enum SlotPhase<F> {
    /// Empty lane, nothing picked yet.
    Idle,
    /// A file is staged for its first upload.
    Selected { file: F },
    /// A file is staged to overwrite an already uploaded asset.
    Replacing { file: F, previous: String },
    /// Transport in flight. `previous` is carried through a replace.
    Uploading {
        file: F,
        previous: Option<String>,
        percent: u8,
    },
    /// The asset is stored; `location` is its canonical URL.
    Uploaded { location: String },
    /// The last attempt failed. The staged file is retained so the user
    /// can retry without reselecting.
    Failed {
        reason: String,
        file: F,
        previous: Option<String>,
    },
}

/// One upload lane.
#[derive(Clone, Debug, PartialEq)]
pub struct Slot<F> {
    /// Lane identity, stable across clears.
    pub id: SlotId,
    /// Current life-cycle phase.
    pub phase: SlotPhase<F>,
    /// Display name of the last picked file; survives the file handle
    /// being dropped on successful upload.
    pub original_name: Option<String>,
}

impl<F: FileLike> Slot<F> {
    /// A fresh empty lane.
    pub(crate) fn empty() -> Self {
        Self {
            id: SlotId::generate(),
            phase: SlotPhase::Idle,
            original_name: None,
        }
    }

    /// Upload progress, 0-100. Meaningful while uploading; pinned at 100
    /// once uploaded, 0 otherwise.
    pub fn progress_percent(&self) -> u8 {
        match &self.phase {
            SlotPhase::Uploading { percent, .. } => *percent,
            SlotPhase::Uploaded { .. } => 100,
            _ => 0,
        }
    }

    /// Canonical URL of the stored asset, if this lane has one confirmed.
    pub fn uploaded_location(&self) -> Option<&str> {
        match &self.phase {
            SlotPhase::Uploaded { location } => Some(location),
            _ => None,
        }
    }

    /// The staged, not-yet-confirmed file, if any.
    pub fn staged_file(&self) -> Option<&F> {
        match &self.phase {
            SlotPhase::Selected { file }
            | SlotPhase::Replacing { file, .. }
            | SlotPhase::Failed { file, .. } => Some(file),
            _ => None,
        }
    }

    /// Failure reason from the last attempt, if the lane is in error.
    pub fn last_error(&self) -> Option<&str> {
        match &self.phase {
            SlotPhase::Failed { reason, .. } => Some(reason),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, SlotPhase::Idle)
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self.phase, SlotPhase::Uploading { .. })
    }

    pub fn is_uploaded(&self) -> bool {
        matches!(self.phase, SlotPhase::Uploaded { .. })
    }

    /// True when this lane is staged to overwrite an uploaded asset.
    pub fn is_replacing(&self) -> bool {
        matches!(self.phase, SlotPhase::Replacing { .. })
    }

    /// CSS class for the lane's current phase.
    pub fn phase_class(&self) -> &'static str {
        match &self.phase {
            SlotPhase::Idle => "lane-idle",
            SlotPhase::Selected { .. } => "lane-selected",
            SlotPhase::Replacing { .. } => "lane-replacing",
            SlotPhase::Uploading { .. } => "lane-uploading",
            SlotPhase::Uploaded { .. } => "lane-uploaded",
            SlotPhase::Failed { .. } => "lane-failed",
        }
    }
}
