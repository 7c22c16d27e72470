//! Slot manager: owns the ordered lane collection and all transitions.

use chrono::{DateTime, Utc};

use crate::config::UploadConfig;
use crate::types::{AppError, AppResult};

use super::slot::{FileLike, Slot, SlotId, SlotPhase};

/// Everything the transport adapter needs to carry out one upload attempt.
///
/// Handed out by [`SlotManager::begin_upload`] after the lane has been
/// moved into `Uploading`; the adapter reports back through
/// `record_progress` / `complete_upload` / `fail_upload`.
#[derive(Clone, Debug)]
pub struct UploadTicket<F> {
    /// Lane this attempt belongs to.
    pub slot_id: SlotId,
    /// The staged file.
    pub file: F,
    /// Display name recorded at selection time.
    pub original_name: String,
    /// Client timestamp of when the attempt was queued.
    pub queued_at: DateTime<Utc>,
}

/// Coordinates file selection, validation, transport hand-off, progress,
/// and lane replenishment for an unbounded set of independent upload lanes.
///
/// All methods are synchronous transitions on plain data. Failures are
/// local to the named lane; sibling lanes are never touched. Late transport
/// callbacks for a lane that has since been cleared are dropped.
#[derive(Clone, Debug)]
pub struct SlotManager<F: FileLike> {
    config: UploadConfig,
    slots: Vec<Slot<F>>,
}

impl<F: FileLike> SlotManager<F> {
    /// A manager with one empty lane, the way the uploader first renders.
    pub fn new(config: UploadConfig) -> Self {
        Self {
            config,
            slots: vec![Slot::empty()],
        }
    }

    pub fn slots(&self) -> &[Slot<F>] {
        &self.slots
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    fn slot_mut(&mut self, id: &SlotId) -> AppResult<&mut Slot<F>> {
        self.slots
            .iter_mut()
            .find(|slot| &slot.id == id)
            .ok_or_else(|| AppError::Precondition(format!("unknown upload lane {}", id)))
    }

    /// Stage a picked file on a lane.
    ///
    /// Validates size and extension first; a rejected file leaves the lane
    /// untouched and never reaches the transport. On a lane that already
    /// holds an uploaded asset the pick is staged as a replace, keeping the
    /// previous location until the swap confirms.
    pub fn select_file(&mut self, id: &SlotId, file: F) -> AppResult<()> {
        self.config.validate_file(&file.name(), file.size())?;

        let slot = self.slot_mut(id)?;
        let next = match &slot.phase {
            SlotPhase::Uploading { .. } => {
                return Err(AppError::Precondition(
                    "an upload is already in progress on this lane".to_string(),
                ));
            }
            SlotPhase::Uploaded { location } => SlotPhase::Replacing {
                file: file.clone(),
                previous: location.clone(),
            },
            SlotPhase::Replacing { previous, .. } => SlotPhase::Replacing {
                file: file.clone(),
                previous: previous.clone(),
            },
            SlotPhase::Failed {
                previous: Some(previous),
                ..
            } => SlotPhase::Replacing {
                file: file.clone(),
                previous: previous.clone(),
            },
            SlotPhase::Idle | SlotPhase::Selected { .. } | SlotPhase::Failed { .. } => {
                SlotPhase::Selected { file: file.clone() }
            }
        };

        slot.original_name = Some(file.name());
        slot.phase = next;
        Ok(())
    }

    /// Move a lane into `Uploading` and hand back the attempt ticket.
    ///
    /// Accepts a lane holding a staged file: freshly selected, staged as a
    /// replace, or failed (manual retry without reselecting). Anything else
    /// is a precondition error and no transport call is made.
    pub fn begin_upload(&mut self, id: &SlotId) -> AppResult<UploadTicket<F>> {
        let slot = self.slot_mut(id)?;
        let (file, previous) = match &slot.phase {
            SlotPhase::Selected { file } => (file.clone(), None),
            SlotPhase::Replacing { file, previous } => (file.clone(), Some(previous.clone())),
            SlotPhase::Failed { file, previous, .. } => (file.clone(), previous.clone()),
            SlotPhase::Uploading { .. } => {
                return Err(AppError::Precondition(
                    "an upload is already in progress on this lane".to_string(),
                ));
            }
            SlotPhase::Idle | SlotPhase::Uploaded { .. } => {
                return Err(AppError::Precondition(
                    "no file selected on this lane".to_string(),
                ));
            }
        };

        let original_name = slot
            .original_name
            .clone()
            .unwrap_or_else(|| file.name());
        slot.phase = SlotPhase::Uploading {
            file: file.clone(),
            previous,
            percent: 0,
        };

        Ok(UploadTicket {
            slot_id: id.clone(),
            file,
            original_name,
            queued_at: Utc::now(),
        })
    }

    /// Fold a transport progress event into the lane.
    ///
    /// Percent is the bytes-sent ratio, clamped so it never decreases
    /// within one attempt. Events for lanes that are no longer uploading
    /// (cleared, already settled) are dropped.
    pub fn record_progress(&mut self, id: &SlotId, bytes_sent: u64, bytes_total: u64) {
        let Some(slot) = self.slots.iter_mut().find(|slot| &slot.id == id) else {
            return;
        };
        if let SlotPhase::Uploading { percent, .. } = &mut slot.phase {
            let ratio = if bytes_total == 0 {
                0
            } else {
                ((bytes_sent.saturating_mul(100)) / bytes_total).min(100) as u8
            };
            *percent = (*percent).max(ratio);
        }
    }

    /// Confirm an attempt: the lane keeps only the stored location and the
    /// display name. Returns `false` (and changes nothing) if the lane is
    /// no longer uploading.
    pub fn complete_upload(&mut self, id: &SlotId, location: String) -> bool {
        let Some(slot) = self.slots.iter_mut().find(|slot| &slot.id == id) else {
            return false;
        };
        match &slot.phase {
            SlotPhase::Uploading { .. } => {
                slot.phase = SlotPhase::Uploaded { location };
                true
            }
            _ => {
                log::debug!("dropping late upload confirmation for lane {}", id);
                false
            }
        }
    }

    /// Record a failed attempt. The staged file (and, through a replace,
    /// the previous location) is retained so the user can retry manually;
    /// nothing is retried automatically.
    pub fn fail_upload(&mut self, id: &SlotId, reason: String) -> bool {
        let Some(slot) = self.slots.iter_mut().find(|slot| &slot.id == id) else {
            return false;
        };
        match &slot.phase {
            SlotPhase::Uploading { file, previous, .. } => {
                let file = file.clone();
                let previous = previous.clone();
                slot.phase = SlotPhase::Failed {
                    reason,
                    file,
                    previous,
                };
                true
            }
            _ => {
                log::debug!("dropping late upload failure for lane {}", id);
                false
            }
        }
    }

    /// Check that a lane is eligible for a replace pick.
    ///
    /// Stored state is not altered; the lane only changes once the user
    /// actually picks a file and `select_file` stages the swap.
    pub fn request_replace(&self, id: &SlotId) -> AppResult<()> {
        let slot = self
            .slots
            .iter()
            .find(|slot| &slot.id == id)
            .ok_or_else(|| AppError::Precondition(format!("unknown upload lane {}", id)))?;
        if slot.is_uploaded() {
            Ok(())
        } else {
            Err(AppError::Precondition(
                "only an uploaded lane can be replaced".to_string(),
            ))
        }
    }

    /// Reset a lane to its initial empty state, in place.
    ///
    /// Idempotent. Collection length and order never change; the lane id
    /// is kept so keyed rendering stays stable.
    pub fn clear_slot(&mut self, id: &SlotId) -> AppResult<()> {
        let slot = self.slot_mut(id)?;
        slot.phase = SlotPhase::Idle;
        slot.original_name = None;
        Ok(())
    }

    /// Append one empty lane iff every lane holds an uploaded asset.
    ///
    /// Safe to call any number of times, from any interleaving of settling
    /// timers: the first appended idle lane makes every subsequent scan a
    /// no-op, so there is never more than one trailing empty lane.
    pub fn replenish_if_full(&mut self) -> bool {
        if self.slots.iter().all(Slot::is_uploaded) {
            self.slots.push(Slot::empty());
            log::info!("all lanes filled, appended a fresh upload lane");
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct TestFile {
        name: String,
        size: u64,
    }

    impl TestFile {
        fn new(name: &str, size: u64) -> Self {
            Self {
                name: name.to_string(),
                size,
            }
        }
    }

    impl FileLike for TestFile {
        fn name(&self) -> String {
            self.name.clone()
        }

        fn size(&self) -> u64 {
            self.size
        }
    }

    const MIB: u64 = 1024 * 1024;

    fn manager() -> SlotManager<TestFile> {
        SlotManager::new(UploadConfig::default())
    }

    fn first_id(manager: &SlotManager<TestFile>) -> SlotId {
        manager.slots()[0].id.clone()
    }

    #[test]
    fn test_starts_with_one_empty_lane() {
        let manager = manager();
        assert_eq!(manager.slots().len(), 1);
        assert!(manager.slots()[0].is_idle());
    }

    #[test]
    fn test_oversize_file_is_rejected_before_transport() {
        let mut manager = manager();
        let id = first_id(&manager);

        let err = manager
            .select_file(&id, TestFile::new("datasheet.pdf", 15 * MIB))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        // Lane stays in its pre-selection state
        assert!(manager.slots()[0].is_idle());
        assert!(manager.slots()[0].staged_file().is_none());
        assert!(manager.begin_upload(&id).is_err());
    }

    #[test]
    fn test_disallowed_extension_is_rejected() {
        let mut manager = manager();
        let id = first_id(&manager);

        let err = manager
            .select_file(&id, TestFile::new("installer.exe", MIB))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(manager.slots()[0].is_idle());
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let mut manager = manager();
        let id = first_id(&manager);

        manager
            .select_file(&id, TestFile::new("site-photo.JPG", MIB))
            .unwrap();
        assert!(matches!(
            manager.slots()[0].phase,
            SlotPhase::Selected { .. }
        ));
    }

    #[test]
    fn test_begin_upload_requires_a_staged_file() {
        let mut manager = manager();
        let id = first_id(&manager);

        let err = manager.begin_upload(&id).unwrap_err();
        assert!(matches!(err, AppError::Precondition(_)));
        assert!(manager.slots()[0].is_idle());
    }

    #[test]
    fn test_successful_upload_keeps_location_and_drops_file() {
        let mut manager = manager();
        let id = first_id(&manager);

        manager
            .select_file(&id, TestFile::new("contract.pdf", 2 * MIB))
            .unwrap();
        let ticket = manager.begin_upload(&id).unwrap();
        assert_eq!(ticket.original_name, "contract.pdf");
        assert_eq!(manager.slots()[0].progress_percent(), 0);

        assert!(manager.complete_upload(&id, "https://res.example.com/contract.pdf".into()));

        let slot = &manager.slots()[0];
        assert!(slot.staged_file().is_none());
        assert_eq!(
            slot.uploaded_location(),
            Some("https://res.example.com/contract.pdf")
        );
        assert_eq!(slot.progress_percent(), 100);
        assert_eq!(slot.original_name.as_deref(), Some("contract.pdf"));
    }

    #[test]
    fn test_progress_is_monotonic_within_an_attempt() {
        let mut manager = manager();
        let id = first_id(&manager);

        manager
            .select_file(&id, TestFile::new("contract.pdf", 2 * MIB))
            .unwrap();
        manager.begin_upload(&id).unwrap();

        manager.record_progress(&id, MIB, 2 * MIB);
        assert_eq!(manager.slots()[0].progress_percent(), 50);

        // Out-of-order event must not move the bar backwards
        manager.record_progress(&id, MIB / 2, 2 * MIB);
        assert_eq!(manager.slots()[0].progress_percent(), 50);

        manager.record_progress(&id, 2 * MIB, 2 * MIB);
        assert_eq!(manager.slots()[0].progress_percent(), 100);
    }

    #[test]
    fn test_failed_upload_retains_file_for_retry() {
        let mut manager = manager();
        let id = first_id(&manager);
        let file = TestFile::new("contract.pdf", 2 * MIB);

        manager.select_file(&id, file.clone()).unwrap();
        manager.begin_upload(&id).unwrap();
        manager.record_progress(&id, MIB, 2 * MIB);

        assert!(manager.fail_upload(&id, "network error".into()));

        let slot = &manager.slots()[0];
        assert_eq!(slot.progress_percent(), 0);
        assert_eq!(slot.last_error(), Some("network error"));
        assert_eq!(slot.staged_file(), Some(&file));

        // Retry without reselecting: percent restarts from 0
        let ticket = manager.begin_upload(&id).unwrap();
        assert_eq!(ticket.file, file);
        assert_eq!(manager.slots()[0].progress_percent(), 0);
    }

    #[test]
    fn test_failure_does_not_touch_sibling_lanes() {
        let mut manager = manager();
        let first = first_id(&manager);

        manager
            .select_file(&first, TestFile::new("contract.pdf", MIB))
            .unwrap();
        manager.begin_upload(&first).unwrap();
        manager.complete_upload(&first, "https://res.example.com/contract.pdf".into());
        manager.replenish_if_full();

        let second = manager.slots()[1].id.clone();
        manager
            .select_file(&second, TestFile::new("insurance.docx", MIB))
            .unwrap();
        manager.begin_upload(&second).unwrap();
        manager.fail_upload(&second, "request timed out after 60s".into());

        assert!(manager.slots()[0].is_uploaded());
        assert_eq!(
            manager.slots()[1].last_error(),
            Some("request timed out after 60s")
        );
    }

    #[test]
    fn test_replenish_appends_exactly_one_idle_lane() {
        let mut manager = manager();

        // Fill three lanes one after another
        for n in 0..3 {
            let id = manager.slots().last().unwrap().id.clone();
            manager
                .select_file(&id, TestFile::new(&format!("doc{}.pdf", n), MIB))
                .unwrap();
            manager.begin_upload(&id).unwrap();
            manager.complete_upload(&id, format!("https://res.example.com/doc{}.pdf", n));
            assert!(manager.replenish_if_full());
        }

        assert_eq!(manager.slots().len(), 4);
        assert!(manager.slots()[..3].iter().all(Slot::is_uploaded));
        assert!(manager.slots()[3].is_idle());
    }

    #[test]
    fn test_replenish_scan_is_reentrant_safe() {
        let mut manager = manager();
        let first = first_id(&manager);

        manager
            .select_file(&first, TestFile::new("a.pdf", MIB))
            .unwrap();
        manager.begin_upload(&first).unwrap();
        assert!(!manager.replenish_if_full(), "no append while an upload is in flight");
        assert_eq!(manager.slots().len(), 1);

        manager.complete_upload(&first, "https://res.example.com/a.pdf".into());

        // Two uploads settling at the same time each schedule a scan; only
        // the first one may append.
        assert!(manager.replenish_if_full());
        assert!(!manager.replenish_if_full());
        assert!(!manager.replenish_if_full());

        assert_eq!(manager.slots().len(), 2);
        assert!(manager.slots()[1].is_idle());
    }

    #[test]
    fn test_clear_slot_is_idempotent_and_keeps_order() {
        let mut manager = manager();
        let first = first_id(&manager);

        manager
            .select_file(&first, TestFile::new("a.pdf", MIB))
            .unwrap();
        manager.begin_upload(&first).unwrap();
        manager.complete_upload(&first, "https://res.example.com/a.pdf".into());
        manager.replenish_if_full();
        assert_eq!(manager.slots().len(), 2);

        manager.clear_slot(&first).unwrap();
        manager.clear_slot(&first).unwrap();

        assert_eq!(manager.slots().len(), 2);
        assert_eq!(manager.slots()[0].id, first, "clearing keeps the lane in place");
        assert!(manager.slots()[0].is_idle());
        assert!(manager.slots()[0].original_name.is_none());
    }

    #[test]
    fn test_clear_during_upload_drops_late_transport_events() {
        let mut manager = manager();
        let id = first_id(&manager);

        manager
            .select_file(&id, TestFile::new("a.pdf", MIB))
            .unwrap();
        manager.begin_upload(&id).unwrap();
        manager.clear_slot(&id).unwrap();

        manager.record_progress(&id, MIB, MIB);
        assert!(!manager.complete_upload(&id, "https://res.example.com/a.pdf".into()));
        assert!(!manager.fail_upload(&id, "network error".into()));
        assert!(manager.slots()[0].is_idle());
    }

    #[test]
    fn test_replace_flow_stages_swap_and_survives_failure() {
        let mut manager = manager();
        let id = first_id(&manager);

        manager
            .select_file(&id, TestFile::new("old.pdf", MIB))
            .unwrap();
        manager.begin_upload(&id).unwrap();
        manager.complete_upload(&id, "https://res.example.com/old.pdf".into());

        // Replace is only a UI trigger; stored state is untouched
        manager.request_replace(&id).unwrap();
        assert_eq!(
            manager.slots()[0].uploaded_location(),
            Some("https://res.example.com/old.pdf")
        );

        let replacement = TestFile::new("new.pdf", MIB);
        manager.select_file(&id, replacement.clone()).unwrap();
        assert!(manager.slots()[0].is_replacing());

        manager.begin_upload(&id).unwrap();
        manager.fail_upload(&id, "server error (500)".into());

        // A failed swap still remembers the previous asset and stays
        // retryable with the staged replacement.
        match &manager.slots()[0].phase {
            SlotPhase::Failed { previous, file, .. } => {
                assert_eq!(previous.as_deref(), Some("https://res.example.com/old.pdf"));
                assert_eq!(file, &replacement);
            }
            other => panic!("unexpected phase: {:?}", other),
        }

        manager.begin_upload(&id).unwrap();
        manager.complete_upload(&id, "https://res.example.com/new.pdf".into());
        assert_eq!(
            manager.slots()[0].uploaded_location(),
            Some("https://res.example.com/new.pdf")
        );
    }

    #[test]
    fn test_request_replace_requires_uploaded_lane() {
        let manager = manager();
        let id = first_id(&manager);
        assert!(matches!(
            manager.request_replace(&id),
            Err(AppError::Precondition(_))
        ));
    }

    #[test]
    fn test_single_lane_happy_path_scenario() {
        // 2 MB PDF through the whole flow, staged progress included.
        let mut manager = manager();
        let id = first_id(&manager);

        manager
            .select_file(&id, TestFile::new("doc.pdf", 2 * MIB))
            .unwrap();
        manager.begin_upload(&id).unwrap();

        for quarter in 1..=4u64 {
            manager.record_progress(&id, quarter * MIB / 2, 2 * MIB);
            assert_eq!(
                manager.slots()[0].progress_percent(),
                (quarter * 25) as u8
            );
        }

        assert!(manager.complete_upload(&id, "https://example/doc.pdf".into()));
        assert!(manager.replenish_if_full());

        assert_eq!(manager.slots().len(), 2);
        assert_eq!(
            manager.slots()[0].uploaded_location(),
            Some("https://example/doc.pdf")
        );
        assert!(manager.slots()[1].is_idle());
    }
}
