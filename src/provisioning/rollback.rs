//! # Rollback Tracker
//!
//! The store has no cross-record transactions, so provisioning runs as a saga:
//! every write appends the [`Compensation`] that undoes it, and a failed
//! attempt replays them newest first.
//!
//! A tracker belongs to exactly one attempt and is consumed exactly once,
//! either by [`commit`](RollbackTracker::commit) or by
//! [`rollback`](RollbackTracker::rollback). Rollback is best-effort: every
//! compensation is attempted, and failures are collected in the
//! [`RollbackReport`] for an operator instead of being raised.

use crate::model::{
    BranchId, ClientId, FaqId, ServiceId, StaffBranchId, StaffId, TenantId, UserRoleId,
};
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use tracing::{debug, error, info};

/// One undo operation.
///
/// Identities never appear here: they may predate the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Compensation {
    ReleaseClaim(ClientId),
    DeleteTenant(TenantId),
    DeleteBranch(BranchId),
    DeleteStaff(StaffId),
    DeleteStaffBranch(StaffBranchId),
    DeleteUserRole(UserRoleId),
    DeleteService(ServiceId),
    DeleteFaq(FaqId),
}

impl fmt::Display for Compensation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compensation::ReleaseClaim(id) => write!(f, "release claim on {id}"),
            Compensation::DeleteTenant(id) => write!(f, "delete {id}"),
            Compensation::DeleteBranch(id) => write!(f, "delete {id}"),
            Compensation::DeleteStaff(id) => write!(f, "delete {id}"),
            Compensation::DeleteStaffBranch(id) => write!(f, "delete {id}"),
            Compensation::DeleteUserRole(id) => write!(f, "delete {id}"),
            Compensation::DeleteService(id) => write!(f, "delete {id}"),
            Compensation::DeleteFaq(id) => write!(f, "delete {id}"),
        }
    }
}

/// Executes compensations against the stores.
#[async_trait]
pub trait Compensator: Send + Sync {
    async fn compensate(&self, compensation: Compensation) -> Result<(), String>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedCompensation {
    pub compensation: Compensation,
    pub error: String,
}

/// Outcome of a rollback.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RollbackReport {
    pub attempted: usize,
    pub succeeded: usize,
    /// Left for manual cleanup.
    pub failed: Vec<FailedCompensation>,
}

impl RollbackReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct RollbackTracker {
    entries: Vec<Compensation>,
    settled: bool,
}

impl RollbackTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, compensation: Compensation) {
        debug!(%compensation, "Tracked for rollback");
        self.entries.push(compensation);
    }

    /// Recorded compensations, oldest first.
    pub fn entries(&self) -> &[Compensation] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The attempt succeeded; nothing is undone.
    pub fn commit(mut self) {
        debug!(discarded = self.entries.len(), "Rollback tracker committed");
        self.settled = true;
    }

    /// Replays every compensation in reverse order.
    pub async fn rollback<C>(mut self, compensator: &C) -> RollbackReport
    where
        C: Compensator + ?Sized,
    {
        self.settled = true;
        let entries = std::mem::take(&mut self.entries);
        let mut report = RollbackReport::default();

        for compensation in entries.into_iter().rev() {
            report.attempted += 1;
            match compensator.compensate(compensation).await {
                Ok(()) => {
                    debug!(%compensation, "Compensated");
                    report.succeeded += 1;
                }
                Err(e) => {
                    error!(%compensation, error = %e, "Compensation failed; manual cleanup required");
                    report.failed.push(FailedCompensation {
                        compensation,
                        error: e,
                    });
                }
            }
        }

        info!(
            attempted = report.attempted,
            failed = report.failed.len(),
            "Rollback finished"
        );
        report
    }
}

impl Drop for RollbackTracker {
    fn drop(&mut self) {
        if !self.settled && !self.entries.is_empty() {
            error!(
                pending = ?self.entries,
                "Provisioning attempt abandoned without rollback; manual cleanup required"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<Compensation>>,
        fail_on: Option<Compensation>,
    }

    #[async_trait]
    impl Compensator for Recorder {
        async fn compensate(&self, compensation: Compensation) -> Result<(), String> {
            self.calls.lock().unwrap().push(compensation);
            if self.fail_on == Some(compensation) {
                return Err("store unavailable".into());
            }
            Ok(())
        }
    }

    fn tracked() -> RollbackTracker {
        let mut tracker = RollbackTracker::new();
        tracker.record(Compensation::DeleteTenant(TenantId(1)));
        tracker.record(Compensation::DeleteBranch(BranchId(1)));
        tracker.record(Compensation::DeleteBranch(BranchId(2)));
        tracker.record(Compensation::DeleteStaff(StaffId(1)));
        tracker
    }

    #[tokio::test]
    async fn test_replays_in_reverse_order() {
        let recorder = Recorder::default();
        let report = tracked().rollback(&recorder).await;

        assert!(report.is_clean());
        assert_eq!(report.attempted, 4);
        assert_eq!(
            *recorder.calls.lock().unwrap(),
            vec![
                Compensation::DeleteStaff(StaffId(1)),
                Compensation::DeleteBranch(BranchId(2)),
                Compensation::DeleteBranch(BranchId(1)),
                Compensation::DeleteTenant(TenantId(1)),
            ]
        );
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_the_rest() {
        let recorder = Recorder {
            fail_on: Some(Compensation::DeleteBranch(BranchId(2))),
            ..Default::default()
        };
        let report = tracked().rollback(&recorder).await;

        assert_eq!(report.attempted, 4);
        assert_eq!(report.succeeded, 3);
        assert_eq!(
            report.failed,
            vec![FailedCompensation {
                compensation: Compensation::DeleteBranch(BranchId(2)),
                error: "store unavailable".into(),
            }]
        );
        assert_eq!(
            recorder.calls.lock().unwrap().last(),
            Some(&Compensation::DeleteTenant(TenantId(1)))
        );
    }

    #[tokio::test]
    async fn test_commit_runs_nothing() {
        let tracker = tracked();
        assert_eq!(tracker.len(), 4);
        tracker.commit();
    }

    #[test]
    fn test_serializes_as_tagged_entry() {
        let json = serde_json::to_value(Compensation::DeleteUserRole(UserRoleId(5))).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "delete_user_role", "id": 5 }));
        assert_eq!(Compensation::ReleaseClaim(ClientId(2)).to_string(), "release claim on client_2");
    }
}
