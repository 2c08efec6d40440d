use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::domain::{ApplicationRecord, ApplicationStatus};
use crate::pipeline::dashboard::percentage;
use crate::pipeline::query::{count_for_tab, Tab};

/// Applicant summary tiles for the employer dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicantStats {
    pub total: usize,
    /// Every status is present, zero-filled.
    pub by_status: BTreeMap<ApplicationStatus, usize>,
    /// Hired over total, as a one-decimal percentage string.
    pub hire_rate: String,
}

impl ApplicantStats {
    pub fn count(&self, status: ApplicationStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or_default()
    }
}

pub fn applicant_stats(records: &[Arc<ApplicationRecord>]) -> ApplicantStats {
    let mut by_status: BTreeMap<ApplicationStatus, usize> = ApplicationStatus::ordered()
        .into_iter()
        .map(|status| (status, 0))
        .collect();
    for record in records {
        *by_status.entry(record.status).or_default() += 1;
    }

    let hired = by_status[&ApplicationStatus::Hired];
    ApplicantStats {
        total: records.len(),
        hire_rate: percentage(hired as u64, records.len() as u64),
        by_status,
    }
}

/// One badge in the status tab row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabCount {
    pub tab: String,
    pub label: &'static str,
    pub count: usize,
}

/// Badge row: `all` first, then each status in lifecycle order.
pub fn tab_counts(records: &[Arc<ApplicationRecord>]) -> Vec<TabCount> {
    let mut counts = vec![TabCount {
        tab: Tab::<ApplicationStatus>::All.to_string(),
        label: "All",
        count: count_for_tab(records, Tab::All),
    }];
    counts.extend(ApplicationStatus::ordered().into_iter().map(|status| TabCount {
        tab: status.as_str().to_string(),
        label: status.label(),
        count: count_for_tab(records, Tab::Only(status)),
    }));
    counts
}
