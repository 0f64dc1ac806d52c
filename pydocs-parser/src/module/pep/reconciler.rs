///! Index status letter vs. PEP page status

use super::types::ResultWarning;

/// Acceptable page statuses for an index status letter.
///
/// `None` means the letter is unknown.
pub fn expected_statuses(short_status: &str) -> Option<&'static [&'static str]> {
    let statuses: &'static [&'static str] = match short_status {
        "A" => &["Active", "Accepted"],
        "D" => &["Deferred"],
        "F" => &["Final"],
        "P" => &["Provisional"],
        "R" => &["Rejected"],
        "S" => &["Superseded"],
        "W" => &["Withdrawn"],
        "" => &["Draft", "Active"],
        _ => return None,
    };
    Some(statuses)
}

/// Outcome of checking one PEP
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// No status letter in the index, nothing to compare
    Skipped,
    Consistent,
    Mismatch(ResultWarning),
    /// The letter is missing from the expected-status table
    UnknownCode,
}

pub fn reconcile(short_status: &str, status: &str, url: &str) -> Reconciliation {
    if short_status.is_empty() {
        return Reconciliation::Skipped;
    }
    match expected_statuses(short_status) {
        None => Reconciliation::UnknownCode,
        Some(expected) if expected.contains(&status) => Reconciliation::Consistent,
        Some(_) => Reconciliation::Mismatch(ResultWarning {
            status: status.to_string(),
            short_status: short_status.to_string(),
            url: url.to_string(),
        }),
    }
}

/// Collects mismatches over a whole pass.
#[derive(Debug, Default)]
pub struct StatusReconciler {
    warnings: Vec<ResultWarning>,
    unknown_codes: usize,
}

impl StatusReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, short_status: &str, status: &str, url: &str) -> Reconciliation {
        let outcome = reconcile(short_status, status, url);
        match &outcome {
            Reconciliation::Mismatch(warning) => self.warnings.push(warning.clone()),
            Reconciliation::UnknownCode => {
                self.unknown_codes += 1;
                tracing::error!(
                    "Status letter '{}' is missing from the expected-status table ({})",
                    short_status,
                    url
                );
            }
            Reconciliation::Skipped | Reconciliation::Consistent => {}
        }
        outcome
    }

    #[cfg(test)]
    pub fn warnings(&self) -> &[ResultWarning] {
        &self.warnings
    }

    pub fn unknown_codes(&self) -> usize {
        self.unknown_codes
    }

    pub fn into_warnings(self) -> Vec<ResultWarning> {
        self.warnings
    }
}

/// Log every mismatch with the statuses its letter allows.
pub fn report_warnings(warnings: &[ResultWarning]) {
    if warnings.is_empty() {
        return;
    }
    tracing::warn!("Несовпадающие статусы:");
    for warning in warnings {
        tracing::warn!(
            "{}\nСтатус в карточке: {}\nОжидаемые статусы: {:?}",
            warning.url,
            warning.status,
            expected_statuses(&warning.short_status).unwrap_or_default()
        );
    }
}
