//! Focus-loss violation counting for an in-progress quiz.

/// Violations allowed before the session is forcibly ended.
pub const MAX_WARNINGS: u32 = 3;

/// What a single focus signal did to the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityOutcome {
    /// Monitor inactive, already away, or already at the ceiling.
    Ignored,
    /// A violation below the ceiling.
    Warning { count: u32, max: u32 },
    /// The violation that reached the ceiling. Reported once.
    Ceiling { count: u32 },
}

/// Counts focus-loss violations while a session is in progress.
///
/// One logical focus loss is counted once: repeated `Lost` signals are
/// ignored until a `Regained` re-arms the monitor. After the ceiling the
/// monitor is inert until [`IntegrityMonitor::reset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityMonitor {
    warning_count: u32,
    max_warnings: u32,
    active: bool,
    away: bool,
}

impl Default for IntegrityMonitor {
    fn default() -> Self {
        Self::new(MAX_WARNINGS)
    }
}

impl IntegrityMonitor {
    /// `max_warnings` of zero is treated as one; a ceiling must be reachable.
    #[must_use]
    pub fn new(max_warnings: u32) -> Self {
        Self {
            warning_count: 0,
            max_warnings: max_warnings.max(1),
            active: false,
            away: false,
        }
    }

    #[must_use]
    pub fn warning_count(&self) -> u32 {
        self.warning_count
    }

    #[must_use]
    pub fn max_warnings(&self) -> u32 {
        self.max_warnings
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn ceiling_reached(&self) -> bool {
        self.warning_count >= self.max_warnings
    }

    /// Start observing. No-op once the ceiling has been reached.
    pub fn activate(&mut self) {
        if !self.ceiling_reached() {
            self.active = true;
        }
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.away = false;
    }

    /// Back to a fresh, inactive monitor for a new session.
    pub fn reset(&mut self) {
        *self = Self::new(self.max_warnings);
    }

    pub fn record_focus_lost(&mut self) -> IntegrityOutcome {
        if !self.active || self.away || self.ceiling_reached() {
            return IntegrityOutcome::Ignored;
        }
        self.away = true;
        self.warning_count += 1;
        if self.ceiling_reached() {
            self.active = false;
            return IntegrityOutcome::Ceiling {
                count: self.warning_count,
            };
        }
        IntegrityOutcome::Warning {
            count: self.warning_count,
            max: self.max_warnings,
        }
    }

    pub fn record_focus_regained(&mut self) {
        self.away = false;
    }
}
