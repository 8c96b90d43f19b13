/// Whether frame ticks advance the scene.
///
/// Hidden pages and occluded windows suspend the loop so the scene clock
/// stops; becoming visible again resumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    /// Ticks advance the clock and render.
    #[default]
    Running,
    /// Ticks are ignored.
    Suspended,
}

impl Lifecycle {
    /// Stop advancing. Returns `true` if the state changed.
    pub fn suspend(&mut self) -> bool {
        let changed = *self == Self::Running;
        *self = Self::Suspended;
        changed
    }

    /// Start advancing again. Returns `true` if the state changed, in which
    /// case the caller must reschedule the frame loop.
    pub fn resume(&mut self) -> bool {
        let changed = *self == Self::Suspended;
        *self = Self::Running;
        changed
    }

    /// Whether ticks currently advance the scene.
    #[must_use]
    pub fn is_running(self) -> bool {
        self == Self::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_report_changes() {
        let mut state = Lifecycle::default();
        assert!(state.is_running());
        assert!(!state.resume());
        assert!(state.suspend());
        assert!(!state.suspend());
        assert!(!state.is_running());
        assert!(state.resume());
        assert!(state.is_running());
    }
}
