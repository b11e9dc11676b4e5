//! Pure polling state machine.

/// Phases of one polling slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    /// Nothing is being watched.
    Idle,
    /// Reading the job on the fast cadence.
    Polling,
    /// Terminal: the job succeeded while we were watching.
    Succeeded,
    /// Terminal: the job failed while we were watching.
    Failed,
    /// The job poll errored or exceeded the short timeout.
    TimedOut,
    /// Watching the owning entity on the slow cadence.
    FallbackRefresh,
    /// Terminal, silent: completion evidence appeared on the entity.
    Resolved,
    /// Terminal, silent: the fallback timeout elapsed with no evidence.
    GaveUp,
}

impl PollPhase {
    /// Whether this phase ends the slot's activity.
    pub fn is_settled(self) -> bool {
        matches!(
            self,
            PollPhase::Succeeded | PollPhase::Failed | PollPhase::Resolved | PollPhase::GaveUp
        )
    }
}

/// Observations that drive phase transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollEvent {
    /// A poll for some job was started (or restarted).
    Started,
    /// The watched job reached `Succeeded`.
    JobSucceeded,
    /// The watched job reached `Failed`.
    JobFailed,
    /// A job read failed (transport error or missing record).
    ReadError,
    /// The short per-job timeout elapsed without a terminal status.
    ShortTimeout,
    /// The fallback mode was entered.
    FallbackStarted,
    /// The owning entity shows completion evidence.
    EvidenceFound,
    /// The longer fallback timeout elapsed.
    FallbackTimeout,
    /// The consumer stopped watching.
    Stopped,
}

/// Total transition function. Events that do not apply to the current
/// phase leave it unchanged, so a stray timer firing after settlement
/// cannot corrupt the slot.
pub fn transition(phase: PollPhase, event: PollEvent) -> PollPhase {
    match (phase, event) {
        (_, PollEvent::Started) => PollPhase::Polling,
        (_, PollEvent::Stopped) => PollPhase::Idle,

        (PollPhase::Polling, PollEvent::JobSucceeded) => PollPhase::Succeeded,
        (PollPhase::Polling, PollEvent::JobFailed) => PollPhase::Failed,
        (PollPhase::Polling, PollEvent::ReadError | PollEvent::ShortTimeout) => PollPhase::TimedOut,

        (PollPhase::TimedOut, PollEvent::FallbackStarted) => PollPhase::FallbackRefresh,

        (PollPhase::FallbackRefresh, PollEvent::EvidenceFound) => PollPhase::Resolved,
        (PollPhase::FallbackRefresh, PollEvent::FallbackTimeout) => PollPhase::GaveUp,

        (unchanged, _) => unchanged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path() {
        let mut phase = PollPhase::Idle;
        phase = transition(phase, PollEvent::Started);
        assert_eq!(phase, PollPhase::Polling);
        phase = transition(phase, PollEvent::JobSucceeded);
        assert_eq!(phase, PollPhase::Succeeded);
        assert!(phase.is_settled());
    }

    #[test]
    fn failure_path() {
        assert_eq!(
            transition(PollPhase::Polling, PollEvent::JobFailed),
            PollPhase::Failed
        );
    }

    #[test]
    fn degraded_path_resolves() {
        let mut phase = PollPhase::Polling;
        phase = transition(phase, PollEvent::ShortTimeout);
        assert_eq!(phase, PollPhase::TimedOut);
        phase = transition(phase, PollEvent::FallbackStarted);
        assert_eq!(phase, PollPhase::FallbackRefresh);
        phase = transition(phase, PollEvent::EvidenceFound);
        assert_eq!(phase, PollPhase::Resolved);
    }

    #[test]
    fn degraded_path_gives_up() {
        let phase = transition(PollPhase::FallbackRefresh, PollEvent::FallbackTimeout);
        assert_eq!(phase, PollPhase::GaveUp);
    }

    #[test]
    fn read_error_degrades_like_a_timeout() {
        assert_eq!(
            transition(PollPhase::Polling, PollEvent::ReadError),
            PollPhase::TimedOut
        );
    }

    #[test]
    fn stray_events_leave_settled_phases_alone() {
        for settled in [
            PollPhase::Succeeded,
            PollPhase::Failed,
            PollPhase::Resolved,
            PollPhase::GaveUp,
        ] {
            assert_eq!(transition(settled, PollEvent::JobSucceeded), settled);
            assert_eq!(transition(settled, PollEvent::ShortTimeout), settled);
            assert_eq!(transition(settled, PollEvent::EvidenceFound), settled);
        }
    }

    #[test]
    fn restart_is_allowed_from_any_phase() {
        for phase in [
            PollPhase::Idle,
            PollPhase::Succeeded,
            PollPhase::GaveUp,
            PollPhase::FallbackRefresh,
        ] {
            assert_eq!(transition(phase, PollEvent::Started), PollPhase::Polling);
        }
    }

    #[test]
    fn stop_returns_to_idle() {
        assert_eq!(
            transition(PollPhase::FallbackRefresh, PollEvent::Stopped),
            PollPhase::Idle
        );
    }
}
