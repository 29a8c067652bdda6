use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimerState {
    Armed,
    Fired,
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerPoll {
    /// Cancelled, or already fired.
    Inactive,
    Running { remaining_secs: u32 },
    /// Delivered exactly once per timer.
    Expired { question_index: usize },
}

/// Countdown scoped to one question. Remaining time is derived from the wall
/// clock elapsed since arming, so late or coalesced ticks never stretch it.
#[derive(Clone, Debug)]
pub struct QuestionTimer {
    question_index: usize,
    limit_secs: u32,
    started_at: Instant,
    state: TimerState,
}

impl QuestionTimer {
    pub fn arm(question_index: usize, limit_secs: u32, now: Instant) -> Self {
        Self {
            question_index,
            limit_secs,
            started_at: now,
            state: TimerState::Armed,
        }
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn is_active(&self) -> bool {
        self.state == TimerState::Armed
    }

    pub fn remaining_secs(&self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.started_at).as_secs();
        let elapsed = u32::try_from(elapsed).unwrap_or(u32::MAX);
        self.limit_secs.saturating_sub(elapsed)
    }

    pub fn poll(&mut self, now: Instant) -> TimerPoll {
        if self.state != TimerState::Armed {
            return TimerPoll::Inactive;
        }
        let remaining_secs = self.remaining_secs(now);
        if remaining_secs == 0 {
            self.state = TimerState::Fired;
            return TimerPoll::Expired {
                question_index: self.question_index,
            };
        }
        TimerPoll::Running { remaining_secs }
    }

    pub fn cancel(&mut self) {
        if self.state == TimerState::Armed {
            tracing::debug!(question = self.question_index, "question timer cancelled");
        }
        self.state = TimerState::Cancelled;
    }
}
