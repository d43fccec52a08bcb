// Booking lifecycle state machine
// Pending is the initial state and Cancelled is terminal.
// Every (state, event) pair has a defined outcome.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingState {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for BookingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Cancelled => "Cancelled",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingEvent {
    Confirm,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: BookingState,
    pub to: BookingState,
    pub message: String,
}

impl Transition {
    pub fn changed_state(&self) -> bool {
        self.from != self.to
    }
}

pub fn transition(state: BookingState, event: BookingEvent) -> Transition {
    use BookingEvent::*;
    use BookingState::*;

    let (to, message) = match (state, event) {
        (Pending, Confirm) => (Confirmed, moved(Pending, Confirmed)),
        (Confirmed, Confirm) => (Confirmed, "Booking already confirmed.".to_string()),
        (Cancelled, Confirm) => (Cancelled, "Cannot confirm a cancelled booking.".to_string()),
        (Pending, Cancel) => (Cancelled, moved(Pending, Cancelled)),
        (Confirmed, Cancel) => (Cancelled, moved(Confirmed, Cancelled)),
        (Cancelled, Cancel) => (Cancelled, "Booking already cancelled.".to_string()),
    };

    Transition {
        from: state,
        to,
        message,
    }
}

fn moved(from: BookingState, to: BookingState) -> String {
    format!("Booking moved from {} -> {}", from, to)
}

#[derive(Debug, Default)]
pub struct BookingStateMachine {
    state: BookingState,
}

impl BookingStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> BookingState {
        self.state
    }

    pub fn confirm(&mut self) -> Transition {
        self.fire(BookingEvent::Confirm)
    }

    pub fn cancel(&mut self) -> Transition {
        self.fire(BookingEvent::Cancel)
    }

    // Starts a new booking cycle
    pub fn reset(&mut self) {
        if self.state != BookingState::Pending {
            debug!(from = %self.state, "Booking state reset to Pending");
        }
        self.state = BookingState::Pending;
    }

    fn fire(&mut self, event: BookingEvent) -> Transition {
        let outcome = transition(self.state, event);
        if outcome.changed_state() {
            info!(from = %outcome.from, to = %outcome.to, "{}", outcome.message);
        } else {
            debug!(state = %outcome.from, ?event, "{}", outcome.message);
        }
        self.state = outcome.to;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::BookingEvent::*;
    use super::BookingState::*;
    use super::*;
    use test_case::test_case;

    #[test_case(Pending, Confirm, Confirmed, "Booking moved from Pending -> Confirmed")]
    #[test_case(Confirmed, Confirm, Confirmed, "Booking already confirmed.")]
    #[test_case(Cancelled, Confirm, Cancelled, "Cannot confirm a cancelled booking.")]
    #[test_case(Pending, Cancel, Cancelled, "Booking moved from Pending -> Cancelled")]
    #[test_case(Confirmed, Cancel, Cancelled, "Booking moved from Confirmed -> Cancelled")]
    #[test_case(Cancelled, Cancel, Cancelled, "Booking already cancelled.")]
    fn test_transition_table(
        from: BookingState,
        event: BookingEvent,
        to: BookingState,
        message: &str,
    ) {
        let outcome = transition(from, event);
        assert_eq!(outcome.from, from);
        assert_eq!(outcome.to, to);
        assert_eq!(outcome.message, message);
    }

    #[test]
    fn test_cancelled_is_terminal() {
        for event in [Confirm, Cancel] {
            assert_eq!(transition(Cancelled, event).to, Cancelled);
        }
    }

    #[test]
    fn test_machine_starts_pending() {
        let machine = BookingStateMachine::new();
        assert_eq!(machine.state(), Pending);
        assert_eq!(BookingState::default(), Pending);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut machine = BookingStateMachine::new();
        machine.confirm();

        let first = machine.cancel();
        let second = machine.cancel();
        assert!(first.changed_state());
        assert!(!second.changed_state());
        assert_eq!(machine.state(), Cancelled);
    }

    #[test]
    fn test_confirm_is_idempotent() {
        let mut machine = BookingStateMachine::new();
        assert!(machine.confirm().changed_state());
        assert!(!machine.confirm().changed_state());
        assert_eq!(machine.state(), Confirmed);
    }

    #[test]
    fn test_reset_reopens_cancelled() {
        let mut machine = BookingStateMachine::new();
        machine.cancel();
        machine.reset();
        assert_eq!(machine.state(), Pending);
        assert_eq!(machine.confirm().to, Confirmed);
    }

    #[test]
    fn test_state_names() {
        assert_eq!(Pending.name(), "PENDING");
        assert_eq!(Confirmed.name(), "CONFIRMED");
        assert_eq!(Cancelled.name(), "CANCELLED");
    }
}
