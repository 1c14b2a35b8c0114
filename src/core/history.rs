//! Arrow-key history navigation.
//!
//! The cursor indexes into the session's history while the user is browsing
//! it and is `None` otherwise. Submitting a line resets it.

/// Arrow key pressed in the input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    /// Older entries
    Up,
    /// Newer entries
    Down,
}

/// What the input line should show after a navigation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryRecall {
    /// Replace the input with this entry.
    Recall(String),
    /// Navigation ran past the newest entry; empty the input.
    ClearInput,
    /// Nothing to do; leave the input alone.
    Unchanged,
}

/// Move `cursor` one step through `history`.
pub(crate) fn navigate(
    history: &[String],
    cursor: &mut Option<usize>,
    direction: HistoryDirection,
) -> HistoryRecall {
    let Some(last) = history.len().checked_sub(1) else {
        *cursor = None;
        return HistoryRecall::Unchanged;
    };

    match direction {
        HistoryDirection::Up => {
            let index = match *cursor {
                None => last,
                Some(current) => current.saturating_sub(1).min(last),
            };
            *cursor = Some(index);
            HistoryRecall::Recall(history[index].clone())
        }
        HistoryDirection::Down => match *cursor {
            None => HistoryRecall::Unchanged,
            Some(current) if current < last => {
                *cursor = Some(current + 1);
                HistoryRecall::Recall(history[current + 1].clone())
            }
            Some(_) => {
                *cursor = None;
                HistoryRecall::ClearInput
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use HistoryDirection::{Down, Up};

    fn abc() -> Vec<String> {
        vec!["A".into(), "B".into(), "C".into()]
    }

    fn recall(s: &str) -> HistoryRecall {
        HistoryRecall::Recall(s.to_string())
    }

    #[test]
    fn test_up_walks_backwards_and_stops_at_oldest() {
        let history = abc();
        let mut cursor = None;
        assert_eq!(navigate(&history, &mut cursor, Up), recall("C"));
        assert_eq!(navigate(&history, &mut cursor, Up), recall("B"));
        assert_eq!(navigate(&history, &mut cursor, Up), recall("A"));
        assert_eq!(navigate(&history, &mut cursor, Up), recall("A"));
        assert_eq!(cursor, Some(0));
    }

    #[test]
    fn test_down_after_up() {
        let history = abc();
        let mut cursor = None;
        for _ in 0..3 {
            navigate(&history, &mut cursor, Up);
        }
        assert_eq!(navigate(&history, &mut cursor, Down), recall("B"));
        assert_eq!(navigate(&history, &mut cursor, Down), recall("C"));
        assert_eq!(navigate(&history, &mut cursor, Down), HistoryRecall::ClearInput);
        assert_eq!(cursor, None);
        assert_eq!(navigate(&history, &mut cursor, Down), HistoryRecall::Unchanged);
    }

    #[test]
    fn test_empty_history() {
        let mut cursor = None;
        assert_eq!(navigate(&[], &mut cursor, Up), HistoryRecall::Unchanged);
        assert_eq!(navigate(&[], &mut cursor, Down), HistoryRecall::Unchanged);
        assert_eq!(cursor, None);
    }

    #[test]
    fn test_single_entry() {
        let history = vec!["ls".to_string()];
        let mut cursor = None;
        assert_eq!(navigate(&history, &mut cursor, Up), recall("ls"));
        assert_eq!(navigate(&history, &mut cursor, Up), recall("ls"));
        assert_eq!(navigate(&history, &mut cursor, Down), HistoryRecall::ClearInput);
    }
}
