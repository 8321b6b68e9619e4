/// Outcome of the unlock rules for a single watch request.
///
/// Indices refer to the course's current [`ContentSequence`](crate::sequence::ContentSequence).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Move the pointer one step forward. `from` is `None` for the first unlock of the course.
    Advance { from: Option<usize>, to: usize },
    /// The target is already unlocked. Nothing is written.
    Replay { stored: usize },
    /// The target is further ahead than the next unlockable content.
    Locked { required: usize },
    NotInCourse,
}

/// Applies the unlock rules.
///
/// `previous` is the stored pointer (`None` if the user has not started the course) and `target`
/// the position of the requested content (`None` if it is not part of the course).
#[must_use]
pub fn decide(previous: Option<usize>, target: Option<usize>) -> Decision {
    let Some(target) = target else {
        return Decision::NotInCourse;
    };
    let next = previous.map_or(0, |previous| previous + 1);
    match previous {
        Some(stored) if target <= stored => Decision::Replay { stored },
        _ if target == next => Decision::Advance { from: previous, to: target },
        _ => Decision::Locked { required: next },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_unlock_must_be_first_content() {
        assert_eq!(decide(None, Some(0)), Decision::Advance { from: None, to: 0 });
        assert_eq!(decide(None, Some(1)), Decision::Locked { required: 0 });
        assert_eq!(decide(None, Some(7)), Decision::Locked { required: 0 });
    }

    #[test]
    fn test_replay_at_or_before_pointer() {
        assert_eq!(decide(Some(2), Some(2)), Decision::Replay { stored: 2 });
        assert_eq!(decide(Some(2), Some(0)), Decision::Replay { stored: 2 });
    }

    #[test]
    fn test_advance_by_exactly_one() {
        assert_eq!(decide(Some(0), Some(1)), Decision::Advance { from: Some(0), to: 1 });
        assert_eq!(decide(Some(4), Some(5)), Decision::Advance { from: Some(4), to: 5 });
    }

    #[test]
    fn test_skipping_ahead_is_locked() {
        assert_eq!(decide(Some(0), Some(2)), Decision::Locked { required: 1 });
        assert_eq!(decide(Some(3), Some(9)), Decision::Locked { required: 4 });
    }

    #[test]
    fn test_unknown_content() {
        assert_eq!(decide(None, None), Decision::NotInCourse);
        assert_eq!(decide(Some(3), None), Decision::NotInCourse);
    }
}
