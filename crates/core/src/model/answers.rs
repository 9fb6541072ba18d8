/// Wire value for a question the user has not answered.
pub const UNANSWERED: i64 = -1;

/// Per-question selections, one slot per question.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnswerSheet {
    slots: Vec<Option<usize>>,
}

impl AnswerSheet {
    /// A sheet with every question unanswered.
    #[must_use]
    pub fn unanswered(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn get(&self, question: usize) -> Option<usize> {
        self.slots.get(question).copied().flatten()
    }

    /// Overwrite the selection for one question. Returns `false` if out of range.
    pub fn set(&mut self, question: usize, option: usize) -> bool {
        match self.slots.get_mut(question) {
            Some(slot) => {
                *slot = Some(option);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    #[must_use]
    pub fn slots(&self) -> &[Option<usize>] {
        &self.slots
    }

    /// The form the submit endpoint expects: option index or `-1`.
    #[must_use]
    pub fn to_wire(&self) -> Vec<i64> {
        self.slots
            .iter()
            .map(|slot| {
                slot.and_then(|idx| i64::try_from(idx).ok())
                    .unwrap_or(UNANSWERED)
            })
            .collect()
    }
}
