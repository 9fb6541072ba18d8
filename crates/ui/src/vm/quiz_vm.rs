use quiz_core::model::SubmissionResult;
use quiz_core::{QuizSession, SessionStatus};

/// Remaining time below which the timer is drawn as urgent.
pub const URGENT_SECS: u32 = 60;

/// `m:ss`, minutes unbounded.
#[must_use]
pub fn format_timer(seconds: u32) -> String {
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    format!("{minutes}:{remainder:02}")
}

/// `A`, `B`, ... for option labels; `?` past `Z`.
#[must_use]
pub fn option_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map_or('?', |i| char::from(b'A' + i))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub letter: char,
    pub text: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntegrityVm {
    pub warnings: u32,
    pub max_warnings: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveQuizVm {
    pub title: String,
    pub timer: String,
    pub timer_urgent: bool,
    pub progress_percent: u32,
    pub position_label: String,
    pub prompt: String,
    pub options: Vec<OptionVm>,
    pub integrity: IntegrityVm,
    pub can_retreat: bool,
    pub is_last: bool,
    pub can_submit: bool,
    pub submitting: bool,
    pub time_expired: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub score: u32,
    pub passed: bool,
    pub correct_label: String,
    pub xp_label: String,
    pub badges: Vec<String>,
}

impl From<&SubmissionResult> for ResultVm {
    fn from(result: &SubmissionResult) -> Self {
        Self {
            score: result.score,
            passed: result.is_pass(),
            correct_label: format!("{}/{}", result.correct_answers, result.total_questions),
            xp_label: format!("+{}", result.xp_earned),
            badges: result.badges_earned.clone(),
        }
    }
}

/// What the quiz screen should show for a session snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    Loading,
    Active(Box<ActiveQuizVm>),
    Finished(ResultVm),
    Terminated,
    /// Left or failed to load; a navigation is on its way.
    Closed,
}

#[must_use]
pub fn quiz_phase(session: &QuizSession) -> QuizPhase {
    if let Some(result) = session.result() {
        return QuizPhase::Finished(ResultVm::from(result));
    }
    match session.status() {
        SessionStatus::Terminated => QuizPhase::Terminated,
        _ if session.is_closed() => QuizPhase::Closed,
        SessionStatus::Loading | SessionStatus::Submitted => QuizPhase::Loading,
        SessionStatus::InProgress => active_vm(session).map_or(QuizPhase::Loading, |vm| {
            QuizPhase::Active(Box::new(vm))
        }),
    }
}

fn active_vm(session: &QuizSession) -> Option<ActiveQuizVm> {
    let quiz = session.quiz()?;
    let question = session.current_question()?;
    let selected = session.current_selection();
    let options = question
        .options()
        .iter()
        .enumerate()
        .map(|(index, text)| OptionVm {
            index,
            letter: option_letter(index),
            text: text.clone(),
            selected: selected == Some(index),
        })
        .collect();

    Some(ActiveQuizVm {
        title: quiz.title().to_string(),
        timer: format_timer(session.remaining_secs()),
        timer_urgent: session.remaining_secs() < URGENT_SECS,
        progress_percent: session.progress_percent(),
        position_label: format!(
            "Question {} of {}",
            session.current_index() + 1,
            session.question_count()
        ),
        prompt: question.prompt().to_string(),
        options,
        integrity: IntegrityVm {
            warnings: session.warning_count(),
            max_warnings: session.integrity().max_warnings(),
        },
        can_retreat: session.current_index() > 0,
        is_last: session.is_last_question(),
        can_submit: session.can_submit(),
        submitting: session.is_submitting(),
        time_expired: session.time_expired(),
    })
}
