//! Quiz session state machine.
//!
//! Every input (user intent, timer tick, focus signal, network completion)
//! arrives as a [`SessionEvent`] and is applied by [`QuizSession::apply`],
//! which returns the side effects the caller must run. Keeping all of it in
//! one synchronous reducer makes the timer/violation race deterministic:
//! whichever event is applied first wins.

use thiserror::Error;

use crate::integrity::{IntegrityMonitor, IntegrityOutcome, MAX_WARNINGS};
use crate::model::{AnswerSheet, Question, Quiz, QuizId, SubmissionRequest, SubmissionResult};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session is not in progress")]
    NotInProgress,

    #[error("question {index} is out of range (quiz has {len})")]
    QuestionOutOfRange { index: usize, len: usize },

    #[error("option {option} is out of range for question {question} ({count} options)")]
    OptionOutOfRange {
        question: usize,
        option: usize,
        count: usize,
    },

    #[error("time is up, answers can no longer change")]
    TimeExpired,

    #[error("{unanswered} question(s) still unanswered")]
    Incomplete { unanswered: usize },

    #[error("a submission is already in flight")]
    SubmitInFlight,
}

//
// ─── STATUS, EVENTS, EFFECTS ───────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Loading,
    InProgress,
    Submitted,
    /// Ended by the integrity monitor. Distinct from `Submitted`.
    Terminated,
}

impl SessionStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Submitted | Self::Terminated)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOrigin {
    /// The user pressed submit before time ran out.
    Manual,
    /// The countdown reached zero; completeness is not required.
    TimeExpired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// A short user-facing message, shown as a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Screens the session may send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// The quiz catalogue; fallback after a failed load.
    Topics,
    Login,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Loaded(Quiz),
    LoadFailed(String),
    SelectAnswer { question: usize, option: usize },
    /// Select an option for whichever question is shown when the event is applied.
    SelectCurrent { option: usize },
    Advance,
    Retreat,
    Tick,
    SubmitRequested,
    SubmitSucceeded(SubmissionResult),
    SubmitFailed(String),
    FocusLost,
    FocusRegained,
    /// The user navigated away; release everything.
    Teardown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEffect {
    StartTimer,
    StopTimer,
    StartMonitor,
    StopMonitor,
    Submit {
        request: SubmissionRequest,
        origin: SubmitOrigin,
    },
    Notify(Notice),
    /// A user input that the session refused; nothing changed.
    InputRejected(SessionError),
    ClearCredentials,
    Navigate(Destination),
    /// Navigate after the termination grace period.
    NavigateAfterGrace(Destination),
}

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load quiz";
pub const INCOMPLETE_MESSAGE: &str = "Please answer all questions before submitting";
pub const SUBMITTED_MESSAGE: &str = "Quiz submitted successfully!";
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit quiz";
pub const TERMINATED_MESSAGE: &str =
    "You have been logged out due to repeated tab switching violations.";

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq)]
pub struct QuizSession {
    quiz_id: QuizId,
    quiz: Option<Quiz>,
    answers: AnswerSheet,
    current_index: usize,
    remaining_secs: u32,
    status: SessionStatus,
    integrity: IntegrityMonitor,
    in_flight: Option<SubmitOrigin>,
    time_expired: bool,
    auto_submit_attempted: bool,
    /// Expiry arrived while a manual submit was on the wire.
    auto_submit_pending: bool,
    result: Option<SubmissionResult>,
    closed: bool,
}

impl QuizSession {
    #[must_use]
    pub fn new(quiz_id: QuizId) -> Self {
        Self::with_max_warnings(quiz_id, MAX_WARNINGS)
    }

    #[must_use]
    pub fn with_max_warnings(quiz_id: QuizId, max_warnings: u32) -> Self {
        Self {
            quiz_id,
            quiz: None,
            answers: AnswerSheet::default(),
            current_index: 0,
            remaining_secs: 0,
            status: SessionStatus::Loading,
            integrity: IntegrityMonitor::new(max_warnings),
            in_flight: None,
            time_expired: false,
            auto_submit_attempted: false,
            auto_submit_pending: false,
            result: None,
            closed: false,
        }
    }

    /// Apply one event and return the effects to run, in order.
    pub fn apply(&mut self, event: SessionEvent) -> Vec<SessionEffect> {
        if self.closed {
            return Vec::new();
        }
        match event {
            SessionEvent::Loaded(quiz) => self.loaded(quiz),
            SessionEvent::LoadFailed(_) => self.load_failed(),
            SessionEvent::SelectAnswer { question, option } => {
                rejection(self.select_answer(question, option))
            }
            SessionEvent::SelectCurrent { option } => rejection(self.select_current(option)),
            SessionEvent::Advance => {
                self.advance();
                Vec::new()
            }
            SessionEvent::Retreat => {
                self.retreat();
                Vec::new()
            }
            SessionEvent::Tick => self.tick(),
            SessionEvent::SubmitRequested => match self.submit() {
                Ok(effects) => effects,
                Err(SessionError::Incomplete { .. }) => vec![SessionEffect::Notify(Notice::new(
                    NoticeLevel::Warning,
                    INCOMPLETE_MESSAGE,
                ))],
                Err(err) => vec![SessionEffect::InputRejected(err)],
            },
            SessionEvent::SubmitSucceeded(result) => self.submit_succeeded(result),
            SessionEvent::SubmitFailed(_) => self.submit_failed(),
            SessionEvent::FocusLost => self.focus_lost(),
            SessionEvent::FocusRegained => {
                self.integrity.record_focus_regained();
                Vec::new()
            }
            SessionEvent::Teardown => self.teardown(),
        }
    }

    /// Initialize progress from a fetched quiz. Only valid while loading.
    pub fn loaded(&mut self, quiz: Quiz) -> Vec<SessionEffect> {
        if self.status != SessionStatus::Loading || self.closed {
            return Vec::new();
        }
        self.answers = AnswerSheet::unanswered(quiz.len());
        self.remaining_secs = quiz.time_limit_secs();
        self.current_index = 0;
        self.quiz = Some(quiz);
        self.status = SessionStatus::InProgress;
        self.integrity.reset();
        self.integrity.activate();

        if self.remaining_secs == 0 {
            let mut effects = vec![SessionEffect::StartMonitor];
            effects.extend(self.expire());
            return effects;
        }
        vec![SessionEffect::StartTimer, SessionEffect::StartMonitor]
    }

    /// The fetch failed: report and send the user back to the catalogue.
    pub fn load_failed(&mut self) -> Vec<SessionEffect> {
        if self.status != SessionStatus::Loading || self.closed {
            return Vec::new();
        }
        self.closed = true;
        vec![
            SessionEffect::Notify(Notice::new(NoticeLevel::Error, LOAD_FAILED_MESSAGE)),
            SessionEffect::Navigate(Destination::Topics),
        ]
    }

    /// Record a selection, overwriting any earlier one for that question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` when not in progress, after time expiry, or for
    /// out-of-range indices.
    pub fn select_answer(&mut self, question: usize, option: usize) -> Result<(), SessionError> {
        if !self.is_in_progress() {
            return Err(SessionError::NotInProgress);
        }
        if self.time_expired {
            return Err(SessionError::TimeExpired);
        }
        let quiz = self.quiz.as_ref().ok_or(SessionError::NotInProgress)?;
        let q = quiz
            .question(question)
            .ok_or(SessionError::QuestionOutOfRange {
                index: question,
                len: quiz.len(),
            })?;
        if option >= q.option_count() {
            return Err(SessionError::OptionOutOfRange {
                question,
                option,
                count: q.option_count(),
            });
        }
        self.answers.set(question, option);
        Ok(())
    }

    /// Select an option for the question currently shown.
    ///
    /// # Errors
    ///
    /// See [`QuizSession::select_answer`].
    pub fn select_current(&mut self, option: usize) -> Result<(), SessionError> {
        self.select_answer(self.current_index, option)
    }

    /// Move to the next question. Returns whether the index changed.
    pub fn advance(&mut self) -> bool {
        if !self.is_in_progress() || self.current_index + 1 >= self.question_count() {
            return false;
        }
        self.current_index += 1;
        true
    }

    /// Move to the previous question. Returns whether the index changed.
    pub fn retreat(&mut self) -> bool {
        if !self.is_in_progress() || self.current_index == 0 {
            return false;
        }
        self.current_index -= 1;
        true
    }

    /// One second of the countdown.
    pub fn tick(&mut self) -> Vec<SessionEffect> {
        if !self.is_in_progress() || self.remaining_secs == 0 {
            return Vec::new();
        }
        self.remaining_secs -= 1;
        if self.remaining_secs == 0 {
            return self.expire();
        }
        Vec::new()
    }

    fn expire(&mut self) -> Vec<SessionEffect> {
        self.time_expired = true;
        let mut effects = vec![SessionEffect::StopTimer];
        if self.auto_submit_attempted || self.auto_submit_pending {
            return effects;
        }
        // Only one submit may be on the wire; wait for the manual one to settle.
        if self.in_flight.is_some() {
            self.auto_submit_pending = true;
            return effects;
        }
        self.auto_submit_attempted = true;
        effects.push(self.begin_submit(SubmitOrigin::TimeExpired));
        effects
    }

    /// User-initiated submission.
    ///
    /// Before time runs out every question must be answered; once it has run
    /// out (and the automatic attempt failed) a retry goes through as-is.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Incomplete` for missing answers (nothing is sent),
    /// `SessionError::SubmitInFlight` while a submission is pending, or
    /// `SessionError::NotInProgress`.
    pub fn submit(&mut self) -> Result<Vec<SessionEffect>, SessionError> {
        if !self.is_in_progress() {
            return Err(SessionError::NotInProgress);
        }
        if self.in_flight.is_some() {
            return Err(SessionError::SubmitInFlight);
        }
        if self.time_expired {
            return Ok(vec![self.begin_submit(SubmitOrigin::TimeExpired)]);
        }
        if !self.answers.is_complete() {
            return Err(SessionError::Incomplete {
                unanswered: self.answers.len() - self.answers.answered_count(),
            });
        }
        Ok(vec![self.begin_submit(SubmitOrigin::Manual)])
    }

    fn begin_submit(&mut self, origin: SubmitOrigin) -> SessionEffect {
        self.in_flight = Some(origin);
        SessionEffect::Submit {
            request: self.submission_request(),
            origin,
        }
    }

    /// The body that would be posted right now.
    #[must_use]
    pub fn submission_request(&self) -> SubmissionRequest {
        SubmissionRequest {
            quiz_id: self.quiz_id.clone(),
            answers: self.answers.to_wire(),
            time_taken: self.time_taken_secs(),
        }
    }

    pub fn submit_succeeded(&mut self, result: SubmissionResult) -> Vec<SessionEffect> {
        if !self.is_in_progress() || self.in_flight.take().is_none() {
            return Vec::new();
        }
        self.status = SessionStatus::Submitted;
        self.result = Some(result);
        self.integrity.deactivate();
        vec![
            SessionEffect::StopTimer,
            SessionEffect::StopMonitor,
            SessionEffect::Notify(Notice::new(NoticeLevel::Success, SUBMITTED_MESSAGE)),
        ]
    }

    /// Answers are kept and the session stays in progress. A failed submit is
    /// never retried, but a manual submit that was in flight when time ran out
    /// is followed by the one automatic attempt expiry owes.
    pub fn submit_failed(&mut self) -> Vec<SessionEffect> {
        if !self.is_in_progress() || self.in_flight.take().is_none() {
            return Vec::new();
        }
        let mut effects = vec![SessionEffect::Notify(Notice::new(
            NoticeLevel::Error,
            SUBMIT_FAILED_MESSAGE,
        ))];
        if self.auto_submit_pending {
            self.auto_submit_pending = false;
            self.auto_submit_attempted = true;
            effects.push(self.begin_submit(SubmitOrigin::TimeExpired));
        }
        effects
    }

    pub fn focus_lost(&mut self) -> Vec<SessionEffect> {
        if !self.is_in_progress() {
            return Vec::new();
        }
        match self.integrity.record_focus_lost() {
            IntegrityOutcome::Ignored => Vec::new(),
            IntegrityOutcome::Warning { count, max } => {
                vec![SessionEffect::Notify(warning_notice(count, max))]
            }
            IntegrityOutcome::Ceiling { count } => {
                let mut effects = vec![SessionEffect::Notify(warning_notice(
                    count,
                    self.integrity.max_warnings(),
                ))];
                effects.extend(self.force_terminate(TERMINATED_MESSAGE));
                effects
            }
        }
    }

    /// End the session as a policy action: stop everything, drop the stored
    /// login and leave for the login screen after a grace period.
    pub fn force_terminate(&mut self, reason: &str) -> Vec<SessionEffect> {
        if !self.is_in_progress() {
            return Vec::new();
        }
        self.status = SessionStatus::Terminated;
        self.integrity.deactivate();
        vec![
            SessionEffect::StopTimer,
            SessionEffect::StopMonitor,
            SessionEffect::Notify(Notice::new(NoticeLevel::Error, reason)),
            SessionEffect::ClearCredentials,
            SessionEffect::NavigateAfterGrace(Destination::Login),
        ]
    }

    pub fn teardown(&mut self) -> Vec<SessionEffect> {
        if self.closed {
            return Vec::new();
        }
        self.closed = true;
        self.integrity.deactivate();
        vec![SessionEffect::StopTimer, SessionEffect::StopMonitor]
    }

    // ─── Accessors ────────────────────────────────────────────────────────────

    #[must_use]
    pub fn quiz_id(&self) -> &QuizId {
        &self.quiz_id
    }

    #[must_use]
    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.status == SessionStatus::InProgress && !self.closed
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.quiz.as_ref()?.question(self.current_index)
    }

    #[must_use]
    pub fn current_selection(&self) -> Option<usize> {
        self.answers.get(self.current_index)
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.quiz.as_ref().map_or(0, Quiz::len)
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.question_count()
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn time_taken_secs(&self) -> u32 {
        self.quiz
            .as_ref()
            .map_or(0, |quiz| quiz.time_limit_secs().saturating_sub(self.remaining_secs))
    }

    #[must_use]
    pub fn time_expired(&self) -> bool {
        self.time_expired
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether a manual submit would be sent right now.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.is_in_progress()
            && self.in_flight.is_none()
            && (self.time_expired || self.answers.is_complete())
    }

    #[must_use]
    pub fn integrity(&self) -> &IntegrityMonitor {
        &self.integrity
    }

    #[must_use]
    pub fn warning_count(&self) -> u32 {
        self.integrity.warning_count()
    }

    #[must_use]
    pub fn result(&self) -> Option<&SubmissionResult> {
        self.result.as_ref()
    }

    /// Position through the quiz, 0-100, counting the current question.
    #[must_use]
    pub fn progress_percent(&self) -> u32 {
        let total = self.question_count();
        if total == 0 {
            return 0;
        }
        let pct = (self.current_index + 1) * 100 / total;
        u32::try_from(pct).unwrap_or(100)
    }
}

fn rejection(outcome: Result<(), SessionError>) -> Vec<SessionEffect> {
    match outcome {
        Ok(()) => Vec::new(),
        Err(err) => vec![SessionEffect::InputRejected(err)],
    }
}

fn warning_notice(count: u32, max: u32) -> Notice {
    Notice::new(
        NoticeLevel::Warning,
        format!("Anti-Cheat Warning {count}/{max}: Tab switching detected!"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(i: usize) -> Question {
        Question::new(
            i,
            format!("Q{i}"),
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
        )
        .unwrap()
    }

    fn quiz(time_limit: u32, questions: usize) -> Quiz {
        Quiz::new("Sample", time_limit, (0..questions).map(question).collect()).unwrap()
    }

    fn loaded_session(time_limit: u32, questions: usize) -> QuizSession {
        let mut session = QuizSession::new(QuizId::new("q1").unwrap());
        session.apply(SessionEvent::Loaded(quiz(time_limit, questions)));
        session
    }

    fn result(score: u32) -> SubmissionResult {
        SubmissionResult {
            score,
            correct_answers: 4,
            total_questions: 5,
            xp_earned: 40,
            badges_earned: vec!["First Quiz".into()],
        }
    }

    fn submits(effects: &[SessionEffect]) -> Vec<(&SubmissionRequest, SubmitOrigin)> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                SessionEffect::Submit { request, origin } => Some((request, *origin)),
                _ => None,
            })
            .collect()
    }

    fn notices(effects: &[SessionEffect]) -> Vec<&Notice> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                SessionEffect::Notify(notice) => Some(notice),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn load_initializes_progress() {
        let mut session = QuizSession::new(QuizId::new("q1").unwrap());
        assert_eq!(session.status(), SessionStatus::Loading);

        let effects = session.apply(SessionEvent::Loaded(quiz(30, 2)));

        assert_eq!(
            effects,
            vec![SessionEffect::StartTimer, SessionEffect::StartMonitor]
        );
        assert_eq!(session.status(), SessionStatus::InProgress);
        assert_eq!(session.remaining_secs(), 30);
        assert_eq!(session.answers().to_wire(), vec![-1, -1]);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.answers().len(), session.question_count());
    }

    #[test]
    fn load_failure_notifies_and_falls_back() {
        let mut session = QuizSession::new(QuizId::new("q1").unwrap());
        let effects = session.apply(SessionEvent::LoadFailed("502".into()));

        assert_eq!(notices(&effects)[0].message, LOAD_FAILED_MESSAGE);
        assert!(effects.contains(&SessionEffect::Navigate(Destination::Topics)));
        assert!(session.is_closed());
        assert!(session.apply(SessionEvent::Loaded(quiz(30, 2))).is_empty());
    }

    #[test]
    fn selecting_one_question_leaves_others_alone() {
        let mut session = loaded_session(30, 3);
        session.select_answer(1, 3).unwrap();
        session.select_answer(1, 3).unwrap();
        assert_eq!(session.answers().slots(), &[None, Some(3), None]);

        session.select_answer(1, 0).unwrap();
        assert_eq!(session.answers().slots(), &[None, Some(0), None]);
    }

    #[test]
    fn selecting_out_of_range_is_rejected() {
        let mut session = loaded_session(30, 2);
        assert_eq!(
            session.select_answer(2, 0),
            Err(SessionError::QuestionOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(
            session.select_answer(0, 4),
            Err(SessionError::OptionOutOfRange {
                question: 0,
                option: 4,
                count: 4
            })
        );
        assert_eq!(session.answers().to_wire(), vec![-1, -1]);
    }

    #[test]
    fn selecting_before_load_is_rejected() {
        let mut session = QuizSession::new(QuizId::new("q1").unwrap());
        assert_eq!(session.select_answer(0, 0), Err(SessionError::NotInProgress));
    }

    #[test]
    fn navigation_clamps_at_bounds() {
        let mut session = loaded_session(30, 2);
        assert!(!session.retreat());
        assert!(session.advance());
        assert!(!session.advance());
        assert_eq!(session.current_index(), 1);
        assert!(session.is_last_question());
        assert!(session.retreat());
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn last_tick_auto_submits_exactly_once() {
        let mut session = loaded_session(2, 2);
        session.select_answer(1, 0).unwrap();

        assert!(session.apply(SessionEvent::Tick).is_empty());
        assert_eq!(session.remaining_secs(), 1);

        let effects = session.apply(SessionEvent::Tick);
        assert_eq!(session.remaining_secs(), 0);
        assert_eq!(effects[0], SessionEffect::StopTimer);
        let sent = submits(&effects);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1, SubmitOrigin::TimeExpired);
        assert_eq!(sent[0].0.answers, vec![-1, 0]);
        assert_eq!(sent[0].0.time_taken, 2);

        assert!(session.apply(SessionEvent::Tick).is_empty());
        assert_eq!(session.remaining_secs(), 0);
    }

    #[test]
    fn ticks_after_submission_have_no_effect() {
        let mut session = loaded_session(1, 1);
        session.apply(SessionEvent::Tick);
        session.apply(SessionEvent::SubmitSucceeded(result(80)));
        assert_eq!(session.status(), SessionStatus::Submitted);

        assert!(session.apply(SessionEvent::Tick).is_empty());
        assert_eq!(session.remaining_secs(), 0);
    }

    #[test]
    fn manual_submit_sends_answers_and_elapsed_time() {
        let mut session = loaded_session(30, 2);
        session.apply(SessionEvent::SelectAnswer {
            question: 0,
            option: 2,
        });
        session.apply(SessionEvent::Advance);
        session.apply(SessionEvent::SelectAnswer {
            question: 1,
            option: 0,
        });
        for _ in 0..7 {
            session.apply(SessionEvent::Tick);
        }

        let effects = session.apply(SessionEvent::SubmitRequested);
        let sent = submits(&effects);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0.answers, vec![2, 0]);
        assert_eq!(sent[0].0.time_taken, 30 - session.remaining_secs());
        assert_eq!(sent[0].1, SubmitOrigin::Manual);
        assert!(session.is_submitting());

        let effects = session.apply(SessionEvent::SubmitSucceeded(result(80)));
        assert_eq!(session.status(), SessionStatus::Submitted);
        assert_eq!(session.result().map(|r| r.score), Some(80));
        assert!(effects.contains(&SessionEffect::StopTimer));
        assert!(effects.contains(&SessionEffect::StopMonitor));
        assert_eq!(notices(&effects)[0].message, SUBMITTED_MESSAGE);
    }

    #[test]
    fn incomplete_manual_submit_is_rejected_locally() {
        let mut session = loaded_session(30, 2);
        session.select_answer(1, 0).unwrap();

        assert_eq!(
            session.clone().submit(),
            Err(SessionError::Incomplete { unanswered: 1 })
        );
        let effects = session.apply(SessionEvent::SubmitRequested);
        assert!(submits(&effects).is_empty());
        assert_eq!(notices(&effects)[0].message, INCOMPLETE_MESSAGE);
        assert_eq!(session.status(), SessionStatus::InProgress);
        assert!(!session.is_submitting());
    }

    #[test]
    fn overlapping_manual_submits_are_refused() {
        let mut session = loaded_session(30, 1);
        session.select_answer(0, 1).unwrap();
        assert_eq!(submits(&session.apply(SessionEvent::SubmitRequested)).len(), 1);
        assert_eq!(
            session.apply(SessionEvent::SubmitRequested),
            vec![SessionEffect::InputRejected(SessionError::SubmitInFlight)]
        );
        assert_eq!(session.submit(), Err(SessionError::SubmitInFlight));
    }

    #[test]
    fn failed_manual_submit_keeps_answers_for_retry() {
        let mut session = loaded_session(30, 1);
        session.select_answer(0, 1).unwrap();
        session.apply(SessionEvent::SubmitRequested);

        let effects = session.apply(SessionEvent::SubmitFailed("500".into()));
        assert_eq!(notices(&effects)[0].message, SUBMIT_FAILED_MESSAGE);
        assert_eq!(session.status(), SessionStatus::InProgress);
        assert_eq!(session.answers().to_wire(), vec![1]);
        assert!(session.can_submit());
        assert_eq!(submits(&session.apply(SessionEvent::SubmitRequested)).len(), 1);
    }

    #[test]
    fn failed_auto_submit_is_not_retried_automatically() {
        let mut session = loaded_session(1, 2);
        assert_eq!(submits(&session.apply(SessionEvent::Tick)).len(), 1);
        session.apply(SessionEvent::SubmitFailed("timeout".into()));

        assert!(session.apply(SessionEvent::Tick).is_empty());
        assert_eq!(session.status(), SessionStatus::InProgress);
        assert!(session.time_expired());
        assert_eq!(
            session.select_answer(0, 0),
            Err(SessionError::TimeExpired)
        );

        // A manual retry after expiry skips the completeness check.
        let sent = session.apply(SessionEvent::SubmitRequested);
        assert_eq!(submits(&sent)[0].0.answers, vec![-1, -1]);
        assert_eq!(submits(&sent)[0].1, SubmitOrigin::TimeExpired);
    }

    #[test]
    fn expiry_during_manual_submit_does_not_double_send() {
        let mut session = loaded_session(1, 1);
        session.select_answer(0, 0).unwrap();
        session.apply(SessionEvent::SubmitRequested);

        let effects = session.apply(SessionEvent::Tick);
        assert_eq!(effects, vec![SessionEffect::StopTimer]);
        assert!(session.apply(SessionEvent::Tick).is_empty());
    }

    #[test]
    fn expiry_during_failed_manual_submit_still_auto_submits_once() {
        let mut session = loaded_session(1, 2);
        session.select_answer(0, 1).unwrap();
        session.select_answer(1, 0).unwrap();
        assert_eq!(submits(&session.apply(SessionEvent::SubmitRequested)).len(), 1);
        assert!(submits(&session.apply(SessionEvent::Tick)).is_empty());

        let effects = session.apply(SessionEvent::SubmitFailed("503".into()));
        assert_eq!(notices(&effects)[0].message, SUBMIT_FAILED_MESSAGE);
        let sent = submits(&effects);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1, SubmitOrigin::TimeExpired);
        assert_eq!(sent[0].0.answers, vec![1, 0]);
        assert_eq!(sent[0].0.time_taken, 1);
        assert!(session.is_submitting());

        // The automatic attempt is not repeated when it fails as well.
        let effects = session.apply(SessionEvent::SubmitFailed("503".into()));
        assert!(submits(&effects).is_empty());
        assert_eq!(session.status(), SessionStatus::InProgress);
    }

    #[test]
    fn expiry_during_successful_manual_submit_sends_nothing_more() {
        let mut session = loaded_session(1, 1);
        session.select_answer(0, 0).unwrap();
        session.apply(SessionEvent::SubmitRequested);
        session.apply(SessionEvent::Tick);

        let effects = session.apply(SessionEvent::SubmitSucceeded(result(100)));
        assert!(submits(&effects).is_empty());
        assert_eq!(session.status(), SessionStatus::Submitted);
    }

    #[test]
    fn rejected_selections_are_reported() {
        let mut session = loaded_session(1, 2);
        assert_eq!(
            session.apply(SessionEvent::SelectAnswer {
                question: 5,
                option: 0
            }),
            vec![SessionEffect::InputRejected(SessionError::QuestionOutOfRange {
                index: 5,
                len: 2
            })]
        );

        session.apply(SessionEvent::Tick);
        session.apply(SessionEvent::SubmitFailed("timeout".into()));
        assert_eq!(
            session.apply(SessionEvent::SelectCurrent { option: 0 }),
            vec![SessionEffect::InputRejected(SessionError::TimeExpired)]
        );
        assert_eq!(session.answers().to_wire(), vec![-1, -1]);
    }

    #[test]
    fn select_current_follows_navigation() {
        let mut session = loaded_session(30, 3);
        assert!(session.apply(SessionEvent::SelectCurrent { option: 2 }).is_empty());
        session.apply(SessionEvent::Advance);
        session.apply(SessionEvent::SelectCurrent { option: 1 });
        assert_eq!(session.answers().slots(), &[Some(2), Some(1), None]);
        assert_eq!(session.current_selection(), Some(1));
    }

    #[test]
    fn zero_time_limit_submits_immediately() {
        let mut session = QuizSession::new(QuizId::new("q1").unwrap());
        let effects = session.apply(SessionEvent::Loaded(quiz(0, 2)));
        assert!(!effects.contains(&SessionEffect::StartTimer));
        assert_eq!(submits(&effects).len(), 1);
    }

    #[test]
    fn third_violation_terminates_session() {
        let mut session = loaded_session(30, 2);
        let mut counts = Vec::new();
        let mut ceiling_effects = Vec::new();
        for _ in 0..4 {
            let effects = session.apply(SessionEvent::FocusLost);
            session.apply(SessionEvent::FocusRegained);
            counts.extend(
                notices(&effects)
                    .iter()
                    .filter(|n| n.message.starts_with("Anti-Cheat"))
                    .map(|n| n.message.clone()),
            );
            if effects.contains(&SessionEffect::ClearCredentials) {
                ceiling_effects.push(effects);
            }
        }

        assert_eq!(
            counts,
            vec![
                "Anti-Cheat Warning 1/3: Tab switching detected!",
                "Anti-Cheat Warning 2/3: Tab switching detected!",
                "Anti-Cheat Warning 3/3: Tab switching detected!",
            ]
        );
        assert_eq!(ceiling_effects.len(), 1);
        let effects = &ceiling_effects[0];
        assert!(effects.contains(&SessionEffect::StopTimer));
        assert!(effects.contains(&SessionEffect::StopMonitor));
        assert!(effects.contains(&SessionEffect::NavigateAfterGrace(Destination::Login)));
        assert_eq!(session.status(), SessionStatus::Terminated);
        assert_eq!(session.warning_count(), 3);
    }

    #[test]
    fn violations_are_ignored_outside_progress() {
        let mut session = QuizSession::new(QuizId::new("q1").unwrap());
        assert!(session.apply(SessionEvent::FocusLost).is_empty());

        let mut session = loaded_session(1, 1);
        session.apply(SessionEvent::Tick);
        session.apply(SessionEvent::SubmitSucceeded(result(100)));
        assert!(session.apply(SessionEvent::FocusLost).is_empty());
        assert_eq!(session.warning_count(), 0);
    }

    #[test]
    fn first_event_wins_between_expiry_and_ceiling() {
        let mut session = loaded_session(1, 1);
        session.apply(SessionEvent::FocusLost);
        session.apply(SessionEvent::FocusRegained);
        session.apply(SessionEvent::FocusLost);
        session.apply(SessionEvent::FocusRegained);

        let ceiling = session.apply(SessionEvent::FocusLost);
        assert!(ceiling.contains(&SessionEffect::ClearCredentials));
        assert!(session.apply(SessionEvent::Tick).is_empty());

        let mut session = loaded_session(1, 1);
        session.apply(SessionEvent::Tick);
        session.apply(SessionEvent::SubmitSucceeded(result(0)));
        for _ in 0..3 {
            assert!(session.apply(SessionEvent::FocusLost).is_empty());
            session.apply(SessionEvent::FocusRegained);
        }
        assert_eq!(session.status(), SessionStatus::Submitted);
    }

    #[test]
    fn late_submit_result_is_discarded_after_termination() {
        let mut session = QuizSession::with_max_warnings(QuizId::new("q1").unwrap(), 1);
        session.apply(SessionEvent::Loaded(quiz(30, 1)));
        session.select_answer(0, 0).unwrap();
        session.apply(SessionEvent::SubmitRequested);
        session.apply(SessionEvent::FocusLost);
        assert_eq!(session.status(), SessionStatus::Terminated);

        assert!(session.apply(SessionEvent::SubmitSucceeded(result(90))).is_empty());
        assert_eq!(session.status(), SessionStatus::Terminated);
        assert!(session.result().is_none());
    }

    #[test]
    fn teardown_releases_and_ignores_later_events() {
        let mut session = loaded_session(30, 1);
        session.select_answer(0, 0).unwrap();
        session.apply(SessionEvent::SubmitRequested);

        assert_eq!(
            session.apply(SessionEvent::Teardown),
            vec![SessionEffect::StopTimer, SessionEffect::StopMonitor]
        );
        assert!(session.apply(SessionEvent::SubmitSucceeded(result(90))).is_empty());
        assert!(session.apply(SessionEvent::Tick).is_empty());
        assert!(session.apply(SessionEvent::Teardown).is_empty());
        assert!(session.result().is_none());
    }

    #[test]
    fn progress_counts_current_question() {
        let mut session = loaded_session(30, 4);
        assert_eq!(session.progress_percent(), 25);
        session.advance();
        session.advance();
        session.advance();
        assert_eq!(session.progress_percent(), 100);
    }
}
