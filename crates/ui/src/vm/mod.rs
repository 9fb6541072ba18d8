mod quiz_vm;

pub use quiz_vm::{
    ActiveQuizVm, IntegrityVm, OptionVm, QuizPhase, ResultVm, URGENT_SECS, format_timer,
    option_letter, quiz_phase,
};
