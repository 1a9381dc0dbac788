use crate::domain::errors::ComicError;
use crate::domain::quiz::{AnswerKind, QUESTIONS, Question, QuizAnswers, sanitize_free_text};
use crate::use_cases::session::SessionContext;

// Result of a navigation attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    // Nothing changed.
    Blocked,
    Advanced(usize),
    Retreated(usize),
    // The last step was reached with gaps; moved to the first unanswered step.
    Redirected(usize),
    // Answers were persisted; control passes to the selfie flow.
    Completed(QuizAnswers),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyPress {
    Enter,
    ShiftEnter,
    Back,
}

// Linear walk through the fixed quiz questions.
pub struct QuizCollector {
    session: SessionContext,
    step: usize,
    answers: QuizAnswers,
}

impl QuizCollector {
    // Starts a fresh quiz, dropping answers stored by an earlier run.
    pub fn start(session: SessionContext) -> Self {
        session.clear_quiz_answers();
        Self {
            session,
            step: 0,
            answers: QuizAnswers::default(),
        }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn question(&self) -> &'static Question {
        &QUESTIONS[self.step]
    }

    pub fn answers(&self) -> &QuizAnswers {
        &self.answers
    }

    fn is_last_step(&self) -> bool {
        self.step + 1 == QUESTIONS.len()
    }

    // Records the answer for the current question and returns the stored value.
    pub fn answer(&mut self, raw: &str) -> Result<&str, ComicError> {
        let question = self.question();
        let value = match question.kind {
            AnswerKind::FreeText => sanitize_free_text(raw),
            AnswerKind::Select(options) => {
                let choice = raw.trim();
                if !choice.is_empty() && !options.iter().any(|option| *option == choice) {
                    return Err(ComicError::validation(format!(
                        "'{choice}' is not an option for {}",
                        question.key.as_str()
                    )));
                }
                choice.to_string()
            }
        };
        self.answers.set(question.key, value);
        Ok(self.answers.get(question.key))
    }

    pub fn next(&mut self) -> StepOutcome {
        if !self.answers.is_answered(self.question().key) {
            return StepOutcome::Blocked;
        }

        if !self.is_last_step() {
            self.step += 1;
            return StepOutcome::Advanced(self.step);
        }

        if let Some(missing) = self.answers.first_missing() {
            self.step = missing;
            return StepOutcome::Redirected(missing);
        }

        let answers = self.answers.trimmed();
        self.session.save_quiz_answers(&answers);
        // Selfie and cover from a previous run belong to a different hero.
        self.session.invalidate_selfie();
        tracing::info!("quiz completed");
        StepOutcome::Completed(answers)
    }

    pub fn back(&mut self) -> StepOutcome {
        if self.step == 0 {
            return StepOutcome::Blocked;
        }
        self.step -= 1;
        StepOutcome::Retreated(self.step)
    }

    // Keyboard shortcuts never fire while the user is typing into a field.
    pub fn handle_key(&mut self, key: KeyPress, focus_in_text_input: bool) -> Option<StepOutcome> {
        if focus_in_text_input {
            return None;
        }
        Some(match key {
            KeyPress::Enter => self.next(),
            KeyPress::ShiftEnter | KeyPress::Back => self.back(),
        })
    }
}
