use serde::{Deserialize, Serialize};

// Hard cap on the number of words kept for a free-text answer.
pub const MAX_FREE_TEXT_WORDS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QuestionKey {
    Gender,
    City,
    Superpower,
    Fear,
    Memory,
    Strength,
    Lesson,
}

impl QuestionKey {
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionKey::Gender => "gender",
            QuestionKey::City => "city",
            QuestionKey::Superpower => "superpower",
            QuestionKey::Fear => "fear",
            QuestionKey::Memory => "memory",
            QuestionKey::Strength => "strength",
            QuestionKey::Lesson => "lesson",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerKind {
    Select(&'static [&'static str]),
    FreeText,
}

impl AnswerKind {
    pub fn is_free_text(self) -> bool {
        matches!(self, AnswerKind::FreeText)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Question {
    pub key: QuestionKey,
    pub prompt: &'static str,
    pub kind: AnswerKind,
}

pub const GENDER_OPTIONS: &[&str] = &["Man", "Woman", "Non-binary"];

pub const SUPERPOWER_OPTIONS: &[&str] = &[
    "Flight",
    "Super strength",
    "Telepathy",
    "Invisibility",
    "Time control",
    "Elemental control",
];

// The quiz, in the order it is presented.
pub static QUESTIONS: [Question; 7] = [
    Question {
        key: QuestionKey::Gender,
        prompt: "How should your hero be drawn?",
        kind: AnswerKind::Select(GENDER_OPTIONS),
    },
    Question {
        key: QuestionKey::City,
        prompt: "Where did your story begin?",
        kind: AnswerKind::FreeText,
    },
    Question {
        key: QuestionKey::Superpower,
        prompt: "Pick your superpower.",
        kind: AnswerKind::Select(SUPERPOWER_OPTIONS),
    },
    Question {
        key: QuestionKey::Fear,
        prompt: "What are you most afraid of?",
        kind: AnswerKind::FreeText,
    },
    Question {
        key: QuestionKey::Memory,
        prompt: "Which memory keeps you going?",
        kind: AnswerKind::FreeText,
    },
    Question {
        key: QuestionKey::Strength,
        prompt: "What is your signature strength?",
        kind: AnswerKind::FreeText,
    },
    Question {
        key: QuestionKey::Lesson,
        prompt: "What message would you share with the world?",
        kind: AnswerKind::FreeText,
    },
];

// Answers collected by the quiz. Every field is required before submission.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizAnswers {
    pub gender: String,
    pub city: String,
    pub superpower: String,
    pub fear: String,
    pub memory: String,
    pub strength: String,
    pub lesson: String,
}

impl QuizAnswers {
    pub fn get(&self, key: QuestionKey) -> &str {
        match key {
            QuestionKey::Gender => &self.gender,
            QuestionKey::City => &self.city,
            QuestionKey::Superpower => &self.superpower,
            QuestionKey::Fear => &self.fear,
            QuestionKey::Memory => &self.memory,
            QuestionKey::Strength => &self.strength,
            QuestionKey::Lesson => &self.lesson,
        }
    }

    pub fn set(&mut self, key: QuestionKey, value: String) {
        let slot = match key {
            QuestionKey::Gender => &mut self.gender,
            QuestionKey::City => &mut self.city,
            QuestionKey::Superpower => &mut self.superpower,
            QuestionKey::Fear => &mut self.fear,
            QuestionKey::Memory => &mut self.memory,
            QuestionKey::Strength => &mut self.strength,
            QuestionKey::Lesson => &mut self.lesson,
        };
        *slot = value;
    }

    pub fn is_answered(&self, key: QuestionKey) -> bool {
        !self.get(key).trim().is_empty()
    }

    // Index of the first question without an answer, in quiz order.
    pub fn first_missing(&self) -> Option<usize> {
        QUESTIONS
            .iter()
            .position(|question| !self.is_answered(question.key))
    }

    pub fn is_complete(&self) -> bool {
        self.first_missing().is_none()
    }

    // Copy with surrounding whitespace removed from every answer.
    pub fn trimmed(&self) -> Self {
        let mut out = Self::default();
        for question in &QUESTIONS {
            out.set(question.key, self.get(question.key).trim().to_string());
        }
        out
    }
}

// Normalizes a free-text answer while the user types.
//
// Whitespace runs collapse to one space, leading whitespace is dropped and only
// the first MAX_FREE_TEXT_WORDS words survive. A single trailing space is kept
// while the answer is still under the cap so the input field keeps accepting
// the next word.
pub fn sanitize_free_text(raw: &str) -> String {
    let words: Vec<&str> = raw.split_whitespace().collect();
    if words.is_empty() {
        return String::new();
    }

    let mut out = words
        .iter()
        .take(MAX_FREE_TEXT_WORDS)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    if words.len() < MAX_FREE_TEXT_WORDS && raw.ends_with(char::is_whitespace) {
        out.push(' ');
    }
    out
}
