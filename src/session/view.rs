use crate::catalog::Item;
use crate::engine::matcher::MatchMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Menu,
    InProgress,
    Complete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackKind {
    None,
    Correct,
    Incorrect,
    Hint,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub text: String,
}

impl Feedback {
    pub fn none() -> Self {
        Self {
            kind: FeedbackKind::None,
            text: String::new(),
        }
    }

    pub fn correct(text: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Correct,
            text: text.into(),
        }
    }

    pub fn incorrect() -> Self {
        Self {
            kind: FeedbackKind::Incorrect,
            text: "Try again!".to_string(),
        }
    }

    pub fn hint(text: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Hint,
            text: text.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChapterSummary {
    pub index: usize,
    pub range: String,
    pub mastered_count: usize,
    pub total: usize,
    pub completed: bool,
}

impl ChapterSummary {
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.mastered_count as f64 / self.total as f64
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PracticeView {
    pub chapter: ChapterSummary,
    /// `None` once the chapter is complete.
    pub item: Option<Item>,
    pub streak: u32,
    pub threshold: u32,
    pub feedback: Feedback,
    pub placeholder: &'static str,
    /// A correct answer is on screen and the next item is about to appear.
    pub advancing: bool,
}

/// A destructive action waiting for a yes/no answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confirmation {
    ResetChapter(usize),
    ResetAll,
}

impl Confirmation {
    pub fn prompt(&self) -> &'static str {
        match self {
            Confirmation::ResetChapter(_) => "Reset progress for this chapter?",
            Confirmation::ResetAll => {
                "Are you sure you want to reset all progress? This cannot be undone."
            }
        }
    }
}

/// Everything a renderer needs after a state transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewModel {
    pub screen: Screen,
    pub advanced_mode: bool,
    pub chapters: Vec<ChapterSummary>,
    pub practice: Option<PracticeView>,
    pub confirm: Option<Confirmation>,
}

pub fn placeholder(mode: MatchMode) -> &'static str {
    match mode {
        MatchMode::Plain => "type pinyin (e.g. ma)",
        MatchMode::ToneNumber => "type pinyin with tone number (e.g. ma3)",
    }
}
