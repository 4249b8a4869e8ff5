use std::time::Duration;

use rand::rngs::SmallRng;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, Chapter, Item};
use crate::config::Config;
use crate::engine::mastery::ProgressStore;
use crate::engine::matcher::{self, MatchMode};
use crate::engine::pool::SessionPool;
use crate::lookup::{self, ReadingLookup, ToneMode};
use crate::session::timer::Scheduler;
use crate::session::view::{
    self, ChapterSummary, Confirmation, Feedback, PracticeView, Screen, ViewModel,
};
use crate::store::json_store::JsonStore;

/// Typed learner intent, independent of how it was entered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    SelectChapter(usize),
    Submit(String),
    RequestHint,
    ResetChapter,
    ResetAll,
    Confirm,
    Cancel,
    ToggleMode,
    Back,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DeferredTask {
    NextItem,
}

const HINT_TOKENS: [&str; 2] = ["help", "hint"];

struct ActiveChapter {
    chapter: Chapter,
    pool: SessionPool,
    current: Option<Item>,
    feedback: Feedback,
}

/// Session controller: owns progress, the active pool and the mode flag,
/// and turns each [`Command`] into a new [`ViewModel`].
pub struct App {
    catalog: Catalog,
    lookup: Box<dyn ReadingLookup>,
    store: Option<JsonStore>,
    progress: ProgressStore,
    advanced_mode: bool,
    mastery_threshold: u32,
    advance_delay: Duration,
    screen: Screen,
    active: Option<ActiveChapter>,
    confirm: Option<Confirmation>,
    scheduler: Scheduler<DeferredTask>,
    rng: SmallRng,
}

impl App {
    /// Progress and the mode flag are read once here; without a store the
    /// session runs purely in memory.
    pub fn new(
        config: &Config,
        catalog: Catalog,
        lookup: Box<dyn ReadingLookup>,
        store: Option<JsonStore>,
        rng: SmallRng,
    ) -> Self {
        let mastery_threshold = config.mastery_threshold.max(1);
        let (mut progress, advanced_mode) = match store {
            Some(ref s) => (s.load_progress(), s.load_advanced_mode()),
            None => (ProgressStore::default(), false),
        };
        let adjusted = progress.normalize(mastery_threshold);
        if adjusted > 0 {
            info!(adjusted, mastery_threshold, "stored streaks clamped to threshold");
        }
        info!(
            items = catalog.len(),
            chapters = catalog.chapter_count(),
            tracked = progress.len(),
            advanced_mode,
            "session controller ready"
        );

        Self {
            catalog,
            lookup,
            store,
            progress,
            advanced_mode,
            mastery_threshold,
            advance_delay: Duration::from_millis(config.advance_delay_ms),
            screen: Screen::Menu,
            active: None,
            confirm: None,
            scheduler: Scheduler::default(),
            rng,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    pub fn pool(&self) -> Option<&SessionPool> {
        self.active.as_ref().map(|a| &a.pool)
    }

    pub fn current_item(&self) -> Option<&Item> {
        self.active.as_ref().and_then(|a| a.current.as_ref())
    }

    pub fn advanced_mode(&self) -> bool {
        self.advanced_mode
    }

    pub fn match_mode(&self) -> MatchMode {
        MatchMode::from_advanced(self.advanced_mode)
    }

    /// Apply one command and return the resulting view.
    pub fn dispatch(&mut self, command: Command) -> ViewModel {
        if self.confirm.is_some() {
            match command {
                Command::Confirm => self.confirm_pending(),
                Command::Cancel | Command::Back => self.confirm = None,
                _ => debug!(?command, "ignored while confirmation is pending"),
            }
            return self.view();
        }

        match command {
            Command::SelectChapter(index) => self.select_chapter(index),
            Command::Submit(text) => self.submit(&text),
            Command::RequestHint => self.request_hint(),
            Command::ResetChapter => self.arm_chapter_reset(),
            Command::ResetAll => self.arm_global_reset(),
            Command::ToggleMode => self.toggle_mode(),
            Command::Back => self.go_to_menu(),
            Command::Confirm | Command::Cancel => {}
        }
        self.view()
    }

    /// Let `elapsed` pass for the deferred advance. Returns true when the
    /// next item was presented (or the chapter completed) as a result.
    pub fn advance_time(&mut self, elapsed: Duration) -> bool {
        match self.scheduler.advance(elapsed) {
            Some(DeferredTask::NextItem) => {
                self.present_next();
                true
            }
            None => false,
        }
    }

    fn select_chapter(&mut self, index: usize) {
        if self.screen != Screen::Menu {
            return;
        }
        let Some(chapter) = self.catalog.chapter(index) else {
            warn!(index, "no such chapter");
            return;
        };

        let pool = SessionPool::build(self.catalog.items_in(&chapter), &self.progress);
        info!(
            chapter = chapter.range_label(),
            remaining = pool.len(),
            total = chapter.len(),
            "chapter started"
        );
        self.active = Some(ActiveChapter {
            chapter,
            pool,
            current: None,
            feedback: Feedback::none(),
        });
        self.screen = Screen::InProgress;
        self.present_next();
    }

    fn present_next(&mut self) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let previous = active.current.take();
        active.feedback = Feedback::none();
        match active.pool.select_next(previous.as_ref(), &mut self.rng) {
            Some(item) => {
                debug!(item = %item, "presenting");
                active.current = Some(item);
            }
            None => {
                info!(chapter = active.chapter.range_label(), "chapter complete");
                self.screen = Screen::Complete;
            }
        }
    }

    fn submit(&mut self, raw: &str) {
        if self.screen != Screen::InProgress || self.scheduler.is_pending() {
            return;
        }
        let Some(answer) = matcher::normalize_submission(raw) else {
            return;
        };
        if HINT_TOKENS.contains(&answer.as_str()) {
            self.request_hint();
            return;
        }
        let Some(item) = self.current_item().cloned() else {
            return;
        };

        let mode = self.match_mode();
        let plain = lookup::fetch_readings(self.lookup.as_ref(), &item, ToneMode::Plain);
        let tone_number = lookup::fetch_readings(self.lookup.as_ref(), &item, ToneMode::ToneNumber);
        let correct = matcher::judge(&answer, mode, &plain, &tone_number);

        let record = self
            .progress
            .record_attempt(&item, correct, self.mastery_threshold);
        self.persist_progress();
        debug!(item = %item, correct, streak = record.correct_streak, "judged");

        if !correct {
            if let Some(active) = self.active.as_mut() {
                active.feedback = Feedback::incorrect();
            }
            return;
        }

        let answer_text = self.display_readings(&item);
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if active.pool.remove_if_mastered(&item, &record) {
            info!(item = %item, remaining = active.pool.len(), "mastered");
            active.feedback = Feedback::correct(format!("Mastered! {answer_text}"));
        } else {
            active.feedback = Feedback::correct(answer_text);
        }

        if self.advance_delay.is_zero() {
            self.present_next();
        } else {
            self.scheduler
                .schedule(self.advance_delay, DeferredTask::NextItem);
        }
    }

    fn request_hint(&mut self) {
        if self.screen != Screen::InProgress || self.scheduler.is_pending() {
            return;
        }
        let Some(item) = self.current_item().cloned() else {
            return;
        };
        self.progress.record_hint_used(&item);
        self.persist_progress();

        let text = self.display_readings(&item);
        debug!(item = %item, "hint revealed");
        if let Some(active) = self.active.as_mut() {
            active.feedback = Feedback::hint(text);
        }
    }

    fn arm_chapter_reset(&mut self) {
        if self.screen != Screen::Complete {
            return;
        }
        if let Some(active) = &self.active {
            self.confirm = Some(Confirmation::ResetChapter(active.chapter.index));
        }
    }

    fn arm_global_reset(&mut self) {
        if self.screen == Screen::Menu {
            self.confirm = Some(Confirmation::ResetAll);
        }
    }

    fn confirm_pending(&mut self) {
        match self.confirm.take() {
            Some(Confirmation::ResetChapter(index)) => {
                let Some(chapter) = self.catalog.chapter(index) else {
                    return;
                };
                self.progress.reset_items(self.catalog.items_in(&chapter));
                self.persist_progress();
                info!(chapter = chapter.range_label(), "chapter progress reset");
                self.go_to_menu();
                self.select_chapter(index);
            }
            Some(Confirmation::ResetAll) => {
                self.progress.clear();
                if let Some(store) = &self.store
                    && let Err(e) = store.clear_progress()
                {
                    warn!(error = %e, "failed to clear stored progress");
                }
                info!("all progress reset");
            }
            None => {}
        }
    }

    fn toggle_mode(&mut self) {
        self.advanced_mode = !self.advanced_mode;
        if let Some(store) = &self.store
            && let Err(e) = store.save_advanced_mode(self.advanced_mode)
        {
            warn!(error = %e, "failed to persist mode flag");
        }
        info!(advanced_mode = self.advanced_mode, "mode toggled");
    }

    fn go_to_menu(&mut self) {
        self.scheduler.cancel();
        self.active = None;
        self.screen = Screen::Menu;
    }

    fn persist_progress(&self) {
        if let Some(store) = &self.store
            && let Err(e) = store.save_progress(&self.progress)
        {
            warn!(error = %e, "failed to persist progress");
        }
    }

    fn display_readings(&self, item: &Item) -> String {
        let readings = lookup::fetch_readings(self.lookup.as_ref(), item, ToneMode::ToneSymbol);
        lookup::join_readings(&readings)
    }

    fn chapter_summary(&self, chapter: &Chapter) -> ChapterSummary {
        let items = self.catalog.items_in(chapter);
        let mastered_count = self.progress.mastered_count(items);
        ChapterSummary {
            index: chapter.index,
            range: chapter.range_label(),
            mastered_count,
            total: items.len(),
            completed: mastered_count == items.len(),
        }
    }

    /// Snapshot of the current state for rendering.
    pub fn view(&self) -> ViewModel {
        let chapters = match self.screen {
            Screen::Menu => self
                .catalog
                .chapters()
                .map(|c| self.chapter_summary(&c))
                .collect(),
            Screen::InProgress | Screen::Complete => Vec::new(),
        };

        let practice = self.active.as_ref().map(|active| {
            let streak = active
                .current
                .as_ref()
                .map(|item| self.progress.get(item).correct_streak)
                .unwrap_or(0);
            PracticeView {
                chapter: self.chapter_summary(&active.chapter),
                item: active.current.clone(),
                streak,
                threshold: self.mastery_threshold,
                feedback: active.feedback.clone(),
                placeholder: view::placeholder(self.match_mode()),
                advancing: self.scheduler.is_pending(),
            }
        });

        ViewModel {
            screen: self.screen,
            advanced_mode: self.advanced_mode,
            chapters,
            practice,
            confirm: self.confirm,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use tempfile::TempDir;

    use super::*;
    use crate::lookup::StaticLookup;
    use crate::session::view::FeedbackKind;

    fn lookup() -> StaticLookup {
        StaticLookup::new()
            .with("妈", &["ma"], &["mā"], &["ma1"])
            .with("马", &["ma"], &["mǎ"], &["ma3"])
            .with("爱", &["ai"], &["ài"], &["ai4"])
            .with("的", &["de", "di"], &["de", "dí", "dì"], &["de", "di2", "di4"])
    }

    fn config(delay_ms: u64) -> Config {
        Config {
            mastery_threshold: 5,
            advance_delay_ms: delay_ms,
            ..Config::default()
        }
    }

    fn make_app(items: &str, chapter_size: usize, delay_ms: u64) -> App {
        App::new(
            &config(delay_ms),
            Catalog::parse(items, chapter_size),
            Box::new(lookup()),
            None,
            SmallRng::seed_from_u64(9),
        )
    }

    fn answer_for(item: &Item) -> &'static str {
        match item.as_str() {
            "妈" | "马" => "ma",
            "爱" => "ai",
            _ => "de",
        }
    }

    #[test]
    fn starts_on_menu_with_chapter_counters() {
        let app = make_app("妈 马 爱", 2, 0);
        let view = app.view();
        assert_eq!(view.screen, Screen::Menu);
        assert_eq!(view.chapters.len(), 2);
        assert_eq!(view.chapters[0].range, "1-2");
        assert_eq!(view.chapters[0].total, 2);
        assert_eq!(view.chapters[1].range, "3-3");
        assert!(view.practice.is_none());
    }

    #[test]
    fn selecting_chapter_presents_an_item() {
        let mut app = make_app("妈 马", 2, 0);
        let view = app.dispatch(Command::SelectChapter(0));
        assert_eq!(view.screen, Screen::InProgress);
        let practice = view.practice.unwrap();
        assert!(practice.item.is_some());
        assert_eq!(practice.threshold, 5);
        assert_eq!(practice.feedback.kind, FeedbackKind::None);
        assert_eq!(practice.placeholder, "type pinyin (e.g. ma)");
    }

    #[test]
    fn unknown_chapter_stays_on_menu() {
        let mut app = make_app("妈 马", 2, 0);
        assert_eq!(app.dispatch(Command::SelectChapter(5)).screen, Screen::Menu);
    }

    #[test]
    fn blank_submission_is_not_an_attempt() {
        let mut app = make_app("妈 马", 2, 0);
        app.dispatch(Command::SelectChapter(0));
        let item = app.current_item().cloned().unwrap();
        app.dispatch(Command::Submit("ma".into()));
        let after_correct = app.progress().get(&item);
        assert_eq!(after_correct.correct_streak, 1);

        let current = app.current_item().cloned().unwrap();
        let before = app.progress().get(&current);
        let view = app.dispatch(Command::Submit("   ".into()));
        assert_eq!(app.progress().get(&current), before);
        assert_eq!(view.practice.unwrap().feedback.kind, FeedbackKind::None);
    }

    #[test]
    fn incorrect_answer_resets_streak_and_keeps_item() {
        let mut app = make_app("妈 马", 2, 0);
        app.dispatch(Command::SelectChapter(0));
        let item = app.current_item().cloned().unwrap();
        let view = app.dispatch(Command::Submit("xyz".into()));
        assert_eq!(app.current_item(), Some(&item));
        let practice = view.practice.unwrap();
        assert_eq!(practice.feedback.kind, FeedbackKind::Incorrect);
        assert_eq!(practice.feedback.text, "Try again!");
        assert_eq!(practice.streak, 0);
    }

    #[test]
    fn correct_answer_waits_for_delay_then_advances() {
        let mut app = make_app("妈 马", 2, 800);
        app.dispatch(Command::SelectChapter(0));
        let first = app.current_item().cloned().unwrap();

        let view = app.dispatch(Command::Submit(answer_for(&first).into()));
        let practice = view.practice.unwrap();
        assert_eq!(practice.feedback.kind, FeedbackKind::Correct);
        assert!(practice.advancing);
        assert_eq!(app.current_item(), Some(&first));

        // Input is locked while the answer is on screen
        app.dispatch(Command::Submit(answer_for(&first).into()));
        assert_eq!(app.progress().get(&first).correct_streak, 1);

        assert!(!app.advance_time(Duration::from_millis(799)));
        assert!(app.advance_time(Duration::from_millis(1)));
        let next = app.current_item().cloned().unwrap();
        assert_ne!(next, first);
        assert_eq!(app.view().practice.unwrap().feedback.kind, FeedbackKind::None);
    }

    #[test]
    fn correct_feedback_shows_tone_marked_readings() {
        let mut app = make_app("的", 1, 800);
        app.dispatch(Command::SelectChapter(0));
        let view = app.dispatch(Command::Submit("di".into()));
        assert_eq!(view.practice.unwrap().feedback.text, "de / dí / dì");
    }

    #[test]
    fn hint_token_resets_streak_without_advancing() {
        let mut app = make_app("爱", 1, 0);
        app.dispatch(Command::SelectChapter(0));
        let item = Item::from("爱");
        app.dispatch(Command::Submit("ai".into()));
        app.dispatch(Command::Submit("ai".into()));
        assert_eq!(app.progress().get(&item).correct_streak, 2);

        let view = app.dispatch(Command::Submit(" HINT ".into()));
        let practice = view.practice.unwrap();
        assert_eq!(practice.feedback.kind, FeedbackKind::Hint);
        assert_eq!(practice.feedback.text, "ài");
        assert_eq!(practice.streak, 0);
        assert_eq!(practice.item, Some(item.clone()));

        app.dispatch(Command::Submit("help".into()));
        assert_eq!(app.progress().get(&item).correct_streak, 0);
        assert_eq!(app.current_item(), Some(&item));
    }

    #[test]
    fn back_cancels_pending_advance() {
        let mut app = make_app("妈 马", 2, 800);
        app.dispatch(Command::SelectChapter(0));
        let item = app.current_item().cloned().unwrap();
        app.dispatch(Command::Submit(answer_for(&item).into()));
        let view = app.dispatch(Command::Back);
        assert_eq!(view.screen, Screen::Menu);
        assert!(!app.advance_time(Duration::from_secs(2)));
        assert!(app.pool().is_none());
        // The attempt itself was already recorded
        assert_eq!(app.progress().get(&item).correct_streak, 1);
    }

    #[test]
    fn mastering_last_item_completes_chapter() {
        let mut app = make_app("爱", 1, 0);
        app.dispatch(Command::SelectChapter(0));
        for _ in 0..4 {
            app.dispatch(Command::Submit("ai".into()));
        }
        let view = app.dispatch(Command::Submit("ai".into()));
        assert_eq!(view.screen, Screen::Complete);
        let practice = view.practice.unwrap();
        assert_eq!(practice.item, None);
        assert_eq!(practice.chapter.mastered_count, 1);
        assert!(practice.chapter.completed);
    }

    #[test]
    fn mastered_feedback_is_kept_until_advance() {
        let mut app = make_app("爱 妈", 2, 500);
        app.dispatch(Command::SelectChapter(0));
        let item = app.current_item().cloned().unwrap();
        let answer = answer_for(&item);
        for _ in 0..4 {
            app.progress.record_attempt(&item, true, 5);
        }
        let view = app.dispatch(Command::Submit(answer.into()));
        let practice = view.practice.unwrap();
        assert!(practice.feedback.text.starts_with("Mastered! "));
        assert_eq!(practice.chapter.mastered_count, 1);
        assert!(!app.pool().unwrap().contains(&item));
    }

    #[test]
    fn advanced_mode_requires_tone() {
        let mut app = make_app("爱", 1, 0);
        app.dispatch(Command::ToggleMode);
        let view = app.dispatch(Command::SelectChapter(0));
        assert_eq!(
            view.practice.unwrap().placeholder,
            "type pinyin with tone number (e.g. ma3)"
        );

        app.dispatch(Command::Submit("ai".into()));
        assert_eq!(app.progress().get(&Item::from("爱")).correct_streak, 0);
        app.dispatch(Command::Submit("ai2".into()));
        assert_eq!(app.progress().get(&Item::from("爱")).correct_streak, 0);
        app.dispatch(Command::Submit("ai4".into()));
        assert_eq!(app.progress().get(&Item::from("爱")).correct_streak, 1);
    }

    #[test]
    fn lookup_failure_makes_every_answer_wrong() {
        let mut app = make_app("猫", 1, 0);
        app.dispatch(Command::SelectChapter(0));
        let view = app.dispatch(Command::Submit("mao".into()));
        assert_eq!(view.practice.unwrap().feedback.kind, FeedbackKind::Incorrect);
        assert_eq!(app.screen(), Screen::InProgress);
    }

    #[test]
    fn global_reset_needs_confirmation() {
        let mut app = make_app("爱", 1, 0);
        app.dispatch(Command::SelectChapter(0));
        app.dispatch(Command::Submit("ai".into()));
        app.dispatch(Command::Back);

        let view = app.dispatch(Command::ResetAll);
        assert_eq!(view.confirm, Some(Confirmation::ResetAll));
        // Other commands are ignored while the prompt is open
        app.dispatch(Command::SelectChapter(0));
        assert_eq!(app.screen(), Screen::Menu);

        app.dispatch(Command::Cancel);
        assert_eq!(app.progress().get(&Item::from("爱")).correct_streak, 1);

        app.dispatch(Command::ResetAll);
        let view = app.dispatch(Command::Confirm);
        assert!(view.confirm.is_none());
        assert!(app.progress().is_empty());
    }

    #[test]
    fn global_reset_only_from_menu() {
        let mut app = make_app("爱", 1, 0);
        app.dispatch(Command::SelectChapter(0));
        assert!(app.dispatch(Command::ResetAll).confirm.is_none());
    }

    #[test]
    fn chapter_reset_restarts_same_chapter() {
        let mut app = make_app("爱 妈 马", 1, 0);
        app.dispatch(Command::SelectChapter(0));
        for _ in 0..5 {
            app.dispatch(Command::Submit("ai".into()));
        }
        assert_eq!(app.screen(), Screen::Complete);
        app.progress.record_attempt(&Item::from("妈"), true, 5);

        let view = app.dispatch(Command::ResetChapter);
        assert_eq!(view.confirm, Some(Confirmation::ResetChapter(0)));
        let view = app.dispatch(Command::Confirm);
        assert_eq!(view.screen, Screen::InProgress);
        assert_eq!(app.current_item(), Some(&Item::from("爱")));
        assert!(!app.progress().is_mastered(&Item::from("爱")));
        // Other chapters are untouched
        assert_eq!(app.progress().get(&Item::from("妈")).correct_streak, 1);
    }

    #[test]
    fn progress_and_mode_are_written_through() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut app = App::new(
            &config(0),
            Catalog::parse("爱", 1),
            Box::new(lookup()),
            Some(store),
            SmallRng::seed_from_u64(1),
        );
        app.dispatch(Command::SelectChapter(0));
        app.dispatch(Command::Submit("ai".into()));
        app.dispatch(Command::ToggleMode);

        let reopened = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        assert_eq!(reopened.load_progress().get(&Item::from("爱")).correct_streak, 1);
        assert!(reopened.load_advanced_mode());
    }

    fn app_with_store(dir: &TempDir, items: &str, threshold: u32) -> App {
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        App::new(
            &Config {
                mastery_threshold: threshold,
                ..config(0)
            },
            Catalog::parse(items, 1),
            Box::new(lookup()),
            Some(store),
            SmallRng::seed_from_u64(3),
        )
    }

    #[test]
    fn chapter_reset_cancel_keeps_progress_and_confirm_persists() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with_store(&dir, "爱", 5);
        let item = Item::from("爱");
        app.dispatch(Command::SelectChapter(0));
        for _ in 0..5 {
            app.dispatch(Command::Submit("ai".into()));
        }
        assert_eq!(app.screen(), Screen::Complete);

        app.dispatch(Command::ResetChapter);
        let view = app.dispatch(Command::Cancel);
        assert!(view.confirm.is_none());
        assert_eq!(view.screen, Screen::Complete);
        assert!(app.progress().is_mastered(&item));

        app.dispatch(Command::ResetChapter);
        let view = app.dispatch(Command::Back);
        assert!(view.confirm.is_none());
        assert_eq!(view.screen, Screen::Complete);
        assert!(app.progress().is_mastered(&item));

        app.dispatch(Command::ResetChapter);
        let view = app.dispatch(Command::Confirm);
        assert_eq!(view.screen, Screen::InProgress);

        let reopened = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        let stored = reopened.load_progress().get(&item);
        assert!(!stored.mastered);
        assert_eq!(stored.correct_streak, 0);
    }

    #[test]
    fn failed_writes_leave_session_running() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with_store(&dir, "爱", 5);
        app.dispatch(Command::SelectChapter(0));
        std::fs::remove_dir_all(dir.path()).unwrap();

        for _ in 0..4 {
            app.dispatch(Command::Submit("ai".into()));
        }
        let view = app.dispatch(Command::Submit("ai".into()));
        assert_eq!(view.screen, Screen::Complete);
        assert!(app.progress().is_mastered(&Item::from("爱")));

        let view = app.dispatch(Command::Back);
        assert_eq!(view.screen, Screen::Menu);
        assert!(view.chapters[0].completed);
    }

    #[test]
    fn stored_streaks_follow_a_lowered_threshold() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut progress = ProgressStore::default();
        for _ in 0..4 {
            progress.record_attempt(&Item::from("爱"), true, 5);
        }
        progress.record_attempt(&Item::from("妈"), true, 5);
        store.save_progress(&progress).unwrap();

        let mut app = app_with_store(&dir, "爱 妈", 3);
        let ai = app.progress().get(&Item::from("爱"));
        assert_eq!(ai.correct_streak, 3);
        assert!(ai.mastered);
        assert_eq!(app.progress().get(&Item::from("妈")).correct_streak, 1);

        let view = app.dispatch(Command::SelectChapter(0));
        assert_eq!(view.screen, Screen::Complete);
        let practice = view.practice.unwrap();
        assert!(practice.streak <= practice.threshold);
    }

    #[test]
    fn hint_is_ignored_while_advance_is_pending() {
        let mut app = make_app("妈 马", 2, 800);
        app.dispatch(Command::SelectChapter(0));
        let item = app.current_item().cloned().unwrap();
        app.dispatch(Command::Submit(answer_for(&item).into()));

        let view = app.dispatch(Command::RequestHint);
        let practice = view.practice.unwrap();
        assert!(practice.advancing);
        assert_eq!(practice.feedback.kind, FeedbackKind::Correct);
        assert_eq!(practice.streak, 1);
        assert_eq!(app.progress().get(&item).correct_streak, 1);

        app.dispatch(Command::Submit("hint".into()));
        assert_eq!(app.progress().get(&item).correct_streak, 1);
    }
}
