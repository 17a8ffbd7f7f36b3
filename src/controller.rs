//! Session controller: owns the generated deck and sequences the Generate,
//! Submit and Download actions.
//!
//! Network actions come in two halves. `begin_*` validates preconditions and
//! marks the trigger busy; `finish_*` applies the outcome and always clears the
//! busy flag. The event loop runs the request in between on a spawned task
//! (`dispatch_*`), while tests can await the whole action inline.

use crate::deck::DeckService;
use crate::error::{FlashcardError, Result};
use crate::export::export_cards;
use crate::generation::FlashcardGenerator;
use crate::models::{ActionButton, CardView, Flashcard, NotesInput, Notification};
use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// Result of a request that ran off the UI task.
#[derive(Debug)]
pub enum ActionOutcome {
    Generated(Result<Vec<Flashcard>>),
    Submitted(Result<()>),
}

/// The generated deck. Replaced wholesale, never edited in place.
#[derive(Debug, Default)]
pub struct SessionState {
    cards: Vec<Flashcard>,
}

impl SessionState {
    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    fn replace(&mut self, cards: Vec<Flashcard>) {
        self.cards = cards;
    }
}

pub struct FlashcardController {
    pub notes: NotesInput,
    pub card_scroll: usize,
    state: SessionState,
    view: CardView,
    generate_button: ActionButton,
    submit_button: ActionButton,
    download_button: ActionButton,
    actions_revealed: bool,
    notification: Option<Notification>,
    generator: Arc<dyn FlashcardGenerator>,
    decks: Arc<dyn DeckService>,
    deck_name: String,
    output_dir: PathBuf,
}

impl FlashcardController {
    pub fn new(
        generator: Arc<dyn FlashcardGenerator>,
        decks: Arc<dyn DeckService>,
        deck_name: impl Into<String>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            notes: NotesInput::default(),
            card_scroll: 0,
            state: SessionState::default(),
            view: CardView::Empty,
            generate_button: ActionButton::new("Generate Flashcards", "Loading..."),
            submit_button: ActionButton::new("Submit to Mochi", "Submitting..."),
            download_button: ActionButton::instant("Download JSON"),
            actions_revealed: false,
            notification: None,
            generator,
            decks,
            deck_name: deck_name.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn cards(&self) -> &[Flashcard] {
        self.state.cards()
    }

    pub fn view(&self) -> &CardView {
        &self.view
    }

    pub fn generate_button(&self) -> &ActionButton {
        &self.generate_button
    }

    pub fn submit_button(&self) -> &ActionButton {
        &self.submit_button
    }

    pub fn download_button(&self) -> &ActionButton {
        &self.download_button
    }

    /// Submit and Download stay hidden until a generation has succeeded.
    pub fn actions_revealed(&self) -> bool {
        self.actions_revealed
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    pub fn generator_name(&self) -> String {
        self.generator.name()
    }

    pub fn deck_name(&self) -> &str {
        &self.deck_name
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn scroll_cards_up(&mut self, amount: usize) {
        self.card_scroll = self.card_scroll.saturating_sub(amount);
    }

    pub fn scroll_cards_down(&mut self, amount: usize) {
        let max = self.state.len().saturating_sub(1);
        self.card_scroll = (self.card_scroll + amount).min(max);
    }

    fn warn(&mut self, err: FlashcardError) {
        tracing::warn!(reason = %err, "action aborted");
        self.notification = Some(Notification::warning(err.to_string()));
    }

    // Generate

    /// Validate the notes and mark Generate busy. Returns the trimmed notes to send.
    pub fn begin_generate(&mut self) -> Option<String> {
        if self.generate_button.busy {
            return None;
        }
        let notes = self.notes.trimmed();
        if notes.is_empty() {
            self.warn(FlashcardError::EmptyNotes);
            return None;
        }
        let notes = notes.to_string();
        self.generate_button.busy = true;
        tracing::info!(chars = notes.chars().count(), "generating flashcards");
        Some(notes)
    }

    pub fn finish_generate(&mut self, result: Result<Vec<Flashcard>>) {
        self.generate_button.busy = false;
        match result {
            Ok(cards) => {
                tracing::info!(cards = cards.len(), "generation succeeded");
                self.state.replace(cards);
                self.view = CardView::Cards;
                self.actions_revealed = true;
                self.card_scroll = 0;
            }
            Err(e) => {
                tracing::error!(error = %e, "generation failed");
                self.view = CardView::Error(e.to_string());
            }
        }
    }

    pub async fn generate(&mut self) {
        if let Some(notes) = self.begin_generate() {
            let generator = Arc::clone(&self.generator);
            let result = guarded(async move { generator.generate(&notes).await }).await;
            self.finish_generate(result);
        }
    }

    pub fn dispatch_generate(&mut self, tx: &UnboundedSender<ActionOutcome>) {
        if let Some(notes) = self.begin_generate() {
            let generator = Arc::clone(&self.generator);
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = guarded(async move { generator.generate(&notes).await }).await;
                tx.send(ActionOutcome::Generated(result)).ok();
            });
        }
    }

    // Submit

    /// Check the deck and mark Submit busy. Returns the deck name and a snapshot of the cards.
    pub fn begin_submit(&mut self) -> Option<(String, Vec<Flashcard>)> {
        if self.submit_button.busy {
            return None;
        }
        if self.state.is_empty() {
            self.warn(FlashcardError::EmptyDeck("submit"));
            return None;
        }
        self.submit_button.busy = true;
        tracing::info!(deck = %self.deck_name, cards = self.state.len(), "submitting deck");
        Some((self.deck_name.clone(), self.state.cards().to_vec()))
    }

    pub fn finish_submit(&mut self, result: Result<()>) {
        self.submit_button.busy = false;
        match result {
            Ok(()) => {
                tracing::info!("deck submitted");
                self.notification = Some(Notification::info(
                    "Flashcards successfully submitted to Mochi!",
                ));
            }
            Err(e) => {
                tracing::error!(error = %e, "submission failed");
                self.notification = Some(Notification::error(format!("Error: {}", e)));
            }
        }
    }

    pub async fn submit(&mut self) {
        if let Some((name, cards)) = self.begin_submit() {
            let decks = Arc::clone(&self.decks);
            let result = guarded(async move { decks.create_deck(&name, &cards).await }).await;
            self.finish_submit(result);
        }
    }

    pub fn dispatch_submit(&mut self, tx: &UnboundedSender<ActionOutcome>) {
        if let Some((name, cards)) = self.begin_submit() {
            let decks = Arc::clone(&self.decks);
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = guarded(async move { decks.create_deck(&name, &cards).await }).await;
                tx.send(ActionOutcome::Submitted(result)).ok();
            });
        }
    }

    // Download

    /// Write the deck to `flashcards.json` in the output directory.
    pub fn download(&mut self) -> Option<PathBuf> {
        if self.state.is_empty() {
            self.warn(FlashcardError::EmptyDeck("download"));
            return None;
        }
        match export_cards(&self.output_dir, self.state.cards()) {
            Ok(path) => {
                tracing::info!(path = %path.display(), cards = self.state.len(), "deck exported");
                self.notification = Some(Notification::info(format!(
                    "Saved {} flashcards to {}",
                    self.state.len(),
                    path.display()
                )));
                Some(path)
            }
            Err(e) => {
                tracing::error!(error = %e, "export failed");
                self.notification = Some(Notification::error(format!("Error: {}", e)));
                None
            }
        }
    }

    pub fn apply(&mut self, outcome: ActionOutcome) {
        match outcome {
            ActionOutcome::Generated(result) => self.finish_generate(result),
            ActionOutcome::Submitted(result) => self.finish_submit(result),
        }
    }
}

/// Run a request future, turning a panic into an error so busy flags still reset.
async fn guarded<T, F>(fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(result) => result,
        Err(panic) => {
            let message = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "request task panicked".to_string());
            Err(FlashcardError::TaskFailed(message))
        }
    }
}


#[cfg(test)]
mod tests {
    use super::mocks::*;
    use super::*;
    use crate::models::NotificationLevel;
    use serde_json::json;
    use tempfile::tempdir;
    use tokio::sync::mpsc;

    fn sample_cards() -> Vec<Flashcard> {
        vec![
            Flashcard::new("What is X?", "X is Y"),
            Flashcard::new("What is A?", "A is B"),
        ]
    }

    fn controller_with(
        generator: Arc<MockGenerator>,
        decks: Arc<MockDeckService>,
        output_dir: &Path,
    ) -> FlashcardController {
        FlashcardController::new(generator, decks, "Test Deck", output_dir)
    }

    #[tokio::test]
    async fn test_empty_notes_never_call_generator() {
        let dir = tempdir().unwrap();
        let generator = MockGenerator::new(MockReply::Cards(sample_cards()));
        let mut controller = controller_with(generator.clone(), MockDeckService::new(false), dir.path());

        controller.generate().await;
        controller.notes.insert_str("   \n\t  ");
        controller.generate().await;

        assert_eq!(generator.call_count(), 0);
        let notification = controller.notification().unwrap();
        assert_eq!(notification.level, NotificationLevel::Warning);
        assert_eq!(notification.message, "Please paste some notes first!");
        assert!(!controller.generate_button().busy);
        assert_eq!(controller.view(), &CardView::Empty);
    }

    #[tokio::test]
    async fn test_generate_sends_trimmed_notes() {
        let dir = tempdir().unwrap();
        let generator = MockGenerator::new(MockReply::Cards(sample_cards()));
        let mut controller = controller_with(generator.clone(), MockDeckService::new(false), dir.path());

        controller.notes.insert_str("  photosynthesis notes \n");
        controller.generate().await;

        assert_eq!(
            generator.last_notes.lock().unwrap().as_deref(),
            Some("photosynthesis notes")
        );
    }

    #[tokio::test]
    async fn test_successful_generation_replaces_state_and_reveals_actions() {
        let dir = tempdir().unwrap();
        let generator = MockGenerator::new(MockReply::Json(json!([
            {"front": "What is X?", "back": "X is Y"},
            {"front": "What is A?", "back": "A is B"}
        ])));
        let mut controller = controller_with(generator.clone(), MockDeckService::new(false), dir.path());
        assert!(!controller.actions_revealed());

        controller.notes.insert_str("some notes");
        controller.card_scroll = 3;
        controller.generate().await;

        assert_eq!(generator.call_count(), 1);
        assert_eq!(controller.cards(), sample_cards().as_slice());
        assert_eq!(controller.view(), &CardView::Cards);
        assert!(controller.actions_revealed());
        assert!(!controller.generate_button().busy);
        assert_eq!(controller.card_scroll, 0);
        assert!(controller.notification().is_none());
    }

    #[tokio::test]
    async fn test_enveloped_fenced_response_matches_bare_array() {
        let dir = tempdir().unwrap();
        let fenced = "```json\n[{\"front\": \"What is X?\", \"back\": \"X is Y\"}, {\"front\": \"What is A?\", \"back\": \"A is B\"}]\n```";
        let generator = MockGenerator::new(MockReply::Json(json!({"status": "success", "data": fenced})));
        let mut controller = controller_with(generator, MockDeckService::new(false), dir.path());

        controller.notes.insert_str("some notes");
        controller.generate().await;

        assert_eq!(controller.cards(), sample_cards().as_slice());
    }

    #[tokio::test]
    async fn test_unexpected_envelope_shows_inline_error() {
        let dir = tempdir().unwrap();
        let generator = MockGenerator::new(MockReply::Json(json!({"status": "success", "data": 7})));
        let mut controller = controller_with(generator, MockDeckService::new(false), dir.path());

        controller.notes.insert_str("some notes");
        controller.generate().await;

        assert!(matches!(controller.view(), CardView::Error(msg) if msg.starts_with("Unexpected response shape")));
        assert!(controller.cards().is_empty());
        assert!(!controller.actions_revealed());
        assert!(!controller.generate_button().busy);
    }

    #[tokio::test]
    async fn test_failed_generation_keeps_previous_deck() {
        let dir = tempdir().unwrap();
        let mut controller = controller_with(
            MockGenerator::new(MockReply::Fail(500)),
            MockDeckService::new(false),
            dir.path(),
        );
        controller.finish_generate(Ok(sample_cards()));

        controller.notes.insert_str("more notes");
        controller.generate().await;

        assert!(matches!(controller.view(), CardView::Error(msg) if msg.contains("500")));
        assert_eq!(controller.cards(), sample_cards().as_slice());
        assert!(controller.actions_revealed());
    }

    #[tokio::test]
    async fn test_generator_panic_resets_busy_flag() {
        let dir = tempdir().unwrap();
        let mut controller = controller_with(
            MockGenerator::new(MockReply::Panic),
            MockDeckService::new(false),
            dir.path(),
        );

        controller.notes.insert_str("some notes");
        controller.generate().await;

        assert!(!controller.generate_button().busy);
        assert!(matches!(controller.view(), CardView::Error(msg) if msg.contains("generator exploded")));
    }

    #[test]
    fn test_generate_ignored_while_busy() {
        let dir = tempdir().unwrap();
        let mut controller = controller_with(
            MockGenerator::new(MockReply::Cards(sample_cards())),
            MockDeckService::new(false),
            dir.path(),
        );
        controller.notes.insert_str("some notes");

        assert!(controller.begin_generate().is_some());
        assert_eq!(controller.generate_button().text(), "Loading...");
        assert!(controller.begin_generate().is_none());

        controller.finish_generate(Ok(vec![]));
        assert_eq!(controller.generate_button().text(), "Generate Flashcards");
    }

    #[tokio::test]
    async fn test_submit_with_empty_deck_warns_without_request() {
        let dir = tempdir().unwrap();
        let decks = MockDeckService::new(false);
        let mut controller = controller_with(
            MockGenerator::new(MockReply::Cards(vec![])),
            decks.clone(),
            dir.path(),
        );

        controller.submit().await;

        assert_eq!(decks.call_count(), 0);
        let notification = controller.notification().unwrap();
        assert_eq!(notification.level, NotificationLevel::Warning);
        assert_eq!(
            notification.message,
            "No flashcards to submit. Please generate flashcards first."
        );
    }

    #[tokio::test]
    async fn test_submit_sends_deck_and_leaves_state_untouched() {
        let dir = tempdir().unwrap();
        let decks = MockDeckService::new(false);
        let mut controller = controller_with(
            MockGenerator::new(MockReply::Cards(vec![])),
            decks.clone(),
            dir.path(),
        );
        controller.finish_generate(Ok(sample_cards()));

        controller.submit().await;

        let submitted = decks.submitted.lock().unwrap();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].0, "Test Deck");
        assert_eq!(submitted[0].1, sample_cards());
        assert_eq!(controller.cards(), sample_cards().as_slice());
        assert!(!controller.submit_button().busy);
        assert_eq!(
            controller.notification().unwrap().message,
            "Flashcards successfully submitted to Mochi!"
        );
    }

    #[tokio::test]
    async fn test_submit_failure_reports_error() {
        let dir = tempdir().unwrap();
        let mut controller = controller_with(
            MockGenerator::new(MockReply::Cards(vec![])),
            MockDeckService::new(true),
            dir.path(),
        );
        controller.finish_generate(Ok(sample_cards()));

        controller.submit().await;

        let notification = controller.notification().unwrap();
        assert_eq!(notification.level, NotificationLevel::Error);
        assert!(notification.message.starts_with("Error: "));
        assert!(!controller.submit_button().busy);
        assert_eq!(controller.cards(), sample_cards().as_slice());
    }

    #[test]
    fn test_download_with_empty_deck_writes_nothing() {
        let dir = tempdir().unwrap();
        let mut controller = controller_with(
            MockGenerator::new(MockReply::Cards(vec![])),
            MockDeckService::new(false),
            dir.path(),
        );

        assert!(controller.download().is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
        assert_eq!(
            controller.notification().unwrap().message,
            "No flashcards to download. Please generate flashcards first."
        );
    }

    #[test]
    fn test_download_matches_in_memory_deck() {
        let dir = tempdir().unwrap();
        let mut controller = controller_with(
            MockGenerator::new(MockReply::Cards(vec![])),
            MockDeckService::new(false),
            dir.path(),
        );
        controller.finish_generate(Ok(sample_cards()));

        let path = controller.download().unwrap();

        assert_eq!(path, dir.path().join("flashcards.json"));
        let written: Vec<Flashcard> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, controller.cards());
        assert_eq!(
            controller.notification().unwrap().level,
            NotificationLevel::Info
        );
    }

    #[tokio::test]
    async fn test_dispatch_generate_round_trip_through_channel() {
        let dir = tempdir().unwrap();
        let generator = MockGenerator::new(MockReply::Cards(sample_cards()));
        let mut controller = controller_with(generator.clone(), MockDeckService::new(false), dir.path());
        let (tx, mut rx) = mpsc::unbounded_channel();

        controller.notes.insert_str("some notes");
        controller.dispatch_generate(&tx);
        assert!(controller.generate_button().busy);

        let outcome = rx.recv().await.unwrap();
        controller.apply(outcome);

        assert!(!controller.generate_button().busy);
        assert_eq!(controller.cards().len(), 2);
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_submit_can_start_while_generate_in_flight() {
        let dir = tempdir().unwrap();
        let decks = MockDeckService::new(false);
        let mut controller = controller_with(
            MockGenerator::new(MockReply::Cards(vec![Flashcard::new("new", "deck")])),
            decks.clone(),
            dir.path(),
        );
        controller.finish_generate(Ok(sample_cards()));
        let (tx, mut rx) = mpsc::unbounded_channel();

        controller.notes.insert_str("regenerate");
        controller.dispatch_generate(&tx);
        controller.dispatch_submit(&tx);
        assert!(controller.generate_button().busy);
        assert!(controller.submit_button().busy);

        for _ in 0..2 {
            let outcome = rx.recv().await.unwrap();
            controller.apply(outcome);
        }

        // Submit snapshots the deck at press time.
        assert_eq!(decks.submitted.lock().unwrap()[0].1, sample_cards());
        assert_eq!(controller.cards(), &[Flashcard::new("new", "deck")]);
        assert!(!controller.generate_button().busy);
        assert!(!controller.submit_button().busy);
    }

    #[test]
    fn test_card_scroll_is_clamped() {
        let dir = tempdir().unwrap();
        let mut controller = controller_with(
            MockGenerator::new(MockReply::Cards(vec![])),
            MockDeckService::new(false),
            dir.path(),
        );
        controller.finish_generate(Ok(sample_cards()));

        controller.scroll_cards_down(10);
        assert_eq!(controller.card_scroll, 1);
        controller.scroll_cards_up(10);
        assert_eq!(controller.card_scroll, 0);
    }
}
