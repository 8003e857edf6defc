use alloc::format;
use alloc::string::{String, ToString};

use crate::*;

/// How long a "try again" message stays up before the front end should expire it.
pub const FEEDBACK_CLEAR_DELAY_MS: u32 = 2_000;

pub const CORRECT_MESSAGE: &str = "Correct! 🎉";
pub const RETRY_MESSAGE: &str = "Not quite, try again!";

/// Identifies one load request, later completions for older rounds are dropped.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoundId(u64);

impl RoundId {
    pub const fn get(self) -> u64 {
        self.0
    }

    const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Status of the round being played.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum GameStatus {
    #[default]
    Guessing,
    Correct,
    Revealed,
}

/// Flattened view of the session, what the front end switches on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    Guessing,
    Correct,
    Revealed,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
enum Phase {
    Loading,
    Failed(FetchError),
    Playing { puzzle: Puzzle, status: GameStatus },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FeedbackKind {
    Correct,
    Retry,
    Answer,
}

/// Handle for a pending feedback expiry, stale once newer feedback is shown or the round resets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FeedbackTicket(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
    ticket: FeedbackTicket,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Stale,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    /// No puzzle, or the round is already over.
    Ignored,
    Correct,
    /// Feedback was set and should be expired with the ticket after [`FEEDBACK_CLEAR_DELAY_MS`].
    Incorrect(FeedbackTicket),
}

impl GuessOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    round: RoundId,
    phase: Phase,
    guess: String,
    feedback: Option<Feedback>,
    feedback_serial: u64,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            round: RoundId::default(),
            phase: Phase::Loading,
            guess: String::new(),
            feedback: None,
            feedback_serial: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        match &self.phase {
            Phase::Loading => SessionState::Loading,
            Phase::Failed(_) => SessionState::Error,
            Phase::Playing { status, .. } => match status {
                GameStatus::Guessing => SessionState::Guessing,
                GameStatus::Correct => SessionState::Correct,
                GameStatus::Revealed => SessionState::Revealed,
            },
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    pub fn puzzle(&self) -> Option<&Puzzle> {
        match &self.phase {
            Phase::Playing { puzzle, .. } => Some(puzzle),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<GameStatus> {
        match &self.phase {
            Phase::Playing { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match &self.phase {
            Phase::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn can_guess(&self) -> bool {
        self.status() == Some(GameStatus::Guessing)
    }

    pub fn guess(&self) -> &str {
        &self.guess
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Error text while failed, otherwise the current feedback, if any.
    pub fn status_message(&self) -> Option<String> {
        match &self.phase {
            Phase::Failed(err) => Some(err.to_string()),
            _ => self.feedback.as_ref().map(|feedback| feedback.message.clone()),
        }
    }

    /// Starts a new round. Whatever was displayed is dropped and any in-flight load is superseded.
    pub fn begin_load(&mut self) -> RoundId {
        self.round = self.round.next();
        self.phase = Phase::Loading;
        self.guess.clear();
        self.clear_feedback();
        log::debug!("loading round {}", self.round.get());
        self.round
    }

    pub fn complete_load(&mut self, round: RoundId, result: Result<Puzzle>) -> LoadOutcome {
        if round != self.round || !self.is_loading() {
            log::debug!(
                "dropping stale load for round {} (current: {})",
                round.get(),
                self.round.get()
            );
            return LoadOutcome::Stale;
        }

        self.phase = match result {
            Ok(puzzle) => {
                log::debug!("round {} ready", round.get());
                Phase::Playing {
                    puzzle,
                    status: GameStatus::Guessing,
                }
            }
            Err(err) => {
                log::warn!("round {} failed to load: {}", round.get(), err);
                Phase::Failed(err)
            }
        };
        LoadOutcome::Applied
    }

    pub async fn load_next<S: PuzzleSource>(&mut self, source: &S, topic: &str) -> LoadOutcome {
        let round = self.begin_load();
        let result = source.fetch(topic).await;
        self.complete_load(round, result)
    }

    pub fn set_guess(&mut self, text: impl Into<String>) {
        self.guess = text.into();
    }

    pub fn submit_current_guess(&mut self) -> GuessOutcome {
        let guess = core::mem::take(&mut self.guess);
        let outcome = self.submit_guess(&guess);
        self.guess = guess;
        outcome
    }

    pub fn submit_guess(&mut self, text: &str) -> GuessOutcome {
        let Phase::Playing { puzzle, status } = &mut self.phase else {
            return GuessOutcome::Ignored;
        };
        if *status != GameStatus::Guessing {
            return GuessOutcome::Ignored;
        }

        if answers_match(text, &puzzle.word) {
            log::debug!("round {} solved", self.round.get());
            *status = GameStatus::Correct;
            self.show_feedback(FeedbackKind::Correct, CORRECT_MESSAGE.to_string());
            GuessOutcome::Correct
        } else {
            log::trace!("wrong guess: {:?}", text);
            GuessOutcome::Incorrect(self.show_feedback(FeedbackKind::Retry, RETRY_MESSAGE.to_string()))
        }
    }

    pub fn reveal(&mut self) -> bool {
        let Phase::Playing { puzzle, status } = &mut self.phase else {
            return false;
        };
        if *status != GameStatus::Guessing {
            return false;
        }

        *status = GameStatus::Revealed;
        let message = format!("The answer was: {}", puzzle.word);
        log::debug!("round {} revealed", self.round.get());
        self.show_feedback(FeedbackKind::Answer, message);
        true
    }

    /// Clears feedback shown with `ticket`, unless something newer replaced it.
    pub fn expire_feedback(&mut self, ticket: FeedbackTicket) -> bool {
        match &self.feedback {
            Some(feedback) if feedback.ticket == ticket => {
                self.feedback = None;
                true
            }
            _ => false,
        }
    }

    fn show_feedback(&mut self, kind: FeedbackKind, message: String) -> FeedbackTicket {
        self.feedback_serial = self.feedback_serial.wrapping_add(1);
        let ticket = FeedbackTicket(self.feedback_serial);
        self.feedback = Some(Feedback {
            kind,
            message,
            ticket,
        });
        ticket
    }

    fn clear_feedback(&mut self) {
        self.feedback = None;
        // outstanding tickets must not match anything shown later
        self.feedback_serial = self.feedback_serial.wrapping_add(1);
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::tests::MockTransport;
    use futures_util::FutureExt;

    fn playing(word: &str) -> GameSession {
        let mut session = GameSession::new();
        let round = session.begin_load();
        session.complete_load(round, Ok(Puzzle::new(word, "<svg></svg>")));
        session
    }

    #[test]
    fn starts_loading() {
        let session = GameSession::new();
        assert_eq!(session.state(), SessionState::Loading);
        assert!(session.is_loading());
        assert_eq!(session.puzzle(), None);
    }

    #[test]
    fn load_next_end_to_end() {
        let body = r#"{"puzzle": "{\"word\":\"Ocean Breeze\",\"svg\":\"<svg width=\\\"300\\\" height=\\\"300\\\"></svg>\"}"}"#;
        let fetcher = PuzzleFetcher::new(MockTransport::ok(body), "api");
        let mut session = GameSession::new();

        let outcome = session
            .load_next(&fetcher, "Under the Ocean")
            .now_or_never()
            .expect("mock transport resolves immediately");

        assert_eq!(outcome, LoadOutcome::Applied);
        assert_eq!(session.state(), SessionState::Guessing);
        assert!(!session.is_loading());
        let puzzle = session.puzzle().unwrap();
        assert_eq!(puzzle.word, "Ocean Breeze");
        assert_eq!(puzzle.svg, r#"<svg width="300" height="300"></svg>"#);

        assert_eq!(session.submit_guess("ocean breeze"), GuessOutcome::Correct);
        assert_eq!(session.state(), SessionState::Correct);
        assert_eq!(session.status_message().as_deref(), Some(CORRECT_MESSAGE));
    }

    #[test]
    fn failed_load_surfaces_error() {
        let fetcher = PuzzleFetcher::new(MockTransport::ok(r#"{"puzzle": "sorry"}"#), "api");
        let mut session = GameSession::new();

        session.load_next(&fetcher, "Pets").now_or_never().unwrap();

        assert_eq!(session.state(), SessionState::Error);
        assert_eq!(
            session.error(),
            Some(&FetchError::Parse(ParseError::NoJsonObject))
        );
        assert_eq!(
            session.status_message(),
            Some(ParseError::NoJsonObject.to_string())
        );
        assert_eq!(session.submit_guess("anything"), GuessOutcome::Ignored);
        assert!(!session.reveal());
    }

    #[test]
    fn service_error_detail_reaches_the_status_message() {
        let reply = TransportReply::new(500, r#"{"detail": "API Key not configured"}"#);
        let fetcher = PuzzleFetcher::new(MockTransport::replying(Ok(reply)), "api");
        let mut session = GameSession::new();

        session.load_next(&fetcher, "Pets").now_or_never().unwrap();

        assert_eq!(session.state(), SessionState::Error);
        assert_eq!(
            session.status_message().as_deref(),
            Some("Network response was not ok (HTTP 500): API Key not configured")
        );
    }

    #[test]
    fn wrong_guess_keeps_guessing() {
        let mut session = playing("Ocean Breeze");

        let outcome = session.submit_guess("ocean");

        assert!(matches!(outcome, GuessOutcome::Incorrect(_)));
        assert_eq!(session.state(), SessionState::Guessing);
        assert_eq!(session.feedback().map(|f| f.kind), Some(FeedbackKind::Retry));
        assert_eq!(session.status_message().as_deref(), Some(RETRY_MESSAGE));
    }

    #[test]
    fn empty_guess_is_an_ordinary_miss() {
        let mut session = playing("Ocean Breeze");
        assert!(matches!(session.submit_guess(""), GuessOutcome::Incorrect(_)));
        assert_eq!(session.state(), SessionState::Guessing);
    }

    #[test]
    fn submit_current_guess_uses_typed_text() {
        let mut session = playing("Time Flies");
        session.set_guess("TIME-flies!");

        assert_eq!(session.submit_current_guess(), GuessOutcome::Correct);
        assert_eq!(session.guess(), "TIME-flies!");
    }

    #[test]
    fn terminal_states_ignore_guesses_and_reveal() {
        let mut session = playing("cat");
        assert_eq!(session.submit_guess("CAT"), GuessOutcome::Correct);

        assert_eq!(session.submit_guess("dog"), GuessOutcome::Ignored);
        assert!(!session.reveal());
        assert_eq!(session.state(), SessionState::Correct);

        let mut session = playing("cat");
        assert!(session.reveal());
        assert_eq!(session.submit_guess("cat"), GuessOutcome::Ignored);
        assert_eq!(session.state(), SessionState::Revealed);
    }

    #[test]
    fn nothing_happens_without_a_puzzle() {
        let mut session = GameSession::new();
        session.begin_load();

        assert_eq!(session.submit_guess("cat"), GuessOutcome::Ignored);
        assert!(!session.reveal());
        assert_eq!(session.state(), SessionState::Loading);
    }

    #[test]
    fn reveal_shows_literal_word_after_misses() {
        let mut session = playing("Rock 'n' Roll!");
        session.submit_guess("jazz");
        session.submit_guess("blues");

        assert!(session.reveal());

        assert_eq!(session.state(), SessionState::Revealed);
        let feedback = session.feedback().unwrap();
        assert_eq!(feedback.kind, FeedbackKind::Answer);
        assert!(feedback.message.contains("Rock 'n' Roll!"));
    }

    #[test]
    fn begin_load_resets_round() {
        let mut session = playing("cat");
        session.set_guess("ca");
        session.reveal();

        session.begin_load();

        assert_eq!(session.state(), SessionState::Loading);
        assert_eq!(session.puzzle(), None);
        assert_eq!(session.guess(), "");
        assert_eq!(session.feedback(), None);
    }

    #[test]
    fn stale_load_is_dropped() {
        let mut session = GameSession::new();
        let first = session.begin_load();
        let second = session.begin_load();

        assert_eq!(
            session.complete_load(first, Ok(Puzzle::new("old", "<svg/>"))),
            LoadOutcome::Stale
        );
        assert!(session.is_loading());

        assert_eq!(
            session.complete_load(second, Ok(Puzzle::new("new", "<svg/>"))),
            LoadOutcome::Applied
        );
        assert_eq!(session.puzzle().map(|p| p.word.as_str()), Some("new"));

        // a late error for the old round must not clobber the live puzzle either
        assert_eq!(
            session.complete_load(
                first,
                Err(NetworkError::Transport("timeout".to_string()).into())
            ),
            LoadOutcome::Stale
        );
        assert_eq!(session.state(), SessionState::Guessing);
    }

    #[test]
    fn duplicate_completion_is_dropped() {
        let mut session = GameSession::new();
        let round = session.begin_load();
        session.complete_load(round, Ok(Puzzle::new("cat", "<svg/>")));
        session.submit_guess("cat");

        assert_eq!(
            session.complete_load(round, Ok(Puzzle::new("dog", "<svg/>"))),
            LoadOutcome::Stale
        );
        assert_eq!(session.state(), SessionState::Correct);
    }

    #[test]
    fn expiring_feedback_respects_newer_messages() {
        let mut session = playing("cat");

        let GuessOutcome::Incorrect(first) = session.submit_guess("dog") else {
            panic!("expected a miss");
        };
        let GuessOutcome::Incorrect(second) = session.submit_guess("cow") else {
            panic!("expected a miss");
        };

        assert!(!session.expire_feedback(first));
        assert!(session.feedback().is_some());
        assert!(session.expire_feedback(second));
        assert_eq!(session.feedback(), None);
    }

    #[test]
    fn expiring_after_reset_does_nothing() {
        let mut session = playing("cat");
        let GuessOutcome::Incorrect(ticket) = session.submit_guess("dog") else {
            panic!("expected a miss");
        };

        let round = session.begin_load();
        session.complete_load(round, Ok(Puzzle::new("cow", "<svg/>")));
        let GuessOutcome::Incorrect(_) = session.submit_guess("pig") else {
            panic!("expected a miss");
        };

        assert!(!session.expire_feedback(ticket));
        assert_eq!(session.status_message().as_deref(), Some(RETRY_MESSAGE));
    }

    #[test]
    fn expiring_does_not_clear_correct_feedback() {
        let mut session = playing("cat");
        let GuessOutcome::Incorrect(ticket) = session.submit_guess("dog") else {
            panic!("expected a miss");
        };
        session.submit_guess("cat");

        assert!(!session.expire_feedback(ticket));
        assert_eq!(session.status_message().as_deref(), Some(CORRECT_MESSAGE));
    }
}
