use std::rc::Rc;

use crate::config::ClientConfig;
use crate::landing::{SUBTITLE, TITLE};
use crate::puzzle_view::PuzzleView;
use crate::transport::FetchTransport;
use crate::utils::*;
use gloo::timers::callback::Timeout;
use rebus_core as game;
use game::PuzzleSource;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

pub(crate) const GUESS_PLACEHOLDER: &str = "What is the phrase?";

#[derive(Debug)]
pub(crate) enum Msg {
    LoadNext,
    Loaded(game::RoundId, game::Result<game::Puzzle>),
    UpdateGuess(String),
    SubmitGuess,
    Reveal,
    ExpireFeedback(game::FeedbackTicket),
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub(crate) config: ClientConfig,
}

fn status_class(state: game::SessionState) -> &'static str {
    match state {
        game::SessionState::Correct => "correct",
        _ => "incorrect",
    }
}

/// What the interaction area offers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum DockControls {
    /// Guess form with Guess and Reveal buttons.
    Guessing,
    /// Only a "Next Puzzle" button, disabled while loading.
    Next { loading: bool },
}

/// A session plus its pending feedback expiry.
///
/// `H` is the timer handle, dropping it must cancel the timer. At most one handle is held, so replacing or clearing
/// it cancels the previous one.
struct Round<H> {
    session: game::GameSession,
    feedback_timer: Option<(game::FeedbackTicket, H)>,
}

impl<H> Round<H> {
    fn new() -> Self {
        Self {
            session: game::GameSession::new(),
            feedback_timer: None,
        }
    }

    fn pending_expiry(&self) -> Option<game::FeedbackTicket> {
        self.feedback_timer.as_ref().map(|(ticket, _)| *ticket)
    }

    fn dock(&self) -> DockControls {
        if self.session.can_guess() {
            DockControls::Guessing
        } else {
            DockControls::Next {
                loading: self.session.is_loading(),
            }
        }
    }

    fn begin_load(&mut self) -> game::RoundId {
        self.feedback_timer = None;
        self.session.begin_load()
    }

    /// `arm` starts the expiry timer for a miss.
    fn submit_guess(&mut self, arm: impl FnOnce(game::FeedbackTicket) -> H) -> bool {
        let outcome = self.session.submit_current_guess();
        match outcome {
            game::GuessOutcome::Ignored => {}
            game::GuessOutcome::Correct => self.feedback_timer = None,
            game::GuessOutcome::Incorrect(ticket) => self.feedback_timer = Some((ticket, arm(ticket))),
        }
        outcome.has_update()
    }

    fn reveal(&mut self) -> bool {
        let updated = self.session.reveal();
        if updated {
            self.feedback_timer = None;
        }
        updated
    }

    fn expire_feedback(&mut self, ticket: game::FeedbackTicket) -> bool {
        if self.pending_expiry() == Some(ticket) {
            self.feedback_timer = None;
        }
        self.session.expire_feedback(ticket)
    }
}

pub(crate) struct GameView {
    round: Round<Timeout>,
    fetcher: Rc<game::PuzzleFetcher<FetchTransport>>,
    topic: game::TopicChoice,
}

impl GameView {
    fn load_next(&mut self, ctx: &Context<Self>) {
        let round = self.round.begin_load();
        let topic = self.topic.pick(js_random_seed()).to_string();
        log::info!("round {}: topic {:?}", round.get(), topic);

        let fetcher = self.fetcher.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            let result = fetcher.fetch(&topic).await;
            link.send_message(Msg::Loaded(round, result));
        });
    }

    fn feedback_expiry(ctx: &Context<Self>, ticket: game::FeedbackTicket) -> Timeout {
        let link = ctx.link().clone();
        Timeout::new(game::FEEDBACK_CLEAR_DELAY_MS, move || {
            link.send_message(Msg::ExpireFeedback(ticket))
        })
    }

    fn view_guess_form(&self, ctx: &Context<Self>) -> Html {
        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::SubmitGuess
        });
        let oninput = ctx.link().callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::UpdateGuess(input.value())
        });

        html! {
            <form {onsubmit} class="guess-form" id="guess-form">
                <input
                    type="text"
                    value={self.round.session.guess().to_string()}
                    {oninput}
                    placeholder={GUESS_PLACEHOLDER}
                    autofocus=true
                    autocomplete="off"
                />
            </form>
        }
    }

    fn view_dock(&self, ctx: &Context<Self>, controls: DockControls) -> Html {
        match controls {
            DockControls::Guessing => {
                let onreveal = ctx.link().callback(|_: MouseEvent| Msg::Reveal);
                html! {
                    <div class="dock">
                        <button type="submit" form="guess-form" class="dock-btn primary">
                            {"Guess"}
                        </button>
                        <button type="button" class="dock-btn secondary" onclick={onreveal}>
                            {"Reveal / Skip"}
                        </button>
                    </div>
                }
            }
            DockControls::Next { loading } => {
                let onnext = ctx.link().callback(|_: MouseEvent| Msg::LoadNext);
                let label = if loading { "Loading..." } else { "Next Puzzle" };
                html! {
                    <div class="dock">
                        <button class="dock-btn primary full-width" onclick={onnext} disabled={loading}>
                            {label}
                        </button>
                    </div>
                }
            }
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let config = &ctx.props().config;
        log::debug!("api base: {:?}, topic: {:?}", config.api_base, config.topic);

        let mut view = Self {
            round: Round::new(),
            fetcher: Rc::new(game::PuzzleFetcher::new(FetchTransport, config.api_base.clone())),
            topic: config.topic.clone(),
        };
        view.load_next(ctx);
        view
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            LoadNext => {
                self.load_next(ctx);
                true
            }
            Loaded(round, result) => {
                matches!(self.round.session.complete_load(round, result), game::LoadOutcome::Applied)
            }
            UpdateGuess(text) => {
                self.round.session.set_guess(text);
                true
            }
            SubmitGuess => self
                .round
                .submit_guess(|ticket| Self::feedback_expiry(ctx, ticket)),
            Reveal => self.round.reveal(),
            ExpireFeedback(ticket) => self.round.expire_feedback(ticket),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let session = &self.round.session;
        let state = session.state();
        let loading = session.is_loading();
        let svg = session.puzzle().map(|puzzle| AttrValue::from(puzzle.svg.clone()));
        let message = session.status_message();
        let controls = self.round.dock();

        html! {
            <div class="game-container">
                <div class="puzzle-section">
                    <header class="header-container">
                        <h1>{TITLE}</h1>
                        <p class="subtitle">{SUBTITLE}</p>
                    </header>
                    <PuzzleView {svg} {loading}/>
                    if !loading {
                        <div class={classes!("status-message", status_class(state))}>
                            {message.unwrap_or_default()}
                        </div>
                    }
                </div>
                <div class="interaction-section">
                    if controls == DockControls::Guessing {
                        {self.view_guess_form(ctx)}
                    }
                    {self.view_dock(ctx, controls)}
                </div>
            </div>
        }
    }
}
