use crate::runtime::{JsClock, TimeoutScheduler, js_random_seed};
use crate::storage::BrowserStore;
use gloo::timers::callback::Interval;
use memento_core::{self as game, ClearToken, Difficulty, EngineConfig, EngineEvent, MemoryGame};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Debug)]
pub enum Msg {
    Flip(usize),
    ClearMismatch(ClearToken),
    Engine(EngineEvent),
    SelectDifficulty(Difficulty),
    SeedInput(String),
    NewGame,
    Reset,
    Replay(usize),
    ClearHistory,
    UpdateTime,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewCardFace {
    Down,
    Up,
    Matched,
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    index: usize,
    card: game::Card,
    face: ViewCardFace,
    #[prop_or_default]
    locked: bool,
    callback: Callback<usize>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    use ViewCardFace::*;

    let CardProps {
        index,
        card,
        face,
        locked,
        callback,
    } = props.clone();

    let mut class = classes!(
        "card",
        match face {
            Down => classes!(),
            Up => classes!("open"),
            Matched => classes!("open", "matched"),
        }
    );
    if locked {
        class.push("locked");
    }

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked", index);
        callback.emit(index);
    });

    match face {
        Down => html! {
            <button {class} {onclick}>{"?"}</button>
        },
        Up | Matched => {
            let gradient = card.rarity.gradient();
            let style = format!(
                "background: linear-gradient(135deg, {}, {})",
                gradient.start, gradient.end
            );
            html! {
                <button {class} {style} {onclick}>
                    <img src={card.image.clone()} alt={card.name.clone()}/>
                    <span>{card.name.clone()}</span>
                </button>
            }
        }
    }
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub struct AppProps {
    /// Board to deal instead of resuming or dealing a random one
    #[prop_or_default]
    pub seed: Option<String>,
    #[prop_or_default]
    pub difficulty: Option<Difficulty>,
}

pub struct App {
    game: MemoryGame<BrowserStore>,
    difficulty: Difficulty,
    seed_input: String,
    prev_time: u64,
    _timer_interval: Interval,
}

impl App {
    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(500, move || link.send_message(Msg::UpdateTime))
    }

    fn create_game(ctx: &Context<Self>) -> MemoryGame<BrowserStore> {
        let scheduler = TimeoutScheduler::new(ctx.link().callback(Msg::ClearMismatch));
        let mut game = MemoryGame::new(
            BrowserStore,
            scheduler,
            EngineConfig::default(),
            js_random_seed(),
        )
        .with_clock(JsClock);

        let on_event = ctx.link().callback(Msg::Engine);
        game.subscribe(move |event| on_event.emit(event.clone()));
        game
    }

    fn face_at(&self, index: usize) -> ViewCardFace {
        let state = self.game.state();
        if state.matched_indices().contains(&index) {
            ViewCardFace::Matched
        } else if state.is_face_up(index) {
            ViewCardFace::Up
        } else {
            ViewCardFace::Down
        }
    }

    fn status_text(&self) -> String {
        use game::Lifecycle::*;

        let state = self.game.state();
        match state.lifecycle() {
            Idle if state.board().is_empty() => "Pick a difficulty and start a new game".to_owned(),
            Idle => "Flip any card to start".to_owned(),
            Playing => format!("{} pairs left", self.pairs_left()),
            Completed => format!(
                "Cleared in {} moves and {}",
                state.move_count(),
                format_time(self.game.elapsed_secs())
            ),
        }
    }

    fn pairs_left(&self) -> usize {
        let state = self.game.state();
        (state.board().len() - state.matched_indices().len()) / 2
    }

    fn view_board(&self, ctx: &Context<Self>) -> Html {
        let state = self.game.state();
        let (_, cols) = state.difficulty().dimensions();
        let style = format!("grid-template-columns: repeat({}, 1fr)", cols);
        let locked = state.is_game_over();

        html! {
            <div class="board" {style}>
                {
                    for state.board().iter().enumerate().map(|(index, card)| {
                        let face = self.face_at(index);
                        let callback = ctx.link().callback(Msg::Flip);
                        html! {
                            <CardView {index} card={card.clone()} {face} {callback} locked={locked || face != ViewCardFace::Down}/>
                        }
                    })
                }
            </div>
        }
    }

    fn view_history(&self, ctx: &Context<Self>) -> Html {
        let history = self.game.history();
        if history.is_empty() {
            return html! {};
        }

        let cb_clear = ctx.link().callback(|_| Msg::ClearHistory);
        html! {
            <section class="history">
                <table>
                    <tr>
                        <th>{"Date"}</th>
                        <th>{"Difficulty"}</th>
                        <th>{"Moves"}</th>
                        <th>{"Time"}</th>
                        <th>{"Seed"}</th>
                        <th/>
                    </tr>
                    {
                        for history.iter().enumerate().rev().map(|(index, entry)| {
                            let cb_replay = ctx.link().callback(move |_| Msg::Replay(index));
                            html! {
                                <tr>
                                    <td>{entry.date.format("%Y-%m-%d %H:%M").to_string()}</td>
                                    <td>{entry.difficulty.name()}</td>
                                    <td>{entry.moves.to_string()}</td>
                                    <td>{format_time(entry.time)}</td>
                                    <td><code>{entry.seed.clone()}</code></td>
                                    <td><button onclick={cb_replay}>{"Replay"}</button></td>
                                </tr>
                            }
                        })
                    }
                </table>
                <button onclick={cb_clear}>{"Clear history"}</button>
            </section>
        }
    }
}

fn format_time(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

impl Component for App {
    type Message = Msg;
    type Properties = AppProps;

    fn create(ctx: &Context<Self>) -> Self {
        let AppProps { seed, difficulty } = ctx.props().clone();
        let mut game = Self::create_game(ctx);

        if seed.is_none() && difficulty.is_none() && game.load_game_state() {
            log::info!("Resumed saved game");
        } else {
            game.init_game(difficulty.unwrap_or_default(), seed.as_deref());
        }

        Self {
            difficulty: game.state().difficulty(),
            seed_input: seed.unwrap_or_default(),
            prev_time: game.elapsed_secs(),
            game,
            _timer_interval: Self::create_timer(ctx),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Flip(index) => {
                let outcome = self.game.flip(index);
                log::debug!("flip {}: {:?}", index, outcome);
                outcome.has_update()
            }
            ClearMismatch(token) => self.game.clear_mismatch(token),
            Engine(event) => {
                log::trace!("engine event: {:?}", event);
                matches!(event, EngineEvent::Completed(_) | EngineEvent::HistoryCleared)
            }
            SelectDifficulty(difficulty) => {
                if self.difficulty != difficulty {
                    self.difficulty = difficulty;
                    true
                } else {
                    false
                }
            }
            SeedInput(seed) => {
                self.seed_input = seed;
                false
            }
            NewGame => {
                let seed = self.seed_input.trim();
                self.game
                    .init_game(self.difficulty, (!seed.is_empty()).then_some(seed));
                self.game.start_game();
                true
            }
            Reset => {
                self.game.reset_game();
                true
            }
            Replay(index) => match self.game.history().get(index).cloned() {
                Some(entry) => {
                    self.difficulty = entry.difficulty;
                    self.seed_input = entry.seed.clone();
                    self.game.replay(&entry);
                    true
                }
                None => false,
            },
            ClearHistory => {
                self.game.clear_history();
                true
            }
            UpdateTime => {
                let time = self.game.elapsed_secs();
                if self.prev_time != time {
                    self.prev_time = time;
                    true
                } else {
                    false
                }
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let state = self.game.state();
        let stats = self.game.current_stats();

        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            NewGame
        });
        let cb_reset = ctx.link().callback(|_| Reset);
        let cb_seed = ctx
            .link()
            .callback(|e: InputEvent| SeedInput(e.target_unchecked_into::<HtmlInputElement>().value()));

        html! {
            <div class={classes!("memento", state.lifecycle().is_completed().then_some("won"))}>
                <nav>
                    {
                        for Difficulty::ALL.into_iter().map(|difficulty| {
                            let onclick = ctx.link().callback(move |_| SelectDifficulty(difficulty));
                            let class = classes!((difficulty == self.difficulty).then_some("selected"));
                            let (rows, cols) = difficulty.dimensions();
                            html! {
                                <button {class} {onclick}>{format!("{} ({}x{})", difficulty.name(), rows, cols)}</button>
                            }
                        })
                    }
                    <input placeholder="seed" value={self.seed_input.clone()} oninput={cb_seed}/>
                    <button onclick={cb_new_game}>{"New game"}</button>
                    <button onclick={cb_reset}>{"Reset"}</button>
                </nav>
                <header>
                    <aside>{format!("Moves: {}", stats.moves)}</aside>
                    <span>{self.status_text()}</span>
                    <aside>{format_time(self.game.elapsed_secs())}</aside>
                </header>
                {self.view_board(ctx)}
                <footer><small>{format!("seed: {}", state.seed())}</small></footer>
                {self.view_history(ctx)}
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_is_formatted_as_minutes_and_seconds() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(59), "0:59");
        assert_eq!(format_time(61), "1:01");
        assert_eq!(format_time(3_600), "60:00");
    }
}
