use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::*;

/// Change notification published to subscribers after every state transition.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineEvent {
    Initialized { difficulty: Difficulty, seed: String },
    Started,
    Flipped(usize),
    Matched([usize; 2]),
    Mismatched([usize; 2]),
    MismatchCleared([usize; 2]),
    Completed(HistoryEntry),
    Reset,
    Restored,
    HistoryCleared,
}

pub type Listener = Box<dyn FnMut(&EngineEvent)>;

/// The memory game service: owns the live session, the history, and their persistence.
///
/// Constructed once by the host and handed to whatever renders it. The host also provides the clock and the timer
/// queue; mismatch clears come back through [`MemoryGame::clear_mismatch`].
pub struct MemoryGame<S> {
    state: GameState,
    history: History,
    persistence: Persistence<S>,
    config: EngineConfig,
    clock: Box<dyn Clock>,
    scheduler: Box<dyn Scheduler>,
    rng: SmallRng,
    generation: u64,
    listeners: Vec<Listener>,
}

impl<S: KeyValueStore> MemoryGame<S> {
    /// Creates an idle engine and loads the saved history, which is never re-read afterwards.
    ///
    /// `entropy` seeds the generator for seeds the player did not choose.
    pub fn new(
        store: S,
        scheduler: impl Scheduler + 'static,
        config: EngineConfig,
        entropy: u64,
    ) -> Self {
        let persistence = Persistence::new(store, &config);
        let history = persistence.load_history().unwrap_or_else(|err| {
            log::error!("Error loading game history: {}", err);
            History::default()
        });
        log::debug!("Loaded {} history entries", history.len());

        Self {
            state: GameState::default(),
            history,
            persistence,
            config,
            clock: Box::new(SystemClock),
            scheduler: Box::new(scheduler),
            rng: SmallRng::seed_from_u64(entropy),
            generation: 0,
            listeners: Vec::new(),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&EngineEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    pub fn store(&self) -> &S {
        self.persistence.store()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn current_stats(&self) -> GameStats {
        self.state.stats()
    }

    /// Running clock for display, frozen once the game ended.
    pub fn elapsed_secs(&self) -> u64 {
        self.state.elapsed_secs(self.clock.now())
    }

    /// Deals a fresh board and discards the current game without recording it.
    pub fn init_game(&mut self, difficulty: Difficulty, seed: Option<&str>) {
        let seed = match seed.filter(|seed| !seed.is_empty()) {
            Some(seed) => seed.to_owned(),
            None => random_seed(&mut self.rng),
        };
        let board = generate_board(difficulty, &seed);

        self.generation += 1;
        self.state = GameState::new(difficulty, seed.clone(), board);
        log::debug!("New {} game with seed {:?}", difficulty, seed);

        // The new game is idle and idle games are not saved, so drop whatever an earlier game left behind.
        self.clear_snapshot();
        self.emit(EngineEvent::Initialized { difficulty, seed });
    }

    pub fn start_game(&mut self) {
        let now = self.clock.now();
        if self.state.start(now) {
            self.save_snapshot();
            self.emit(EngineEvent::Started);
        }
    }

    /// Flips the card at `index`. `false` means either a refused flip or a mismatch; use [`MemoryGame::flip`] to
    /// tell them apart.
    pub fn flip_card(&mut self, index: usize) -> bool {
        self.flip(index).is_success()
    }

    pub fn flip(&mut self, index: usize) -> FlipOutcome {
        use FlipOutcome::*;

        let now = self.clock.now();
        let was_idle = self.state.lifecycle().is_idle();
        let outcome = self.state.flip(index, now);

        if !outcome.has_update() {
            return outcome;
        }
        if was_idle && self.state.lifecycle().is_playing() {
            self.emit(EngineEvent::Started);
        }
        self.emit(EngineEvent::Flipped(index));

        match outcome {
            Rejected(_) => {}
            Revealed => self.save_snapshot(),
            Matched(pair) => {
                self.save_snapshot();
                self.emit(EngineEvent::Matched(pair));
            }
            Mismatched(pair) => {
                self.save_snapshot();
                self.schedule_clear(pair);
                self.emit(EngineEvent::Mismatched(pair));
            }
            Completed(pair) => {
                self.emit(EngineEvent::Matched(pair));
                let entry = self.finish_game();
                self.emit(EngineEvent::Completed(entry));
            }
        }

        outcome
    }

    /// Delivery point of the deferred mismatch clear. Stale tokens are harmless no-ops.
    pub fn clear_mismatch(&mut self, token: ClearToken) -> bool {
        if token.generation != self.generation {
            log::debug!(
                "Ignoring clear from generation {}, now at {}",
                token.generation,
                self.generation
            );
            return false;
        }
        if !self.state.clear_mismatch(token.pair) {
            return false;
        }

        self.save_snapshot();
        self.emit(EngineEvent::MismatchCleared(token.pair));
        true
    }

    /// Back to an empty idle game. History is untouched.
    pub fn reset_game(&mut self) {
        self.generation += 1;
        self.clear_snapshot();
        self.state = GameState::new(self.state.difficulty(), self.state.seed(), Board::default());
        log::debug!("Game reset");
        self.emit(EngineEvent::Reset);
    }

    /// Resumes the saved game, if there is a readable one. Unreadable saves are logged and left alone.
    pub fn load_game_state(&mut self) -> bool {
        match self.persistence.load_snapshot() {
            Ok(Some(state)) => {
                self.restore(state);
                true
            }
            Ok(None) => false,
            Err(err) => {
                log::error!("Error loading game state: {}", err);
                false
            }
        }
    }

    /// Replaces the live game wholesale.
    pub fn restore(&mut self, state: GameState) {
        self.generation += 1;
        self.state = state;

        // A save taken between a mismatch and its clear has lost its timer.
        if let &[first, second] = self.state.flipped_indices() {
            if !self.state.board().is_pair(first, second) {
                self.schedule_clear([first, second]);
            }
        }

        log::debug!(
            "Restored {} game with seed {:?}",
            self.state.difficulty(),
            self.state.seed()
        );
        self.emit(EngineEvent::Restored);
    }

    /// Starts over on the board of a finished game.
    pub fn replay(&mut self, entry: &HistoryEntry) {
        self.reset_game();
        self.init_game(entry.difficulty, Some(&entry.seed));
        self.start_game();
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.save_history();
        self.emit(EngineEvent::HistoryCleared);
    }

    fn finish_game(&mut self) -> HistoryEntry {
        let now = self.state.end_time().unwrap_or_else(|| self.clock.now());
        let entry = self.history.record(&self.state, now);
        log::debug!(
            "Completed {} game in {} moves, {}s",
            entry.difficulty,
            entry.moves,
            entry.time
        );
        self.save_history();
        self.clear_snapshot();
        entry
    }

    fn schedule_clear(&mut self, pair: [usize; 2]) {
        let token = ClearToken {
            generation: self.generation,
            pair,
        };
        self.scheduler.schedule(self.config.mismatch_delay, token);
    }

    fn save_snapshot(&mut self) {
        if !self.state.lifecycle().is_playing() {
            return;
        }
        if let Err(err) = self.persistence.save_snapshot(&self.state) {
            log::error!("Could not save game to local storage: {}", err);
        }
    }

    fn clear_snapshot(&mut self) {
        if let Err(err) = self.persistence.clear_snapshot() {
            log::error!("Could not remove saved game: {}", err);
        }
    }

    fn save_history(&mut self) {
        if let Err(err) = self.persistence.save_history(&self.history) {
            log::error!("Could not save history to local storage: {}", err);
        }
    }

    fn emit(&mut self, event: EngineEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}
