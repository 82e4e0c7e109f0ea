use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::engine::{self, FlagOutcome, RevealOutcome};
use crate::generator::{MineGenerator, RandomMineGenerator};
use crate::grid::Grid;
use crate::types::{CellCount, Coord2};
use crate::GameConfig;

/// Lifecycle phase of one game.
///
/// Valid transitions:
/// - Setup -> AwaitingFirstInput (`new_game`)
/// - AwaitingFirstInput -> InProgress (first `on_reveal` places the mines)
/// - InProgress -> Won | Lost
/// - any -> AwaitingFirstInput (`new_game`)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Freshly constructed, no game started yet.
    Setup,
    /// Grid exists but holds no mines; the first reveal can never lose.
    AwaitingFirstInput,
    InProgress,
    Won,
    Lost,
}

impl SessionState {
    /// Indicates the game has ended and no moves are accepted anymore.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Setup
    }
}

/// Orchestrates one grid across a game's lifecycle, routing reveal/flag
/// inputs through the engine and exposing a read-only snapshot.
///
/// Mine placement is deferred: `new_game` only builds an all-Empty grid, and
/// the generator runs synchronously inside the first `on_reveal` with that
/// reveal's coordinates as the safe origin. There is no suspended task, just
/// the `AwaitingFirstInput` gate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    config: GameConfig,
    grid: Grid,
    state: SessionState,
    seed: u64,
}

impl GameSession {
    /// Starts a session with a game already awaiting its first reveal.
    pub fn new(config: GameConfig) -> Self {
        let mut session = Self::default();
        session.new_game(config);
        session
    }

    /// Like [`Self::new`] but with a fixed generation seed, for reproducible
    /// boards.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        let mut session = Self::default();
        session.new_game_with_seed(config, seed);
        session
    }

    /// Discards any previous game and starts a fresh one. The grid and every
    /// cell are rebuilt; nothing survives across games.
    pub fn new_game(&mut self, config: GameConfig) {
        self.new_game_with_seed(config, rand::random());
    }

    pub fn new_game_with_seed(&mut self, config: GameConfig, seed: u64) {
        self.config = config;
        self.seed = seed;
        self.grid = Grid::new(config.width(), config.height());
        self.state = SessionState::AwaitingFirstInput;
        log::debug!(
            "New game: {}x{}, {} mines",
            config.width(),
            config.height(),
            config.mines()
        );
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    /// Handles a reveal input. On the first reveal of a game the mines are
    /// placed with `coords` as the safe origin before the reveal itself runs.
    pub fn on_reveal(&mut self, coords: Coord2) -> RevealOutcome {
        match self.state {
            SessionState::Setup | SessionState::Won | SessionState::Lost => {
                return RevealOutcome::NoChange;
            }
            SessionState::AwaitingFirstInput => {
                // boundary misses must not burn the safe-origin generation
                if !self.grid.in_bounds(coords) {
                    return RevealOutcome::NoChange;
                }
                let generator = RandomMineGenerator::new(self.seed, coords);
                if let Err(err) = generator.populate(&mut self.grid, self.config.mines()) {
                    // unreachable with a validated config
                    log::error!("Mine generation failed: {}", err);
                    return RevealOutcome::NoChange;
                }
                self.state = SessionState::InProgress;
            }
            SessionState::InProgress => {}
        }

        let outcome = engine::reveal(&mut self.grid, coords);
        match outcome {
            RevealOutcome::Exploded => self.state = SessionState::Lost,
            RevealOutcome::Won => self.state = SessionState::Won,
            RevealOutcome::Revealed | RevealOutcome::NoChange => {}
        }
        outcome
    }

    /// Handles a flag input; no-op unless a generated game is in progress.
    pub fn on_flag(&mut self, coords: Coord2) -> FlagOutcome {
        if self.state != SessionState::InProgress {
            return FlagOutcome::NoChange;
        }
        engine::flag(&mut self.grid, coords)
    }

    /// Read-only view for the presentation layer.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: &self.grid,
            config: self.config,
            state: self.state,
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        let config = GameConfig::default();
        Self {
            config,
            grid: Grid::new(config.width(), config.height()),
            state: SessionState::Setup,
            seed: 0,
        }
    }
}

/// Everything the presentation layer needs to draw a frame: per-cell state,
/// the session phase, and HUD counters.
#[derive(Copy, Clone, Debug)]
pub struct Snapshot<'a> {
    grid: &'a Grid,
    config: GameConfig,
    state: SessionState,
}

impl Snapshot<'_> {
    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.grid.cell_at(coords)
    }

    pub fn cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.grid.cells()
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines()
    }

    pub fn flag_count(&self) -> CellCount {
        self.grid.cells().filter(|(_, cell)| cell.flagged).count() as CellCount
    }

    /// How many mines have not been flagged yet; negative when overflagged.
    pub fn mines_left(&self) -> isize {
        (self.total_mines() as isize) - (self.flag_count() as isize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellKind;

    fn mine_coords(session: &GameSession) -> Vec<Coord2> {
        session
            .snapshot()
            .cells()
            .filter(|(_, cell)| cell.is_mine())
            .map(|(coords, _)| coords)
            .collect()
    }

    #[test]
    fn new_game_awaits_first_input_with_an_empty_grid() {
        let session = GameSession::new(GameConfig::beginner());
        assert_eq!(session.state(), SessionState::AwaitingFirstInput);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.size(), (9, 9));
        assert!(snapshot.cells().all(|(_, cell)| cell == Cell::default()));
        assert_eq!(snapshot.mines_left(), 10);
    }

    #[test]
    fn first_reveal_is_never_a_mine_and_places_all_mines() {
        for seed in 0..50 {
            let mut session = GameSession::with_seed(GameConfig::beginner(), seed);
            let outcome = session.on_reveal((4, 4));

            assert!(outcome.has_update(), "seed {seed}");
            assert_ne!(session.state(), SessionState::Lost, "seed {seed}");
            let origin = session.snapshot().cell_at((4, 4));
            assert!(origin.revealed && !origin.is_mine(), "seed {seed}");
            assert!(matches!(origin.kind, CellKind::Empty | CellKind::Number));
            assert_eq!(mine_coords(&session).len(), 10, "seed {seed}");
        }
    }

    #[test]
    fn reveal_before_any_game_is_a_no_op() {
        let mut session = GameSession::default();
        assert_eq!(session.state(), SessionState::Setup);
        assert_eq!(session.on_reveal((4, 4)), RevealOutcome::NoChange);
        assert_eq!(session.state(), SessionState::Setup);
    }

    #[test]
    fn out_of_bounds_first_reveal_does_not_generate() {
        let mut session = GameSession::with_seed(GameConfig::beginner(), 1);
        assert_eq!(session.on_reveal((9, 4)), RevealOutcome::NoChange);
        assert_eq!(session.state(), SessionState::AwaitingFirstInput);
        assert!(mine_coords(&session).is_empty());
    }

    #[test]
    fn flagging_before_generation_is_a_no_op() {
        let mut session = GameSession::with_seed(GameConfig::beginner(), 1);
        assert_eq!(session.on_flag((4, 4)), FlagOutcome::NoChange);
        assert!(!session.snapshot().cell_at((4, 4)).flagged);
    }

    /// First seed whose opening reveal leaves the game in progress (an
    /// opening flood can, rarely, clear the whole board outright).
    fn in_progress_session() -> GameSession {
        (0u64..)
            .map(|seed| {
                let mut session = GameSession::with_seed(GameConfig::beginner(), seed);
                session.on_reveal((4, 4));
                session
            })
            .find(|session| session.state() == SessionState::InProgress)
            .expect("some seed must leave the game in progress")
    }

    #[test]
    fn flag_count_feeds_the_mines_left_counter() {
        let mut session = in_progress_session();

        let targets: Vec<_> = session
            .snapshot()
            .cells()
            .filter(|(_, cell)| !cell.revealed)
            .map(|(coords, _)| coords)
            .take(2)
            .collect();
        for coords in targets {
            assert_eq!(session.on_flag(coords), FlagOutcome::Toggled);
        }
        assert_eq!(session.snapshot().mines_left(), 8);
    }

    #[test]
    fn revealing_a_mine_loses_and_freezes_the_session() {
        let mut session = in_progress_session();

        let mine = mine_coords(&session)[0];
        assert_eq!(session.on_reveal(mine), RevealOutcome::Exploded);
        assert_eq!(session.state(), SessionState::Lost);
        assert!(session
            .snapshot()
            .cells()
            .filter(|(_, cell)| cell.is_mine())
            .all(|(_, cell)| cell.revealed || cell.flagged));

        // terminal: nothing moves anymore
        let frozen = session.clone();
        assert_eq!(session.on_reveal((0, 0)), RevealOutcome::NoChange);
        assert_eq!(session.on_flag((0, 0)), FlagOutcome::NoChange);
        assert_eq!(session, frozen);
    }

    #[test]
    fn zero_mine_game_is_won_on_the_first_reveal() {
        let config = GameConfig::new(9, 9, 0).unwrap();
        let mut session = GameSession::with_seed(config, 2);

        assert_eq!(session.on_reveal((4, 4)), RevealOutcome::Won);
        assert_eq!(session.state(), SessionState::Won);
        assert!(session.snapshot().cells().all(|(_, cell)| cell.revealed));

        let frozen = session.clone();
        assert_eq!(session.on_reveal((0, 0)), RevealOutcome::NoChange);
        assert_eq!(session, frozen);
    }

    #[test]
    fn new_game_resets_a_finished_session() {
        let config = GameConfig::new(9, 9, 0).unwrap();
        let mut session = GameSession::with_seed(config, 2);
        session.on_reveal((4, 4));
        assert_eq!(session.state(), SessionState::Won);

        session.new_game_with_seed(GameConfig::beginner(), 3);
        assert_eq!(session.state(), SessionState::AwaitingFirstInput);
        let snapshot = session.snapshot();
        assert!(snapshot.cells().all(|(_, cell)| cell == Cell::default()));
    }

    #[test]
    fn session_round_trips_through_serde() {
        let mut session = GameSession::with_seed(GameConfig::intermediate(), 99);
        session.on_reveal((8, 8));
        session.on_flag((0, 0));

        let json = serde_json::to_string(&session).unwrap();
        let restored: GameSession = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
    }
}
