//! Match coordination: turn order, attack resolution and the winner.

use alloc::boxed::Box;
use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::board::{AttackView, Board, GridSnapshot};
use crate::common::{GuessResult, SetupError};
use crate::config::MatchConfig;
use crate::placement::random_fleet;
use crate::policy::{OpponentPolicy, RandomPolicy};
use crate::ship::{ShipIds, ShipPlacement};

/// One of the two parties of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Opponent,
}

/// Who may move next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Turn {
    PlayerTurn,
    OpponentTurn,
    Finished,
}

/// Why a move was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Rejection {
    /// The submitting side is not entitled to move.
    NotYourTurn,
    /// The cell is off the grid or was attacked before.
    InvalidTarget { x: usize, y: usize },
}

/// Outcome of one submitted move. A rejected move changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveResult {
    Rejected(Rejection),
    Resolved { x: usize, y: usize, result: GuessResult },
}

impl MoveResult {
    pub fn is_rejected(&self) -> bool {
        matches!(self, MoveResult::Rejected(_))
    }

    pub fn target(&self) -> Option<(usize, usize)> {
        match *self {
            MoveResult::Resolved { x, y, .. } => Some((x, y)),
            MoveResult::Rejected(_) => None,
        }
    }

    pub fn guess_result(&self) -> Option<GuessResult> {
        match *self {
            MoveResult::Resolved { result, .. } => Some(result),
            MoveResult::Rejected(_) => None,
        }
    }

    pub fn is_hit(&self) -> bool {
        self.guess_result().is_some_and(|r| r.is_hit())
    }

    pub fn ship_id(&self) -> Option<crate::ship::ShipId> {
        self.guess_result().and_then(|r| r.ship_id())
    }

    pub fn ship_sunk(&self) -> bool {
        self.guess_result().is_some_and(|r| r.is_sink())
    }
}

/// Everything that happened in response to one player submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub player_move: MoveResult,
    /// The automated reply, present when the player's move did not end the match.
    pub opponent_move: Option<MoveResult>,
    pub match_over: bool,
    pub winner: Option<Side>,
}

/// Notification hooks for presenters. All methods default to no-ops.
pub trait MatchObserver {
    /// A move by `attacker` was resolved.
    fn on_shot(&mut self, _attacker: Side, _shot: &MoveResult) {}

    /// `attacker` sank `ship`.
    fn on_ship_sunk(&mut self, _attacker: Side, _ship: &ShipPlacement) {}

    fn on_match_over(&mut self, _winner: Side) {}
}

/// A single game: one board per side, attacked by the other side.
pub struct Match<R: Rng = SmallRng> {
    player_board: Board,
    opponent_board: Board,
    turn: Turn,
    winner: Option<Side>,
    rng: R,
    policy: Box<dyn OpponentPolicy>,
    observer: Option<Box<dyn MatchObserver>>,
    history: Vec<(Side, MoveResult)>,
}

impl<R: Rng> Match<R> {
    /// Place both fleets at random and start with the player to move.
    pub fn new(config: &MatchConfig, mut rng: R) -> Result<Self, SetupError> {
        config.validate()?;
        let mut ids = ShipIds::new();
        let player = random_fleet(&mut rng, config.grid_size, &config.fleet, &mut ids, &config.rules)?;
        let opponent = random_fleet(&mut rng, config.grid_size, &config.fleet, &mut ids, &config.rules)?;
        let player_board = Board::new(config.grid_size, player)?.with_layout(config.player_layout);
        let opponent_board = Board::new(config.grid_size, opponent)?.with_layout(config.opponent_layout);
        log::info!(
            "new match on a {0}x{0} grid with {1} ships per side",
            config.grid_size,
            config.fleet.len()
        );
        Ok(Self::from_boards(
            player_board,
            opponent_board,
            rng,
            Box::new(RandomPolicy::new()),
        ))
    }

    /// Start a match over boards placed by the caller.
    pub fn from_boards(
        player_board: Board,
        opponent_board: Board,
        rng: R,
        policy: Box<dyn OpponentPolicy>,
    ) -> Self {
        Self {
            player_board,
            opponent_board,
            turn: Turn::PlayerTurn,
            winner: None,
            rng,
            policy,
            observer: None,
            history: Vec::new(),
        }
    }

    /// Replace the automated side's targeting strategy.
    pub fn with_policy(mut self, policy: Box<dyn OpponentPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn set_observer(&mut self, observer: Box<dyn MatchObserver>) {
        self.observer = Some(observer);
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn is_finished(&self) -> bool {
        self.turn == Turn::Finished
    }

    /// Resolved moves in the order they happened.
    pub fn history(&self) -> &[(Side, MoveResult)] {
        &self.history
    }

    /// The player's own board, fully visible to its owner.
    pub fn player_board(&self) -> &Board {
        &self.player_board
    }

    /// The opponent's board as the player may see it.
    pub fn opponent_view(&self) -> AttackView<'_> {
        self.opponent_board.attack_view()
    }

    /// Player's knowledge of the opponent grid.
    pub fn attack_grid_snapshot(&self) -> GridSnapshot {
        self.opponent_board.attack_view().snapshot()
    }

    /// Player's own grid including unattacked ships.
    pub fn defense_grid_snapshot(&self) -> GridSnapshot {
        self.player_board.defense_snapshot()
    }

    pub fn opponent_ships_remaining(&self) -> usize {
        self.opponent_board.remaining_ship_ids().len()
    }

    pub fn player_ships_remaining(&self) -> usize {
        self.player_board.remaining_ship_ids().len()
    }

    /// Attack (`x`, `y`) on the opponent's board. Unless that ends the
    /// match, the opponent replies before this returns.
    pub fn submit_player_move(&mut self, x: usize, y: usize) -> TurnReport {
        let player_move = if self.turn != Turn::PlayerTurn {
            log::warn!("player move ({}, {}) rejected: not the player's turn", x, y);
            MoveResult::Rejected(Rejection::NotYourTurn)
        } else if !self.opponent_board.is_valid_target(x, y) {
            log::warn!("player move ({}, {}) rejected: invalid target", x, y);
            MoveResult::Rejected(Rejection::InvalidTarget { x, y })
        } else {
            self.attack(Side::Player, x, y)
        };

        let opponent_move = if !player_move.is_rejected() && self.turn == Turn::OpponentTurn {
            Some(self.run_opponent_move())
        } else {
            None
        };

        TurnReport {
            player_move,
            opponent_move,
            match_over: self.is_finished(),
            winner: self.winner,
        }
    }

    /// Let the automated side attack the player's board.
    ///
    /// # Panics
    ///
    /// If the policy yields no target or an invalid one while the match is
    /// still running.
    pub fn run_opponent_move(&mut self) -> MoveResult {
        if self.turn != Turn::OpponentTurn {
            return MoveResult::Rejected(Rejection::NotYourTurn);
        }
        let target = self
            .policy
            .select_target(&mut self.rng, self.player_board.attack_view());
        let (x, y) = match target {
            Some((x, y)) if self.player_board.is_valid_target(x, y) => (x, y),
            other => panic!("opponent policy returned {:?} on an unfinished match", other),
        };
        let shot = self.attack(Side::Opponent, x, y);
        if let Some(result) = shot.guess_result() {
            self.policy.handle_guess_result((x, y), result);
        }
        shot
    }

    /// Resolve a validated attack by `attacker` and advance the turn.
    fn attack(&mut self, attacker: Side, x: usize, y: usize) -> MoveResult {
        let board = match attacker {
            Side::Player => &mut self.opponent_board,
            Side::Opponent => &mut self.player_board,
        };
        let result = board.guess(x, y);
        let sunk = match result {
            GuessResult::Sink(id) => board.placement(id).cloned(),
            _ => None,
        };
        let defeated = board.all_ships_sunk();
        log::debug!("{:?} attacks ({}, {}): {:?}", attacker, x, y, result);

        let shot = MoveResult::Resolved { x, y, result };
        self.history.push((attacker, shot));
        if let Some(observer) = self.observer.as_mut() {
            observer.on_shot(attacker, &shot);
        }
        if let Some(ship) = sunk {
            log::info!("{:?} sank {} #{}", attacker, ship.ship_type().name(), ship.id());
            if let Some(observer) = self.observer.as_mut() {
                observer.on_ship_sunk(attacker, &ship);
            }
        }

        if defeated {
            self.turn = Turn::Finished;
            self.winner = Some(attacker);
            log::info!("match over, {:?} wins", attacker);
            if let Some(observer) = self.observer.as_mut() {
                observer.on_match_over(attacker);
            }
        } else {
            self.turn = match attacker {
                Side::Player => Turn::OpponentTurn,
                Side::Opponent => Turn::PlayerTurn,
            };
        }
        shot
    }
}
