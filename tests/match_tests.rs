use std::cell::RefCell;
use std::rc::Rc;

use broadside::{
    AttackView, Board, GuessResult, Match, MatchConfig, MatchObserver, MoveResult, OpponentPolicy,
    Orientation, RandomPolicy, Rejection, SetupError, ShipPlacement, ShipType, Side, Turn,
    BoardError,
};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

/// Opponent that fires at a fixed list of cells in order.
struct Scripted(Vec<(usize, usize)>);

impl OpponentPolicy for Scripted {
    fn select_target(&mut self, _rng: &mut dyn RngCore, view: AttackView<'_>) -> Option<(usize, usize)> {
        while !self.0.is_empty() {
            let next = self.0.remove(0);
            if view.is_valid_target(next.0, next.1) {
                return Some(next);
            }
        }
        view.valid_targets().next()
    }
}

fn board(id: u32, len: usize, x: usize, y: usize) -> Board {
    Board::new(
        8,
        vec![ShipPlacement::new(id, ShipType::new("Test", len), x, y, Orientation::Horizontal)],
    )
    .unwrap()
}

fn scripted_match(player: Board, opponent: Board, script: Vec<(usize, usize)>) -> Match {
    Match::from_boards(player, opponent, SmallRng::seed_from_u64(5), Box::new(Scripted(script)))
}

#[test]
fn test_single_shot_win() {
    let mut game = Match::from_boards(
        board(1000, 1, 0, 0),
        board(1001, 1, 0, 0),
        SmallRng::seed_from_u64(1),
        Box::new(RandomPolicy::new()),
    );
    let report = game.submit_player_move(0, 0);
    assert!(report.player_move.is_hit());
    assert_eq!(report.player_move.ship_id(), Some(1001));
    assert!(report.player_move.ship_sunk());
    assert!(report.match_over);
    assert_eq!(report.winner, Some(Side::Player));
    assert_eq!(report.opponent_move, None);
    assert_eq!(game.turn(), Turn::Finished);
    assert_eq!(game.winner(), Some(Side::Player));
}

#[test]
fn test_miss_triggers_opponent_reply() {
    let mut game = Match::from_boards(
        board(1000, 2, 0, 0),
        board(1001, 1, 0, 0),
        SmallRng::seed_from_u64(2),
        Box::new(RandomPolicy::new()),
    );
    let report = game.submit_player_move(5, 5);
    assert!(!report.player_move.is_hit());
    assert_eq!(report.player_move.guess_result(), Some(GuessResult::Miss));
    assert!(!report.match_over);
    assert_eq!(report.winner, None);
    let reply = report.opponent_move.expect("opponent should reply");
    assert!(!reply.is_rejected());
    assert_eq!(game.turn(), Turn::PlayerTurn);
    assert_eq!(game.history().len(), 2);
    assert_eq!(game.history()[0], (Side::Player, report.player_move));
    assert_eq!(game.history()[1], (Side::Opponent, reply));
}

#[test]
fn test_repeated_target_is_a_no_op() {
    let mut game = scripted_match(board(1000, 2, 0, 0), board(1001, 1, 0, 0), vec![(7, 7)]);
    game.submit_player_move(5, 5);
    let attack = game.attack_grid_snapshot();
    let defense = game.defense_grid_snapshot();
    let history = game.history().len();

    let report = game.submit_player_move(5, 5);
    assert_eq!(
        report.player_move,
        MoveResult::Rejected(Rejection::InvalidTarget { x: 5, y: 5 })
    );
    assert_eq!(report.opponent_move, None);
    assert!(!report.match_over);
    assert_eq!(game.attack_grid_snapshot(), attack);
    assert_eq!(game.defense_grid_snapshot(), defense);
    assert_eq!(game.history().len(), history);
    assert_eq!(game.turn(), Turn::PlayerTurn);
}

#[test]
fn test_out_of_bounds_target_is_a_no_op() {
    let mut game = scripted_match(board(1000, 2, 0, 0), board(1001, 1, 0, 0), vec![]);
    let report = game.submit_player_move(8, 1);
    assert_eq!(
        report.player_move,
        MoveResult::Rejected(Rejection::InvalidTarget { x: 8, y: 1 })
    );
    assert!(game.history().is_empty());
}

#[test]
fn test_opponent_can_win() {
    let mut game = scripted_match(board(1000, 1, 3, 3), board(1001, 2, 0, 0), vec![(3, 3)]);
    let report = game.submit_player_move(6, 6);
    let reply = report.opponent_move.unwrap();
    assert_eq!(reply.target(), Some((3, 3)));
    assert!(reply.ship_sunk());
    assert!(report.match_over);
    assert_eq!(report.winner, Some(Side::Opponent));

    let after = game.submit_player_move(0, 0);
    assert_eq!(after.player_move, MoveResult::Rejected(Rejection::NotYourTurn));
    assert!(after.match_over);
    assert_eq!(after.winner, Some(Side::Opponent));
    assert_eq!(game.opponent_ships_remaining(), 1);
    assert_eq!(game.player_ships_remaining(), 0);
}

#[test]
fn test_opponent_move_is_gated_by_turn() {
    let mut game = scripted_match(board(1000, 2, 0, 0), board(1001, 2, 0, 0), vec![]);
    assert_eq!(
        game.run_opponent_move(),
        MoveResult::Rejected(Rejection::NotYourTurn)
    );
    assert!(game.history().is_empty());
    assert_eq!(game.turn(), Turn::PlayerTurn);
}

#[test]
fn test_attack_snapshot_hides_enemy_fleet() {
    let mut game = scripted_match(board(1000, 2, 0, 0), board(1001, 3, 2, 4), vec![(7, 7)]);
    game.submit_player_move(2, 4);
    let attack = game.attack_grid_snapshot();
    assert_eq!(attack.get(2, 4).unwrap().ship, Some(true));
    assert_eq!(attack.get(3, 4).unwrap().ship, None);
    assert_eq!(attack.get(4, 4).unwrap().ship, None);

    let defense = game.defense_grid_snapshot();
    assert_eq!(defense.get(1, 0).unwrap().ship, Some(true));
    assert!(defense.get(7, 7).unwrap().attacked);
    assert_eq!(game.opponent_view().ships_remaining(), 1);
}

#[derive(Default)]
struct Recorder(Rc<RefCell<Vec<String>>>);

impl MatchObserver for Recorder {
    fn on_shot(&mut self, attacker: Side, shot: &MoveResult) {
        self.0.borrow_mut().push(format!("{:?} {:?}", attacker, shot.target()));
    }

    fn on_ship_sunk(&mut self, attacker: Side, ship: &ShipPlacement) {
        self.0.borrow_mut().push(format!("{:?} sank {}", attacker, ship.id()));
    }

    fn on_match_over(&mut self, winner: Side) {
        self.0.borrow_mut().push(format!("{:?} wins", winner));
    }
}

#[test]
fn test_observer_receives_events() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let mut game = scripted_match(board(1000, 2, 0, 0), board(1001, 1, 4, 4), vec![(7, 7)]);
    game.set_observer(Box::new(Recorder(events.clone())));

    game.submit_player_move(1, 1);
    game.submit_player_move(4, 4);

    assert_eq!(
        *events.borrow(),
        vec![
            "Player Some((1, 1))".to_string(),
            "Opponent Some((7, 7))".to_string(),
            "Player Some((4, 4))".to_string(),
            "Player sank 1001".to_string(),
            "Player wins".to_string(),
        ]
    );
}

#[test]
fn test_new_match_places_both_fleets() {
    let config = MatchConfig::default();
    let game = Match::new(&config, SmallRng::seed_from_u64(11)).unwrap();
    assert_eq!(game.turn(), Turn::PlayerTurn);
    assert_eq!(game.player_ships_remaining(), 5);
    assert_eq!(game.opponent_ships_remaining(), 5);
    let ids: Vec<_> = game.player_board().placements().iter().map(|p| p.id()).collect();
    assert_eq!(ids, vec![1000, 1001, 1002, 1003, 1004]);
    let occupied = game
        .defense_grid_snapshot()
        .rows()
        .flatten()
        .filter(|c| c.ship == Some(true))
        .count();
    assert_eq!(occupied, 15);
    assert!(game
        .attack_grid_snapshot()
        .rows()
        .flatten()
        .all(|c| c.ship.is_none()));
}

#[test]
fn test_invalid_config_is_rejected() {
    let err = Match::new(&MatchConfig::default().with_grid_size(0), SmallRng::seed_from_u64(1))
        .err()
        .unwrap();
    assert_eq!(err, SetupError::InvalidPlacement(BoardError::InvalidGridSize));

    let config = MatchConfig::default().with_fleet(vec![ShipType::new("ok", 2), ShipType::new("bad", 0)]);
    let err = Match::new(&config, SmallRng::seed_from_u64(1)).err().unwrap();
    assert_eq!(
        err,
        SetupError::InvalidPlacement(BoardError::EmptyShip { ship_id: 1001 })
    );
}

#[test]
fn test_empty_fleet_is_rejected() {
    let config = MatchConfig::default().with_fleet(Vec::new());
    let err = Match::new(&config, SmallRng::seed_from_u64(1)).err().unwrap();
    assert_eq!(err, SetupError::InvalidPlacement(BoardError::EmptyFleet));
}

#[test]
fn test_clicks_map_to_each_sides_grid() {
    let game = Match::new(&MatchConfig::default(), SmallRng::seed_from_u64(4)).unwrap();
    assert_eq!(game.opponent_view().pixel_to_grid_cell(575.0, 195.0), Some((0, 0)));
    assert_eq!(game.opponent_view().grid_cell_to_pixel(1, 2), (600.0, 270.0));
    assert_eq!(game.player_board().pixel_to_grid_cell(75.0, 195.0), Some((0, 0)));
    // Left of the attack grid is the player's own grid, not a target.
    assert_eq!(game.opponent_view().pixel_to_grid_cell(75.0, 195.0), None);
}

#[test]
fn test_with_policy_replaces_opponent_targeting() {
    let player = board(1, 2, 0, 0);
    let opponent = board(2, 2, 0, 0);
    let mut game = Match::from_boards(
        player,
        opponent,
        SmallRng::seed_from_u64(9),
        Box::new(RandomPolicy::new()),
    )
    .with_policy(Box::new(Scripted(vec![(7, 7), (6, 6)])));

    let first = game.submit_player_move(5, 5);
    assert_eq!(first.opponent_move.and_then(|m| m.target()), Some((7, 7)));
    let second = game.submit_player_move(5, 6);
    assert_eq!(second.opponent_move.and_then(|m| m.target()), Some((6, 6)));
}
