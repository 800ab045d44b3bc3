use std::io::{self, BufRead, Write};

use broadside::{
    cli::{coord_to_string, parse_coord, parse_fleet, print_views},
    init_logging, Match, MatchConfig, MatchObserver, MoveResult, PlacementRules, Rejection,
    ShipPlacement, Side, DEFAULT_GRID_SIZE,
};
use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about = "Play Battleship against the computer", long_about = None)]
struct Cli {
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    size: usize,
    #[arg(long, help = "Comma separated ship lengths (e.g., --fleet 5,4,3,2,1)")]
    fleet: Option<String>,
    #[arg(long, help = "Keep ships from touching each other, diagonals included")]
    no_touching: bool,
}

struct ConsoleObserver;

impl MatchObserver for ConsoleObserver {
    fn on_ship_sunk(&mut self, attacker: Side, ship: &ShipPlacement) {
        match attacker {
            Side::Player => println!("You sank the enemy {}!", ship.ship_type().name()),
            Side::Opponent => println!("The enemy sank your {}!", ship.ship_type().name()),
        }
    }

    fn on_match_over(&mut self, winner: Side) {
        match winner {
            Side::Player => println!("All enemy ships destroyed. You win!"),
            Side::Opponent => println!("Your fleet is gone. You lose."),
        }
    }
}

fn describe(result: &MoveResult) -> String {
    match result {
        MoveResult::Rejected(Rejection::NotYourTurn) => "not your turn".to_string(),
        MoveResult::Rejected(Rejection::InvalidTarget { x, y }) => {
            format!("{} is not a valid target", coord_to_string(*x, *y))
        }
        MoveResult::Resolved { x, y, .. } => {
            let outcome = if result.ship_sunk() {
                "hit and sunk"
            } else if result.is_hit() {
                "hit"
            } else {
                "miss"
            };
            format!("{}: {}", coord_to_string(*x, *y), outcome)
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = MatchConfig::default()
        .with_grid_size(cli.size)
        .with_rules(PlacementRules {
            allow_touching: !cli.no_touching,
            ..PlacementRules::default()
        });
    if let Some(lengths) = &cli.fleet {
        config = config.with_fleet(parse_fleet(lengths).map_err(anyhow::Error::msg)?);
    }
    if config.grid_size > 26 {
        anyhow::bail!("grid size {} exceeds the 26 lettered columns", config.grid_size);
    }

    let rng = match cli.seed {
        Some(s) => {
            println!("Using fixed seed: {} (game will be reproducible)", s);
            SmallRng::seed_from_u64(s)
        }
        None => SmallRng::from_rng(&mut rand::rng()),
    };
    let mut game = Match::new(&config, rng)?;
    game.set_observer(Box::new(ConsoleObserver));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while !game.is_finished() {
        println!();
        print_views(&game.attack_grid_snapshot(), &game.defense_grid_snapshot());
        print!("Target (e.g. B3, q to quit): ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        if line.trim().eq_ignore_ascii_case("q") {
            break;
        }
        let Some((x, y)) = parse_coord(&line) else {
            println!("Could not read '{}', try a letter and a number.", line.trim());
            continue;
        };

        let report = game.submit_player_move(x, y);
        println!("You fire at {}", describe(&report.player_move));
        if let Some(reply) = &report.opponent_move {
            println!("Enemy fires at {}", describe(reply));
        }
    }

    if game.is_finished() {
        println!();
        print_views(&game.attack_grid_snapshot(), &game.defense_grid_snapshot());
    }
    Ok(())
}
