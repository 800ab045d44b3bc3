use anyhow::Context;
use broadside::{cli::parse_fleet, init_logging, Match, MatchConfig, OpponentPolicy, RandomPolicy, Side};
use clap::Parser;
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

/// Play a seeded match with random targeting on both sides and print a JSON summary.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for fleet placement and the automated opponent.
    seed: u64,
    /// Seed for the simulated player's targeting (defaults to seed + 1).
    player_seed: Option<u64>,
    #[arg(long, default_value_t = broadside::DEFAULT_GRID_SIZE)]
    size: usize,
    /// Comma separated ship lengths, e.g. 5,4,3,2,1.
    #[arg(long)]
    fleet: Option<String>,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = MatchConfig::default().with_grid_size(args.size);
    if let Some(lengths) = &args.fleet {
        config = config.with_fleet(parse_fleet(lengths).map_err(anyhow::Error::msg)?);
    }

    let mut game = Match::new(&config, SmallRng::seed_from_u64(args.seed))?;
    let mut player_rng = SmallRng::seed_from_u64(args.player_seed.unwrap_or(args.seed.wrapping_add(1)));
    let mut player = RandomPolicy::new();

    let mut rounds = 0usize;
    while !game.is_finished() {
        let (x, y) = player
            .select_target(&mut player_rng, game.opponent_view())
            .context("no target left on an unfinished match")?;
        let report = game.submit_player_move(x, y);
        if let Some(result) = report.player_move.guess_result() {
            player.handle_guess_result((x, y), result);
        }
        rounds += 1;
    }

    let shots = |side: Side| game.history().iter().filter(|(s, _)| *s == side).count();
    let winner = match game.winner() {
        Some(Side::Player) => "player",
        Some(Side::Opponent) => "opponent",
        None => "none",
    };
    let result = json!({
        "seed": args.seed,
        "grid_size": config.grid_size,
        "rounds": rounds,
        "player": {"shots": shots(Side::Player), "ships_remaining": game.player_ships_remaining()},
        "opponent": {"shots": shots(Side::Opponent), "ships_remaining": game.opponent_ships_remaining()},
        "winner": winner,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
