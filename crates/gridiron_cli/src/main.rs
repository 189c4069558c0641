//! Gridiron CLI
//!
//! Runs the simulation engine from the command line:
//! - `simulate`: one game, play-by-play and box score
//! - `montecarlo`: many seeds, aggregate scoring distribution

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use gridiron_core::models::{
    EquippedTrait, Player, PlayerAttributes, Position, SimTeam, TraitId, TraitSlots,
};
use gridiron_core::{GameSettings, GameSimulator, GameType, TeamSide, Weather};

#[derive(Parser)]
#[command(name = "gridiron")]
#[command(about = "American football game simulation harness", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one game and print the play-by-play plus box score
    Simulate {
        /// Home team JSON file (built-in demo team when omitted)
        #[arg(long)]
        home: Option<PathBuf>,

        /// Away team JSON file (built-in demo team when omitted)
        #[arg(long)]
        away: Option<PathBuf>,

        #[arg(long, default_value = "42")]
        seed: u64,

        /// clear | wind | rain | snow
        #[arg(long, default_value = "clear")]
        weather: String,

        /// regular | prime_time | playoff | championship
        #[arg(long, default_value = "regular")]
        game_type: String,

        /// Print every play, not just scoring plays
        #[arg(long, default_value = "false")]
        full_log: bool,
    },

    /// Simulate many games and report the scoring distribution
    Montecarlo {
        #[arg(long, default_value = "1000")]
        games: u64,

        #[arg(long, default_value = "0")]
        seed_start: u64,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            home,
            away,
            seed,
            weather,
            game_type,
            full_log,
        } => simulate(home, away, seed, &weather, &game_type, full_log),
        Commands::Montecarlo { games, seed_start } => montecarlo(games, seed_start),
    }
}

fn load_team(path: Option<PathBuf>, fallback: fn() -> SimTeam) -> Result<SimTeam> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading team file {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing team file {}", path.display()))
        }
        None => Ok(fallback()),
    }
}

fn parse_settings(weather: &str, game_type: &str) -> Result<GameSettings> {
    let weather = match weather {
        "clear" => Weather::Clear,
        "wind" => Weather::Wind,
        "rain" => Weather::Rain,
        "snow" => Weather::Snow,
        other => anyhow::bail!("unknown weather '{}'", other),
    };
    let game_type = match game_type {
        "regular" => GameType::Regular,
        "prime_time" => GameType::PrimeTime,
        "playoff" => GameType::Playoff,
        "championship" => GameType::Championship,
        other => anyhow::bail!("unknown game type '{}'", other),
    };
    Ok(GameSettings {
        game_type,
        weather,
        ..Default::default()
    })
}

fn simulate(
    home: Option<PathBuf>,
    away: Option<PathBuf>,
    seed: u64,
    weather: &str,
    game_type: &str,
    full_log: bool,
) -> Result<()> {
    let settings = parse_settings(weather, game_type)?;
    let home = load_team(home, demo_home)?;
    let away = load_team(away, demo_away)?;
    let (home_name, away_name) = (home.name.clone(), away.name.clone());

    let mut sim = GameSimulator::new(settings, seed);
    sim.set_teams(home, away)?;
    sim.initialize_game_modifiers()?;
    let plays = sim.simulate_game()?;

    println!("{} at {} (seed {})", away_name, home_name, seed);
    println!("{}", "-".repeat(60));

    for play in &plays {
        let interesting = play.points > 0 || !play.triggered_effects.is_empty();
        if full_log || interesting {
            let clock = format!("Q{} {:02}:{:02}", play.snap.quarter, play.snap.clock / 60, play.snap.clock % 60);
            println!("[{}] {}", clock, play.description);
            for effect in &play.triggered_effects {
                println!("         * {}", effect.description);
            }
        }
    }

    let result = sim
        .game_result()
        .context("game did not reach a terminal state")?;

    println!("{}", "-".repeat(60));
    let overtime = if result.went_to_overtime { " (OT)" } else { "" };
    println!(
        "FINAL{}: {} {} - {} {}",
        overtime, home_name, result.home_score, result.away_score, away_name
    );
    println!();
    print_box_score(&result, &home_name, &away_name);
    Ok(())
}

fn print_box_score(result: &gridiron_core::GameResult, home_name: &str, away_name: &str) {
    println!("{:<24}{:>12}{:>12}", "", home_name, away_name);
    let rows: &[(&str, i64, i64)] = &[
        (
            "Total yards",
            result.statistics.home.total_yards as i64,
            result.statistics.away.total_yards as i64,
        ),
        (
            "Passing yards",
            result.statistics.home.pass_yards as i64,
            result.statistics.away.pass_yards as i64,
        ),
        (
            "Rushing yards",
            result.statistics.home.rush_yards as i64,
            result.statistics.away.rush_yards as i64,
        ),
        (
            "First downs",
            result.statistics.home.first_downs as i64,
            result.statistics.away.first_downs as i64,
        ),
        (
            "Turnovers",
            result.statistics.home.turnovers as i64,
            result.statistics.away.turnovers as i64,
        ),
        (
            "Penalty yards",
            result.statistics.home.penalty_yards as i64,
            result.statistics.away.penalty_yards as i64,
        ),
        (
            "Possession (s)",
            result.statistics.home.time_of_possession_secs as i64,
            result.statistics.away.time_of_possession_secs as i64,
        ),
    ];
    for (label, home_value, away_value) in rows {
        println!("{:<24}{:>12}{:>12}", label, home_value, away_value);
    }

    // Leading performers
    let mut lines: Vec<_> = result.statistics.players.values().collect();
    lines.sort_by_key(|line| {
        -(line.pass_yards + line.rush_yards + line.receiving_yards) as i64
    });
    println!();
    println!("Top performers:");
    for line in lines.iter().take(5) {
        println!(
            "  {:<20} pass {:>4}  rush {:>4}  rec {:>4}",
            line.player_name, line.pass_yards, line.rush_yards, line.receiving_yards
        );
    }
}

fn montecarlo(games: u64, seed_start: u64) -> Result<()> {
    let mut home_wins = 0u64;
    let mut away_wins = 0u64;
    let mut ties = 0u64;
    let mut overtimes = 0u64;
    let mut total_points = 0u64;
    let mut min_total = u32::MAX;
    let mut max_total = 0u32;

    for i in 0..games {
        let mut sim = GameSimulator::new(GameSettings::default(), seed_start + i);
        sim.set_teams(demo_home(), demo_away())?;
        sim.initialize_game_modifiers()?;
        sim.simulate_game()?;
        let result = sim
            .game_result()
            .context("game did not reach a terminal state")?;

        match result.winner {
            Some(TeamSide::Home) => home_wins += 1,
            Some(TeamSide::Away) => away_wins += 1,
            None => ties += 1,
        }
        if result.went_to_overtime {
            overtimes += 1;
        }
        let combined = result.home_score + result.away_score;
        total_points += combined as u64;
        min_total = min_total.min(combined);
        max_total = max_total.max(combined);
    }

    println!("Games:          {}", games);
    println!("Home wins:      {}", home_wins);
    println!("Away wins:      {}", away_wins);
    println!("Ties:           {}", ties);
    println!("Overtime games: {}", overtimes);
    println!(
        "Combined score: avg {:.1}, min {}, max {}",
        total_points as f64 / games as f64,
        min_total,
        max_total
    );
    Ok(())
}

// ============================================================================
// Demo rosters
// ============================================================================

fn demo_player(
    id: &str,
    name: &str,
    position: Position,
    overall: u8,
    traits: &[EquippedTrait],
) -> Player {
    Player {
        id: id.to_string(),
        name: name.to_string(),
        position,
        overall,
        attributes: Some(PlayerAttributes::flat(overall)),
        traits: TraitSlots::from_traits(traits),
    }
}

fn demo_roster(prefix: &str, base: u8, star_traits: &[EquippedTrait]) -> Vec<Player> {
    let mut players = vec![demo_player(
        &format!("{}-qb1", prefix),
        &format!("{} QB One", prefix.to_uppercase()),
        Position::QB,
        base + 6,
        star_traits,
    )];
    let groups: &[(Position, usize, i16)] = &[
        (Position::RB, 2, 2),
        (Position::WR, 3, 3),
        (Position::TE, 1, 0),
        (Position::OL, 3, -1),
        (Position::DL, 3, 1),
        (Position::LB, 3, 0),
        (Position::CB, 2, 2),
        (Position::S, 2, 0),
        (Position::K, 1, -2),
        (Position::P, 1, -4),
    ];
    for (position, count, delta) in groups {
        for i in 0..*count {
            let overall = (base as i16 + delta - i as i16 * 4).clamp(40, 99) as u8;
            players.push(demo_player(
                &format!("{}-{}{}", prefix, position.code().to_lowercase(), i + 1),
                &format!("{} {} {}", prefix.to_uppercase(), position.code(), i + 1),
                *position,
                overall,
                &[],
            ));
        }
    }
    players
}

fn demo_home() -> SimTeam {
    SimTeam {
        id: "cap".into(),
        name: "Capital Condors".into(),
        abbreviation: "CAP".into(),
        players: demo_roster(
            "cap",
            76,
            &[
                EquippedTrait::gold(TraitId::IceVeins),
                EquippedTrait::silver(TraitId::Cannon),
            ],
        ),
        coaching: Default::default(),
        facilities: Default::default(),
    }
}

fn demo_away() -> SimTeam {
    SimTeam {
        id: "hbr".into(),
        name: "Harbor Krakens".into(),
        abbreviation: "HBR".into(),
        players: demo_roster(
            "hbr",
            74,
            &[
                EquippedTrait::silver(TraitId::Surgeon),
                EquippedTrait::bronze(TraitId::FieldGeneral),
            ],
        ),
        coaching: Default::default(),
        facilities: Default::default(),
    }
}
