use clap::Parser;
use holdem_engine::agents::{AgentTable, Difficulty, Intent};
use holdem_engine::cards::{Card, DealtCard};
use holdem_engine::config::{ShowdownRule, TableConfig};
use holdem_engine::game::{Game, RoundError};
use holdem_engine::snapshot::GameSnapshot;
use std::error::Error;
use std::io::{self, BufRead, Write};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Play single-table Texas Hold'em against heuristic bots.
#[derive(Debug, Parser)]
#[command(name = "holdem", version, about)]
struct Args {
    /// Seats at the table
    #[arg(short, long, default_value_t = 4)]
    players: usize,
    /// Starting stack per seat
    #[arg(short, long, default_value_t = 1000)]
    chips: u64,
    /// Small blind; the big blind is twice this unless set
    #[arg(long, default_value_t = 5)]
    small_blind: u64,
    #[arg(long)]
    big_blind: Option<u64>,
    /// Rounds to play before stopping
    #[arg(short, long, default_value_t = 10)]
    rounds: usize,
    /// Seed for shuffles and bot decisions
    #[arg(short, long)]
    seed: Option<u64>,
    /// Bot difficulty: easy, medium or hard
    #[arg(short, long, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,
    /// Take seat 1 yourself and enter actions on stdin
    #[arg(short, long)]
    interactive: bool,
    /// Break category ties on kickers instead of splitting the pot
    #[arg(long)]
    full_rank: bool,
}

impl Args {
    fn table_config(&self) -> TableConfig {
        let mut cfg = TableConfig::default()
            .with_players(self.players)
            .with_starting_chips(self.chips)
            .with_blinds(self.small_blind, self.big_blind.unwrap_or(self.small_blind * 2))
            .with_human_seat(self.interactive.then_some(0))
            .with_difficulty(self.difficulty);
        if let Some(seed) = self.seed {
            cfg = cfg.with_seed(seed);
        }
        if self.full_rank {
            cfg = cfg.with_showdown(ShowdownRule::FullRank);
        }
        cfg
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut game = Game::new(args.table_config())?;
    let mut table = AgentTable::for_config(game.config());
    info!(
        version = holdem_engine::VERSION,
        players = args.players,
        difficulty = %game.config().difficulty,
        ?table,
        "table ready"
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    for round in 1..=args.rounds {
        match game.start_new_round() {
            Ok(_) => {}
            Err(RoundError::NotEnoughPlayers(n)) => {
                info!(players_left = n, "not enough funded players, stopping");
                break;
            }
            Err(e) => return Err(e.into()),
        }
        writeln!(out, "=== Round {round} (dealer: seat {}) ===", game.dealer() + 1)?;

        loop {
            table.run_until_blocked(&mut game, 10_000)?;
            let snap = game.snapshot();
            let Some(seat) = snap.current.filter(|_| !snap.round_over()) else {
                break;
            };
            print_turn(&mut out, &snap, seat)?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 || matches!(line.trim(), "q" | "quit") {
                writeln!(out, "Bye.")?;
                return Ok(());
            }
            match line.parse::<Intent>() {
                Ok(intent) => {
                    table.receive(seat, intent);
                    if let Err(e) = table.on_turn(&mut game) {
                        writeln!(out, "Not allowed: {e}")?;
                    }
                }
                Err(e) => writeln!(out, "{e}. Try: fold, check, call, bet 20, raise 40")?,
            }
        }
        print_result(&mut out, &game.snapshot())?;
    }
    Ok(())
}

fn print_turn(out: &mut impl Write, snap: &GameSnapshot, seat: usize) -> io::Result<()> {
    let me = &snap.players[seat];
    let legal: Vec<String> = snap.legal_actions(seat).iter().map(ToString::to_string).collect();
    writeln!(
        out,
        "[{}] board: {}  pot: {}  in hand: {}",
        snap.stage,
        show_cards(&snap.community),
        snap.total_pot(),
        snap.active_players()
    )?;
    writeln!(
        out,
        "{}: {}  chips: {}  to call: {}  min raise: {}",
        me.name,
        show_hole(&me.hole_cards),
        me.chips,
        snap.to_call(seat),
        snap.min_raise_amount(seat)
    )?;
    write!(out, "{} > ", legal.join("/"))?;
    out.flush()
}

fn print_result(out: &mut impl Write, snap: &GameSnapshot) -> io::Result<()> {
    if !snap.community.is_empty() {
        writeln!(out, "Board: {}", show_cards(&snap.community))?;
    }
    if snap.winners.is_empty() {
        warn!("round ended without a winner");
    }
    for &w in &snap.winners {
        let p = &snap.players[w];
        match &p.hand_description {
            Some(desc) => writeln!(out, "{} wins with {desc}", p.name)?,
            None => writeln!(out, "{} wins uncontested", p.name)?,
        }
    }
    for p in &snap.players {
        writeln!(out, "  {:<10} {:>6}", p.name, p.chips)?;
    }
    Ok(())
}

/// Cards with suit symbols, e.g. `A♠ T♥`.
fn show_cards(cards: &[Card]) -> String {
    cards.iter().map(|c| c.symbolic()).collect::<Vec<_>>().join(" ")
}

fn show_hole(cards: &[DealtCard]) -> String {
    cards
        .iter()
        .map(|d| if d.face_up { d.card.symbolic() } else { d.to_string() })
        .collect::<Vec<_>>()
        .join(" ")
}
