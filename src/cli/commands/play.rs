//! Play command - watch an oracle play both sides

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    app::App,
    cli::{
        config::{parse_board, search_config},
        output::{print_board, print_kv, print_section, print_subsection},
    },
    playout::play_out,
};

#[derive(Parser, Debug)]
#[command(about = "Self-play from a position")]
pub struct PlayArgs {
    /// Starting board label, or `-` for the empty board
    #[arg(default_value = "-")]
    pub board: String,

    /// Compiled binary table; without it both sides search
    #[arg(long, short = 't')]
    pub table: Option<PathBuf>,

    /// Depth for search (default 15)
    #[arg(long, short = 'd')]
    pub depth: Option<u32>,

    /// JSON pipeline configuration supplying the search settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Stop after this many plies
    #[arg(long, default_value_t = 30)]
    pub max_plies: usize,

    /// Seed for tie-breaking among equally good moves
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let start = parse_board(&args.board)?;
    let app = App::new().with_search(search_config(args.config.as_deref(), args.depth)?);
    let mut oracle = app.query_oracle(args.table.as_deref())?;
    let mut rng = StdRng::seed_from_u64(args.seed);

    let game = play_out(oracle.as_mut(), start, args.max_plies, &mut rng)?;

    print_section(&format!("Self-play from {}", start.label()));
    let mut state = start;
    for (ply, &mv) in game.moves.iter().enumerate() {
        print_subsection(&format!("Ply {}: {} plays {}", ply + 1, state.to_move, mv.index()));
        state = state.apply(mv)?;
        print_board(&state);
    }

    print_subsection("Result");
    match game.winner {
        Some(winner) => print_kv("Winner", &winner.to_string()),
        None => print_kv("Winner", &format!("none after {} plies", game.plies())),
    }
    Ok(())
}
