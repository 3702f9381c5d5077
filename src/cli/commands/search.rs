//! Search command - run the online engine on one position

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::{
        config::{parse_board, search_config},
        output::{format_number, print_board, print_kv, print_section},
    },
    solver::NegamaxEngine,
};

#[derive(Parser, Debug)]
#[command(about = "Search a position with depth-limited negamax")]
pub struct SearchArgs {
    /// Board label such as `2..a3.b.._X`, or `-` for the empty board
    pub board: String,

    /// Search depth in plies (default 15)
    #[arg(long, short = 'd')]
    pub depth: Option<u32>,

    /// JSON pipeline configuration supplying the search settings
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn execute(args: SearchArgs) -> Result<()> {
    let state = parse_board(&args.board)?;
    let search = search_config(args.config.as_deref(), args.depth)?;
    let mut engine = NegamaxEngine::new(search);
    let result = engine.best_move(&state)?;

    print_section(&format!("Search: {}", state.label()));
    print_board(&state);
    print_kv("Depth", &search.max_depth.to_string());
    print_kv(
        &format!("Score for {}", state.to_move),
        &format!("{:+}", result.score),
    );
    match result.best_move {
        Some(mv) => print_kv("Best move", &format!("{} ({},{})", mv.index(), mv.row(), mv.col())),
        None => print_kv("Best move", "none"),
    }
    print_kv("Nodes", &format_number(result.nodes as usize));
    print_kv("Table entries", &format_number(engine.table().len()));
    Ok(())
}
