//! Query command - look a position up, falling back to live search

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    app::App,
    cli::{
        config::{parse_board, search_config},
        output::{print_board, print_evaluation, print_kv, print_section},
    },
    ports::MoveOracle,
};

#[derive(Parser, Debug)]
#[command(about = "Score a position and list its best moves")]
pub struct QueryArgs {
    /// Board label such as `2..a3.b.._X`, or `-` for the empty board
    pub board: String,

    /// Compiled binary table; without it the position is searched
    #[arg(long, short = 't')]
    pub table: Option<PathBuf>,

    /// Depth for the search fallback (default 15)
    #[arg(long, short = 'd')]
    pub depth: Option<u32>,

    /// JSON pipeline configuration supplying the search settings
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn execute(args: QueryArgs) -> Result<()> {
    let state = parse_board(&args.board)?;
    print_section(&format!("Query: {}", state.label()));
    print_board(&state);

    if let Some(winner) = state.winner() {
        print_kv("Outcome", &format!("{winner} has won"));
        return Ok(());
    }

    let search = search_config(args.config.as_deref(), args.depth)?;
    let app = App::new().with_search(search);
    let mut oracle = app.query_oracle(args.table.as_deref())?;
    match oracle.evaluate(&state)? {
        Some(eval) => print_evaluation(&eval),
        None => print_kv("Outcome", "no answer"),
    }
    Ok(())
}
