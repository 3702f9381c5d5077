//! Output formatting for CLI

use crate::{
    solver::{Evaluation, EvaluationSource},
    tictactoe::BoardState,
    types::Position,
};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print statistics table
pub fn print_stats_table<V: AsRef<str>>(stats: &[(&str, V)]) {
    for (key, value) in stats {
        print_kv(key, value.as_ref());
    }
}

/// Print a board indented under the current section
pub fn print_board(state: &BoardState) {
    for line in state.to_string().lines() {
        println!("  {line}");
    }
}

/// Describe an X-perspective score
pub fn format_outcome(score: i32) -> String {
    match score.signum() {
        1 => format!("X wins ({score:+})"),
        -1 => format!("O wins ({score:+})"),
        _ => "draw".to_string(),
    }
}

pub fn format_moves(moves: &[Position]) -> String {
    moves
        .iter()
        .map(|mv| format!("{} ({},{})", mv.index(), mv.row(), mv.col()))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_source(source: EvaluationSource) -> &'static str {
    match source {
        EvaluationSource::SolvedTable => "solved table",
        EvaluationSource::CompiledTable => "compiled table",
        EvaluationSource::Search => "live search",
    }
}

/// Print an evaluation as a key-value block
pub fn print_evaluation(eval: &Evaluation) {
    print_kv("Outcome", &format_outcome(eval.score));
    print_kv("Best moves", &format_moves(&eval.best_moves));
    print_kv("Source", format_source(eval.source));
}
