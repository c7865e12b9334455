use clap::Parser;
use nerode::parser;
use nerode_draw::{dfa_to_dot, nfa_to_dot, DotOptions};
use std::process::ExitCode;

/// Compiles a regular expression through the full pipeline (NFA, DFA, minimal DFA) and
/// optionally tests input strings against the result
#[derive(Debug, Parser)]
#[command(name = "nerode", version, about)]
struct Cli {
    /// The regular expression to compile
    pattern: String,
    /// Input strings to test against the compiled automata
    inputs: Vec<String>,
    /// Print the transition table of every stage
    #[arg(short, long)]
    tables: bool,
    /// Emit a Graphviz description of every stage
    #[arg(short, long)]
    dot: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let regex = match parser::regex(&cli.pattern) {
        Ok(regex) => regex,
        Err(error) => {
            eprintln!("error: {error}");
            return ExitCode::FAILURE;
        }
    };
    let nfa = regex.to_nfa();
    let dfa = nfa.to_dfa();
    let minimal = dfa.minimize();

    println!("pattern:    {}", regex.pattern());
    println!("normalized: {}", regex.normalized_pattern());
    println!("postfix:    {}", regex.postfix_pattern());
    println!(
        "states:     {} (NFA), {} (DFA), {} (minimal DFA)",
        nfa.states().len(),
        dfa.states().len(),
        minimal.states().len()
    );

    if cli.tables {
        println!("\nNFA:\n{}", nfa.to_table());
        println!("\nDFA:\n{}", dfa.to_table());
        println!("\nminimal DFA:\n{}", minimal.to_table());
    }

    if cli.dot {
        println!();
        print!("{}", nfa_to_dot(&nfa, &DotOptions::default().with_comment("NFA".to_string())));
        print!("{}", dfa_to_dot(&dfa, &DotOptions::default().with_comment("DFA".to_string())));
        print!(
            "{}",
            dfa_to_dot(&minimal, &DotOptions::default().with_comment("minimal DFA".to_string()))
        );
    }

    let mut failed = false;
    for input in &cli.inputs {
        match minimal.accepts(input) {
            Ok(true) => println!("'{input}': accept"),
            Ok(false) => println!("'{input}': reject"),
            Err(error) => {
                println!("'{input}': error: {error}");
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
