//! Ember CLI
//!
//! Runs one of the pre-built demo programs through the cell-stack evaluator.
//! There is no lexer or parser in this workspace, so `run` takes a demo name
//! rather than a source file.

mod demos;
mod tracing_setup;

use ember_eval::{describe_object, Evaluator};

fn main() {
    tracing_setup::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            if args.len() < 3 {
                eprintln!("Usage: emberc run <demo-name> [--trace] [--max-cells=N]");
                std::process::exit(1);
            }
            run_demo(&args[2], &args[3..]);
        }
        "list" => {
            list_demos();
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("Ember {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn run_demo(name: &str, flags: &[String]) {
    let Some(demo) = demos::find(name) else {
        eprintln!("Unknown demo: {name}");
        eprintln!();
        list_demos();
        std::process::exit(1);
    };

    let mut debug_trace = false;
    let mut max_cells: Option<usize> = None;
    for flag in flags {
        if flag == "--trace" {
            debug_trace = true;
        } else if let Some(limit) = flag.strip_prefix("--max-cells=") {
            match limit.parse() {
                Ok(parsed) => max_cells = Some(parsed),
                Err(_) => {
                    eprintln!("Invalid --max-cells value: {limit}");
                    std::process::exit(1);
                }
            }
        } else {
            eprintln!("Unknown flag: {flag}");
            std::process::exit(1);
        }
    }

    let mut builder = ember_eval::EvaluatorBuilder::new(&demo.arena, &demo.interner).debug_trace(debug_trace);
    if let Some(limit) = max_cells {
        builder = builder.max_cells(limit);
    }
    let evaluator: Evaluator<'_> = builder.build();

    match evaluator.run(demo.entry) {
        Ok(result) => {
            println!("{}", describe_object(&demo.interner, &result));
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn list_demos() {
    println!("Available demos:");
    for demo in demos::all() {
        println!("  {:<16} {}", demo.name, demo.description);
    }
}

fn print_usage() {
    println!("Ember (cell-stack evaluator for pattern-matched functions)");
    println!();
    println!("Usage: emberc <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <demo-name>     Evaluate a built-in demo program");
    println!("  list                List available demos");
    println!("  help                Show this help message");
    println!("  version             Show version information");
    println!();
    println!("Run options:");
    println!("  --trace             Emit a trace event per evaluator step");
    println!("  --max-cells=<N>     Abort after N driver steps");
    println!();
    println!("Examples:");
    println!("  emberc list");
    println!("  emberc run let-arithmetic");
    println!("  emberc run self-loop --trace");
}
