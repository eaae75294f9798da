use clap::{Parser, ValueEnum};
use rigboard::prelude::*;
use std::fs;
use std::io::{self, Write};
use std::time::Instant;

/// Define a CLI-specific enum for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyCli {
    Structured,
    Successor,
}

impl From<StrategyCli> for IndentStrategy {
    fn from(value: StrategyCli) -> Self {
        match value {
            StrategyCli::Structured => IndentStrategy::Structured,
            StrategyCli::Successor => IndentStrategy::Successor,
        }
    }
}

/// Generate source code from a saved canvas graph
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the canvas JSON file (`{"nodes": [...], "edges": [...]}`)
    graph_path: Option<String>,

    /// Target language
    #[arg(short, long, default_value = "python")]
    language: String,

    /// How nested blocks are indented
    #[arg(short, long, value_enum, default_value = "structured")]
    strategy: StrategyCli,

    /// Write the generated code to this file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Print the traversal order instead of code
    #[arg(long)]
    order: bool,

    /// Run in interactive mode to be prompted for inputs
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.human {
        run_interactive();
    } else {
        run_non_interactive(cli);
    }
}

fn load_graph(graph_path: &str) -> Graph {
    let json = fs::read_to_string(graph_path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read graph file '{}': {}", graph_path, e))
    });
    CanvasDocument::from_json(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse graph JSON: {}", e)))
        .into_graph()
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid graph: {}", e)))
}

fn run_generation(graph_path: &str, language: &str, strategy: IndentStrategy, output: Option<String>) {
    let start = Instant::now();
    let graph = load_graph(graph_path);

    let generator = CodeGenerator::builder()
        .with_language_alias("py", "python")
        .with_language_alias("js", "javascript")
        .with_indent_strategy(strategy)
        .build();

    let generated = generator.generate(&graph, language).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "{} (available: {})",
            e,
            generator.languages().join(", ")
        ))
    });

    if !generated.rooted {
        eprintln!("Warning: graph has no start node, blocks are emitted in insertion order.");
    }

    match output {
        Some(path) => {
            fs::write(&path, &generated.code).unwrap_or_else(|e| {
                exit_with_error(&format!("Could not write to file '{}': {}", path, e))
            });
            println!(
                "Wrote {} blocks of {} to '{}' in {:?}",
                generated.order.len(),
                generated.language,
                path,
                start.elapsed()
            );
        }
        None => print!("{}", generated.code),
    }
}

fn run_order(graph_path: &str) {
    let graph = load_graph(graph_path);
    let traversal = traverse(&graph);
    if !traversal.is_rooted() {
        eprintln!("Warning: graph has no start node, showing insertion order.");
    }
    for (i, node) in traversal.nodes().enumerate() {
        println!("{:>3}. {} ({})", i + 1, node.id, node.kind);
    }
}

/// Runs the CLI in non-interactive mode, taking all arguments from the command line.
fn run_non_interactive(cli: Cli) {
    let graph_path = cli.graph_path.unwrap_or_else(|| {
        exit_with_error("Graph path is required in non-interactive mode.");
    });

    if cli.order {
        run_order(&graph_path);
    } else {
        run_generation(&graph_path, &cli.language, cli.strategy.into(), cli.output);
    }
}

/// Runs the CLI in an interactive, human-friendly mode with prompts.
fn run_interactive() {
    println!("--- rigboard Interactive Mode ---");

    let graph_path = prompt_for_input("Enter canvas graph path", Some("data/canvas.json"));
    let language = prompt_for_input("Enter target language", Some("python"));

    let strategy = loop {
        println!("\nPlease select an indentation strategy:");
        println!("  1: Structured (follows the block structure)");
        println!("  2: Successor (legacy heuristic)");
        let choice_str = prompt_for_input("Enter choice", Some("1"));

        match choice_str.trim() {
            "1" => break IndentStrategy::Structured,
            "2" => break IndentStrategy::Successor,
            _ => println!("Invalid choice. Please enter 1 or 2."),
        }
    };

    let output = prompt_for_input("Enter output file (optional)", None);
    let output = (!output.is_empty()).then_some(output);

    run_generation(&graph_path, &language, strategy, output);
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    if let Err(e) = io::stdout().flush() {
        exit_with_error(&format!("Failed to flush stdout: {}", e));
    }

    if let Err(e) = io::stdin().read_line(&mut line) {
        exit_with_error(&format!("Failed to read line: {}", e));
    }
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
