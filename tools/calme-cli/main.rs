use calme::prelude::*;
use clap::Parser;
use std::fs;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

/// Talk to a CALMe dialogue graph from the terminal
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The graph to start in
    #[arg(short, long, value_enum, default_value_t = GraphId::Main)]
    graph: GraphId,

    /// Load this JSON graph definition into the selected slot instead of the built-in flow
    #[arg(short, long)]
    definition: Option<String>,

    /// Print the selected graph as a Mermaid flowchart and exit
    #[arg(long)]
    mermaid: bool,

    /// Log transitions and classifier decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let graphs = load_graphs(&cli);

    if cli.mermaid {
        print!("{}", MermaidDiagram::new(graphs.get(cli.graph)));
        return;
    }

    run_conversation(graphs, cli.graph, cli.verbose);
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "calme=debug" } else { "calme=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_graphs(cli: &Cli) -> GraphSet {
    let mut builder = GraphSet::builder();
    if let Some(path) = &cli.definition {
        let json = fs::read_to_string(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to read definition file '{}': {}", path, e))
        });
        let mut definition = GraphDefinition::from_json(&json)
            .unwrap_or_else(|e| exit_with_error(&e.to_string()));
        definition.id = cli.graph;
        let graph = GraphCompiler::builder(definition)
            .build()
            .compile()
            .unwrap_or_else(|e| exit_with_error(&format!("Graph compilation failed: {}", e)));
        builder = builder.with_graph(graph);
    }
    builder
        .build()
        .unwrap_or_else(|e| exit_with_error(&format!("Built-in graph failed to compile: {}", e)))
}

fn run_conversation(graphs: GraphSet, graph: GraphId, verbose: bool) {
    let mut engine = DialogueEngine::builder(graphs).start_in(graph).build();
    println!("--- CALMe ({} graph) --- type 'quit' to leave\n", graph);

    let mut node = engine
        .get_current_node()
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    loop {
        println!("{}\n", node.content);
        if node.is_end() {
            break;
        }

        let Some(line) = read_line() else { break };
        if line.eq_ignore_ascii_case("quit") {
            return;
        }

        let mut step = engine
            .respond(&line)
            .unwrap_or_else(|e| exit_with_error(&e.to_string()));
        if verbose {
            println!("  ({})", step.route);
        }

        while let Some(trigger) = step.activity_trigger.take() {
            println!("{}\n", step.node.content);
            println!(
                "  [activity '{}' running, press enter when finished]",
                trigger.activity_name
            );
            let _ = read_line();
            step = engine
                .resume_after_activity(true)
                .unwrap_or_else(|e| exit_with_error(&e.to_string()));
        }
        node = step.node;
    }

    if engine.graph_id() == GraphId::Onboarding {
        let profile = Profile::from_variables(engine.session().variables());
        match serde_json::to_string_pretty(&profile) {
            Ok(json) => println!("Profile built from onboarding:\n{}", json),
            Err(e) => exit_with_error(&format!("Failed to serialize profile: {}", e)),
        }
    }
}

/// Reads one trimmed line, or `None` at end of input.
fn read_line() -> Option<String> {
    print!("> ");
    io::stdout().flush().ok()?;
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
