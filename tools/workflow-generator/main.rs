use clap::Parser;
use promptflow::prelude::*;
use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::IndexedRandom;

/// A CLI tool to generate random workflow libraries for stress-testing
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated library JSON file to
    #[arg(short, long, default_value = "generated_workflows.json")]
    output: String,

    /// How many workflows to generate
    #[arg(long, default_value_t = 5)]
    count: usize,

    /// Number of nodes per workflow
    #[arg(long, default_value_t = 12)]
    nodes: usize,

    /// Connection attempts per node; rejected attempts are simply dropped
    #[arg(long, default_value_t = 2)]
    density: usize,
}

const PROMPT_ROWS: &[(&str, &str)] = &[
    ("Act as a Code Reviewer", "Review the following code: {{code}}"),
    ("Act as an Essay Writer", "Write an essay about {topic} for [audience]."),
    ("Act as a Business Analyst", "Analyze {{company}} and list three risks."),
    ("Act as a Math Tutor", "Explain {{concept}} step by step."),
    ("Act as a Creative Director", "Propose a campaign for {{product}}."),
    ("Summarizer", "Summarize the input in three bullet points."),
];

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.nodes == 0 {
        eprintln!("Error: --nodes must be at least 1");
        std::process::exit(1);
    }

    println!(
        "Generating {} workflow(s) with {} node(s) each...",
        cli.count, cli.nodes
    );

    let catalogue = Catalogue::new().with_prompt_rows(PROMPT_ROWS.iter().copied());
    let mut library = WorkflowLibrary::new();

    for index in 0..cli.count {
        let editor = generate_workflow(&mut rng, &catalogue, cli.nodes, cli.density);
        let name = format!("Generated workflow {}", index + 1);
        editor.save_into(&mut library, &name);
        println!(
            "-> '{}': {} nodes, {} connections",
            name,
            editor.store().len(),
            editor.store().connections().len()
        );
    }

    library.save_to_file(&cli.output)?;
    println!(
        "Successfully generated and saved {} workflow(s) to '{}'",
        library.len(),
        cli.output
    );

    Ok(())
}

/// Builds one workflow by driving the real editor, so every connection in
/// the output went through validation.
fn generate_workflow(
    rng: &mut ThreadRng,
    catalogue: &Catalogue,
    nodes: usize,
    density: usize,
) -> WorkflowEditor {
    let mut editor = WorkflowEditor::default().with_catalogue(catalogue.clone());
    let items: Vec<&CatalogueItem> = catalogue
        .data_sources()
        .iter()
        .chain(catalogue.prompts())
        .collect();

    let mut ids = Vec::with_capacity(nodes);
    for column in 0..nodes {
        let Some(item) = items.choose(rng) else {
            break;
        };
        let id = editor.drop_item(item);
        let position = Point::new(column as f64 * 360.0, rng.random_range(0.0..600.0));
        move_node(&mut editor, &id, position);
        if rng.random_bool(0.15) {
            let _ = editor.toggle_collapse(&id);
        }
        ids.push(id);
    }

    for _ in 0..nodes * density {
        let source = rng.random_range(0..ids.len());
        let target = rng.random_range(0..ids.len());
        editor.pointer_down_on_anchor(AnchorRef::output(ids[source].clone()), Point::ORIGIN);
        editor.pointer_up(Some(AnchorRef::input(ids[target].clone())));
    }

    editor
}

/// Moves a node with a body drag, the same way a user would.
fn move_node(editor: &mut WorkflowEditor, id: &NodeId, to: Point) {
    let Some(from) = editor.store().node(id).map(|n| n.position) else {
        return;
    };
    let zoom = editor.viewport().zoom();
    editor.pointer_down_on_node(id, NodeRegion::Body, from * zoom);
    editor.pointer_move(to * zoom);
    editor.pointer_up(None);
}
