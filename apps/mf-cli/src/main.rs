use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use mf_app::{AppError, AppResult, EditorConfig, load_config, load_mission, replay, summarize};
use mf_core::TemplateId;
use mf_export::{export_to_declarative, fingerprint};
use mf_graph::MissionGraph;
use mf_templates::{DirTemplateStore, NewTemplate, TemplateStore};

#[derive(Parser)]
#[command(name = "mf-cli")]
#[command(about = "MissionForge CLI - build, inspect and export remediation missions", long_about = None)]
struct Cli {
    /// Editor configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a mission file
    Validate {
        /// Path to the mission YAML file
        mission_path: PathBuf,
    },
    /// Export a mission to declarative text
    Export {
        /// Path to the mission YAML file
        mission_path: PathBuf,
        /// Output file (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Estimate duration and cost of a mission
    Estimate {
        /// Path to the mission YAML file
        mission_path: PathBuf,
    },
    /// Replay an editor gesture script and export the result
    Replay {
        /// Path to the script YAML file
        script_path: PathBuf,
        /// Output file (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Manage saved templates
    #[command(subcommand)]
    Templates(TemplateCommands),
}

#[derive(Subcommand)]
enum TemplateCommands {
    /// List templates in creation order
    List {
        /// Template directory
        #[arg(long)]
        dir: PathBuf,
    },
    /// Save a mission file as a template
    Save {
        /// Path to the mission YAML file
        mission_path: PathBuf,
        /// Template directory
        #[arg(long)]
        dir: PathBuf,
        /// Template name
        #[arg(long)]
        name: String,
        /// Template description
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Export a stored template to declarative text
    Export {
        /// Template id
        template_id: String,
        /// Template directory
        #[arg(long)]
        dir: PathBuf,
    },
    /// Delete a stored template
    Delete {
        /// Template id
        template_id: String,
        /// Template directory
        #[arg(long)]
        dir: PathBuf,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EditorConfig::default(),
    };
    tracing::debug!(?config, "editor config");

    match cli.command {
        Commands::Validate { mission_path } => cmd_validate(&mission_path, &config),
        Commands::Export {
            mission_path,
            output,
        } => cmd_export(&mission_path, output.as_deref(), &config),
        Commands::Estimate { mission_path } => cmd_estimate(&mission_path, &config),
        Commands::Replay {
            script_path,
            output,
        } => cmd_replay(&script_path, output.as_deref(), &config),
        Commands::Templates(cmd) => match cmd {
            TemplateCommands::List { dir } => cmd_templates_list(dir),
            TemplateCommands::Save {
                mission_path,
                dir,
                name,
                description,
            } => cmd_templates_save(&mission_path, dir, &name, &description, &config),
            TemplateCommands::Export { template_id, dir } => {
                cmd_templates_export(&template_id, dir, &config)
            }
            TemplateCommands::Delete { template_id, dir } => {
                cmd_templates_delete(&template_id, dir)
            }
        },
    }
}

fn cmd_validate(mission_path: &Path, config: &EditorConfig) -> AppResult<()> {
    println!("Validating mission: {}", mission_path.display());
    let graph = load_mission(mission_path, config)?;
    let summary = summarize(&graph);

    println!("✓ Mission '{}' is valid", summary.name);
    println!("  Steps: {}", summary.node_count);
    println!("  Connections: {}", summary.edge_count);
    for (kind, count) in summary.kinds.iter().filter(|(_, c)| *c > 0) {
        println!("    {:<14} {}", kind.as_str(), count);
    }
    Ok(())
}

fn cmd_export(mission_path: &Path, output: Option<&Path>, config: &EditorConfig) -> AppResult<()> {
    let graph = load_mission(mission_path, config)?;
    write_export(&graph, output)
}

fn cmd_estimate(mission_path: &Path, config: &EditorConfig) -> AppResult<()> {
    let graph = load_mission(mission_path, config)?;
    let estimate = config.estimator.estimate(graph.len());

    println!("Mission: {}", graph.name());
    println!("  Steps: {}", graph.len());
    println!("  Estimated time: {:.1} s", estimate.estimated_seconds);
    println!("  Estimated cost: {:.2}", estimate.estimated_cost);
    Ok(())
}

fn cmd_replay(script_path: &Path, output: Option<&Path>, config: &EditorConfig) -> AppResult<()> {
    let script = mf_app::load_script(script_path)?;
    let result = replay(&script, config)?;

    if !result.rejected.is_empty() {
        eprintln!("{} edit(s) were refused:", result.rejected.len());
        for err in &result.rejected {
            eprintln!("  - {}", err);
        }
    }

    write_export(result.session.graph(), output)
}

fn cmd_templates_list(dir: PathBuf) -> AppResult<()> {
    let store = DirTemplateStore::new(dir)?;
    let templates = store.list()?;

    if templates.is_empty() {
        println!("No templates found.");
        return Ok(());
    }

    println!("{:<38} {:<24} {:>6} {:>6}  Created", "ID", "Name", "Steps", "Edges");
    println!("{}", "-".repeat(100));
    for template in templates {
        println!(
            "{:<38} {:<24} {:>6} {:>6}  {}",
            template.id,
            template.name,
            template.node_count(),
            template.edge_count(),
            template.created_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
    Ok(())
}

fn cmd_templates_save(
    mission_path: &Path,
    dir: PathBuf,
    name: &str,
    description: &str,
    config: &EditorConfig,
) -> AppResult<()> {
    let graph = load_mission(mission_path, config)?;
    let mut store = DirTemplateStore::new(dir)?;
    let template =
        store.save(NewTemplate::new(name, graph.snapshot()).with_description(description))?;

    println!("✓ Saved template '{}' ({})", template.name, template.id);
    Ok(())
}

fn cmd_templates_export(template_id: &str, dir: PathBuf, config: &EditorConfig) -> AppResult<()> {
    let id: TemplateId = template_id.parse()?;
    let store = DirTemplateStore::new(dir)?;
    let template = store.get(&id)?;

    let graph = MissionGraph::from_nodes(
        template.name.clone(),
        template.nodes,
        config.layout,
        config.connect,
    )?;
    write_export(&graph, None)
}

fn cmd_templates_delete(template_id: &str, dir: PathBuf) -> AppResult<()> {
    let id: TemplateId = template_id.parse()?;
    let mut store = DirTemplateStore::new(dir)?;
    store.delete(&id)?;

    println!("✓ Deleted template {}", id);
    Ok(())
}

fn write_export(graph: &MissionGraph, output: Option<&Path>) -> AppResult<()> {
    let text = export_to_declarative(graph);
    let digest = fingerprint(&text);

    match output {
        Some(path) => {
            std::fs::write(path, &text).map_err(|e| AppError::FileWrite {
                path: path.to_path_buf(),
                source: e,
            })?;
            eprintln!("✓ Exported {} step(s) to {}", graph.len(), path.display());
        }
        None => print!("{}", text),
    }
    eprintln!("sha256: {}", digest);
    Ok(())
}
