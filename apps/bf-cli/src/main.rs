use bf_app::{
    AppResult, FlowSummary, PipelineOptions, PipelineStage, ProgressEvent, RenderRequest,
    pipeline, project_service,
};
use bf_flow::CycleMode;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "bf-cli")]
#[command(about = "Bottleflow CLI - capacity-limited DAG flow diagrams", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and structure
    Validate {
        /// Path to the project YAML (or JSON) file
        project_path: PathBuf,
    },
    /// List networks in a project
    Networks {
        /// Path to the project YAML (or JSON) file
        project_path: PathBuf,
    },
    /// Propagate flow and write the Sankey HTML
    Render {
        /// Path to the project YAML (or JSON) file
        project_path: PathBuf,
        /// Network ID (defaults to the first network)
        network_id: Option<String>,
        /// Output HTML path (defaults to the project setting, then pipeline.html)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Leave reservoir nodes out of the diagram
        #[arg(long)]
        no_reservoirs: bool,
        /// Render the orderable part of a cyclic network instead of failing
        #[arg(long)]
        lenient_cycles: bool,
        /// Diagram title
        #[arg(long)]
        title: Option<String>,
        /// Leave the legend annotation out of the diagram
        #[arg(long)]
        no_legend: bool,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Networks { project_path } => cmd_networks(&project_path),
        Commands::Render {
            project_path,
            network_id,
            output,
            no_reservoirs,
            lenient_cycles,
            title,
            no_legend,
        } => cmd_render(
            &project_path,
            network_id.as_deref(),
            PipelineOptions {
                show_reservoirs: !no_reservoirs,
                cycle_mode: cycle_mode(lenient_cycles),
                title,
                show_legend: !no_legend,
                legend: None,
                output,
            },
        ),
    }
}

fn cycle_mode(lenient: bool) -> CycleMode {
    if lenient {
        CycleMode::Lenient
    } else {
        CycleMode::Strict
    }
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = project_service::load_project(project_path)?;
    project_service::validate_project(&project)?;
    println!("✓ Project is valid");
    Ok(())
}

fn cmd_networks(project_path: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let networks = project_service::list_networks(&project);

    if networks.is_empty() {
        println!("No networks found in project");
    } else {
        println!("Networks in project:");
        for net in networks {
            println!(
                "  {} - {} ({} nodes, {} edges, {} capacities, {}/{} reservoirs shown)",
                net.id,
                net.name,
                net.node_count,
                net.edge_count,
                net.capacity_count,
                net.shown_reservoir_count,
                net.reservoir_count
            );
        }
    }
    Ok(())
}

fn cmd_render(
    project_path: &Path,
    network_id: Option<&str>,
    options: PipelineOptions,
) -> AppResult<()> {
    tracing::debug!(?options, "render options");
    let request = RenderRequest {
        project_path,
        network_id,
        options,
    };

    let response = pipeline::render_network_with_progress(
        &request,
        Some(&mut |event| render_cli_progress(&event)),
    )?;
    clear_progress_line();

    println!("✓ Saved to {}", response.report.path.display());
    println!("  Diagram ID: {}", response.report.diagram_id);
    print_summary(&response.output.summary);
    println!(
        "  Timing: load={:.3}s compile={:.3}s solve={:.3}s write={:.3}s total={:.3}s",
        response.timing.load_time_s,
        response.timing.compile_time_s,
        response.timing.solve_time_s,
        response.timing.write_time_s,
        response.timing.total_time_s
    );
    Ok(())
}

fn print_summary(summary: &FlowSummary) {
    println!(
        "  Flow: {} nodes, {} edges, utilized {:.3} of {:.3} capacity ({:.3} wasted, {} saturated edges)",
        summary.node_count,
        summary.edge_count,
        summary.total_utilized,
        summary.total_capacity,
        summary.total_wasted,
        summary.saturated_edges
    );
    for edge in &summary.edges {
        println!(
            "    {:<12} -> {:<12} {:>10.3} / {:<10.3} wasted {:.3}",
            edge.from, edge.to, edge.utilized, edge.capacity, edge.wasted
        );
    }
    if !summary.unresolved.is_empty() {
        println!(
            "  ⚠ Cycle: no flow computed past {}",
            summary.unresolved.join(", ")
        );
    }
    for reservoir in &summary.reservoirs {
        println!(
            "  Reservoir {}: {:.3} (initial {:.3} + in {:.3} - out {:.3})",
            reservoir.label, reservoir.level, reservoir.initial, reservoir.inflow, reservoir.outflow
        );
    }
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(100));
    let _ = io::stdout().flush();
}

fn render_cli_progress(event: &ProgressEvent) {
    if event.stage == PipelineStage::Completed {
        return;
    }
    print!(
        "\r[{:<10}] {}  elapsed={:.3}s",
        event.stage.label(),
        event.message.as_deref().unwrap_or(""),
        event.elapsed_wall_s
    );
    let _ = io::stdout().flush();
}
