//! End-to-end pipeline: edge list to Sankey HTML.
//!
//! `run` is pure and works on in-memory inputs. `render_to_file` adds the
//! HTML write, and `render_network` drives the same steps from a project
//! file with optional progress reporting.

use std::path::{Path, PathBuf};
use std::time::Instant;

use bf_flow::{
    CapacityMap, CycleMode, FlowProblem, FlowSolution, ReservoirLevel, ReservoirSet, accumulate,
    propagate,
};
use bf_graph::{FlowGraph, GraphBuilder, LabelIndex};
use bf_render::{RenderOptions, RenderReport, SankeyDiagram};
use tracing::info;

use crate::compile;
use crate::error::AppResult;
use crate::progress::{PipelineStage, ProgressEvent};
use crate::project_service;
use crate::summary::{self, FlowSummary};

pub const DEFAULT_OUTPUT: &str = "pipeline.html";

/// In-memory inputs for one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineInput {
    pub edges: Vec<(String, String)>,
    pub capacities: CapacityMap,
    /// Empty unless set; each call builds its own.
    pub reservoirs: ReservoirSet,
}

impl PipelineInput {
    pub fn new<I, S>(edges: I, capacities: CapacityMap) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        Self {
            edges: edges
                .into_iter()
                .map(|(from, to)| (from.into(), to.into()))
                .collect(),
            capacities,
            reservoirs: ReservoirSet::new(),
        }
    }

    pub fn with_reservoirs(mut self, reservoirs: ReservoirSet) -> Self {
        self.reservoirs = reservoirs;
        self
    }
}

/// Options for a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub show_reservoirs: bool,
    pub cycle_mode: CycleMode,
    /// Overrides the project title, then the default title.
    pub title: Option<String>,
    /// Draw the legend annotation; off when either this or the project says so.
    pub show_legend: bool,
    /// Legend text; falls back to the project legend, then the default legend.
    pub legend: Option<String>,
    /// Overrides the project output path, then `DEFAULT_OUTPUT`.
    pub output: Option<PathBuf>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            show_reservoirs: true,
            cycle_mode: CycleMode::Strict,
            title: None,
            show_legend: true,
            legend: None,
            output: None,
        }
    }
}

impl PipelineOptions {
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    fn render_options(&self) -> RenderOptions {
        let defaults = RenderOptions::default();
        RenderOptions {
            title: self.title.clone().unwrap_or(defaults.title),
            legend: if self.show_legend {
                self.legend.clone().or(defaults.legend)
            } else {
                None
            },
            ..defaults
        }
    }
}

/// Everything computed by one run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub graph: FlowGraph,
    pub solution: FlowSolution,
    pub levels: Vec<ReservoirLevel>,
    pub diagram: SankeyDiagram,
    pub render_options: RenderOptions,
    pub summary: FlowSummary,
}

/// Wall-clock timing per phase.
#[derive(Debug, Clone, Default)]
pub struct PipelineTiming {
    pub load_time_s: f64,
    pub compile_time_s: f64,
    pub solve_time_s: f64,
    pub write_time_s: f64,
    pub total_time_s: f64,
}

#[derive(Debug, Clone)]
pub struct RenderResponse {
    pub output: PipelineOutput,
    pub report: RenderReport,
    pub timing: PipelineTiming,
}

/// Request to render one network of a project file.
pub struct RenderRequest<'a> {
    pub project_path: &'a Path,
    /// `None` selects the first network.
    pub network_id: Option<&'a str>,
    pub options: PipelineOptions,
}

/// Propagate flow and build the diagram without touching the filesystem.
pub fn run(input: &PipelineInput, options: &PipelineOptions) -> AppResult<PipelineOutput> {
    let graph = GraphBuilder::from_edges(
        input
            .edges
            .iter()
            .map(|(from, to)| (from.as_str(), to.as_str())),
    )
    .build()?;
    let index = LabelIndex::from_graph(&graph);
    solve(
        graph,
        &index,
        &input.capacities,
        &input.reservoirs,
        options,
        &mut |_| {},
    )
}

/// Run the pipeline and write the HTML to `options.output_path()`.
pub fn render_to_file(input: &PipelineInput, options: &PipelineOptions) -> AppResult<RenderResponse> {
    let started = Instant::now();
    let output = run(input, options)?;
    let solve_time_s = started.elapsed().as_secs_f64();

    let write_started = Instant::now();
    let report = bf_render::write_html(
        &options.output_path(),
        &output.diagram,
        &output.render_options,
    )?;

    Ok(RenderResponse {
        output,
        report,
        timing: PipelineTiming {
            solve_time_s,
            write_time_s: write_started.elapsed().as_secs_f64(),
            total_time_s: started.elapsed().as_secs_f64(),
            ..PipelineTiming::default()
        },
    })
}

/// Load a project, render one of its networks and write the HTML.
pub fn render_network(request: &RenderRequest) -> AppResult<RenderResponse> {
    render_network_with_progress(request, None)
}

/// Like `render_network`, streaming stage events to `progress_cb`.
pub fn render_network_with_progress(
    request: &RenderRequest,
    mut progress_cb: Option<&mut dyn FnMut(ProgressEvent)>,
) -> AppResult<RenderResponse> {
    let started = Instant::now();
    let mut timing = PipelineTiming::default();
    let mut emit = |stage: PipelineStage, message: Option<String>| {
        if let Some(cb) = progress_cb.as_deref_mut() {
            cb(ProgressEvent::stage(
                stage,
                started.elapsed().as_secs_f64(),
                message,
            ));
        }
    };

    emit(
        PipelineStage::LoadingProject,
        Some(format!("Loading {}", request.project_path.display())),
    );
    let project = project_service::load_project(request.project_path)?;
    let network = project_service::get_network(&project, request.network_id)?;
    timing.load_time_s = started.elapsed().as_secs_f64();

    emit(
        PipelineStage::CompilingNetwork,
        Some(format!("Compiling network '{}'", network.id)),
    );
    let compile_started = Instant::now();
    let runtime = compile::compile_network(network)?;
    timing.compile_time_s = compile_started.elapsed().as_secs_f64();

    let mut options = request.options.clone();
    options.show_reservoirs &= runtime.render.show_reservoirs;
    options.show_legend &= runtime.render.show_legend;
    options.title = options.title.or_else(|| runtime.render.title.clone());
    options.legend = options.legend.or_else(|| runtime.render.legend.clone());
    options.output = options
        .output
        .or_else(|| runtime.render.output.as_ref().map(PathBuf::from));

    let solve_started = Instant::now();
    let output = solve(
        runtime.graph,
        &runtime.index,
        &runtime.capacities,
        &runtime.reservoirs,
        &options,
        &mut |stage| emit(stage, None),
    )?;
    timing.solve_time_s = solve_started.elapsed().as_secs_f64();

    let path = options.output_path();
    emit(
        PipelineStage::WritingHtml,
        Some(format!("Writing {}", path.display())),
    );
    let write_started = Instant::now();
    let report = bf_render::write_html(&path, &output.diagram, &output.render_options)?;
    timing.write_time_s = write_started.elapsed().as_secs_f64();
    timing.total_time_s = started.elapsed().as_secs_f64();

    emit(PipelineStage::Completed, None);
    info!(
        network = %network.id,
        path = %report.path.display(),
        total_s = timing.total_time_s,
        "render complete"
    );

    Ok(RenderResponse {
        output,
        report,
        timing,
    })
}

fn solve(
    graph: FlowGraph,
    index: &LabelIndex,
    capacities: &CapacityMap,
    reservoirs: &ReservoirSet,
    options: &PipelineOptions,
    on_stage: &mut dyn FnMut(PipelineStage),
) -> AppResult<PipelineOutput> {
    on_stage(PipelineStage::Propagating);
    let problem = FlowProblem::new(&graph, capacities).with_cycle_mode(options.cycle_mode);
    let solution = propagate(&problem)?;
    info!(
        nodes = graph.nodes().len(),
        edges = graph.edges().len(),
        "propagated bottleneck flow"
    );

    let levels = if options.show_reservoirs {
        on_stage(PipelineStage::AccumulatingReservoirs);
        accumulate(&graph, index, &solution, reservoirs)
    } else {
        Vec::new()
    };

    on_stage(PipelineStage::BuildingDiagram);
    let diagram = SankeyDiagram::build(&graph, &solution, &levels);
    let summary = summary::summarize(&graph, &solution, &levels);

    Ok(PipelineOutput {
        graph,
        solution,
        levels,
        diagram,
        render_options: options.render_options(),
        summary,
    })
}
