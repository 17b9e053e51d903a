#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    LoadingProject,
    CompilingNetwork,
    Propagating,
    AccumulatingReservoirs,
    BuildingDiagram,
    WritingHtml,
    Completed,
}

#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub stage: PipelineStage,
    pub elapsed_wall_s: f64,
    pub message: Option<String>,
}

impl ProgressEvent {
    pub fn stage(stage: PipelineStage, elapsed_wall_s: f64, message: Option<String>) -> Self {
        Self {
            stage,
            elapsed_wall_s,
            message,
        }
    }
}

impl PipelineStage {
    pub fn label(&self) -> &'static str {
        match self {
            PipelineStage::LoadingProject => "load",
            PipelineStage::CompilingNetwork => "compile",
            PipelineStage::Propagating => "propagate",
            PipelineStage::AccumulatingReservoirs => "reservoirs",
            PipelineStage::BuildingDiagram => "diagram",
            PipelineStage::WritingHtml => "write",
            PipelineStage::Completed => "done",
        }
    }
}
