use serde::Serialize;

/// States of a single pipeline run
///
/// ```text
/// Idle -> Materializing -> ResolvingManifest -> GeneratingSbom -> Scanning
///      -> Enriching -> Assembling -> Done
/// ```
/// Any stage except `Idle` and `ResolvingManifest` may move to `Failed`.
/// `Done` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Idle,
    Materializing,
    ResolvingManifest,
    GeneratingSbom,
    Scanning,
    Enriching,
    Assembling,
    Done,
    Failed,
}

impl PipelineStage {
    /// The stage that follows on success
    pub fn next(self) -> Option<Self> {
        match self {
            PipelineStage::Idle => Some(PipelineStage::Materializing),
            PipelineStage::Materializing => Some(PipelineStage::ResolvingManifest),
            PipelineStage::ResolvingManifest => Some(PipelineStage::GeneratingSbom),
            PipelineStage::GeneratingSbom => Some(PipelineStage::Scanning),
            PipelineStage::Scanning => Some(PipelineStage::Enriching),
            PipelineStage::Enriching => Some(PipelineStage::Assembling),
            PipelineStage::Assembling => Some(PipelineStage::Done),
            PipelineStage::Done | PipelineStage::Failed => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineStage::Done | PipelineStage::Failed)
    }

    /// Whether a failure inside this stage ends the run
    pub fn is_fatal_on_error(self) -> bool {
        !matches!(
            self,
            PipelineStage::Idle | PipelineStage::ResolvingManifest
        ) && !self.is_terminal()
    }

    pub fn can_transition_to(self, to: PipelineStage) -> bool {
        if to == PipelineStage::Failed {
            return self.is_fatal_on_error();
        }
        self.next() == Some(to)
    }

    pub fn label(self) -> &'static str {
        match self {
            PipelineStage::Idle => "idle",
            PipelineStage::Materializing => "materializing repository",
            PipelineStage::ResolvingManifest => "resolving manifest",
            PipelineStage::GeneratingSbom => "generating SBOM",
            PipelineStage::Scanning => "scanning for vulnerabilities",
            PipelineStage::Enriching => "enriching findings",
            PipelineStage::Assembling => "assembling report",
            PipelineStage::Done => "done",
            PipelineStage::Failed => "failed",
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Tracks the current stage of a run and rejects out-of-order transitions
#[derive(Debug, Clone)]
pub struct StageTracker {
    current: PipelineStage,
    history: Vec<PipelineStage>,
}

impl StageTracker {
    pub fn new() -> Self {
        Self {
            current: PipelineStage::Idle,
            history: vec![PipelineStage::Idle],
        }
    }

    pub fn current(&self) -> PipelineStage {
        self.current
    }

    /// Every stage entered so far, starting with `Idle`
    pub fn history(&self) -> &[PipelineStage] {
        &self.history
    }

    pub fn advance(&mut self, to: PipelineStage) -> crate::shared::Result<()> {
        if !self.current.can_transition_to(to) {
            anyhow::bail!(
                "Invalid pipeline transition: {:?} -> {:?}",
                self.current,
                to
            );
        }
        self.current = to;
        self.history.push(to);
        Ok(())
    }
}

impl Default for StageTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a pipeline stage
///
/// `Degraded` means the stage produced a usable value through a fallback;
/// only `Fatal` stops the run.
#[derive(Debug)]
pub enum StageOutcome<T> {
    Complete(T),
    Degraded { value: T, reason: String },
    Fatal(anyhow::Error),
}

impl<T> StageOutcome<T> {
    pub fn is_fatal(&self) -> bool {
        matches!(self, StageOutcome::Fatal(_))
    }

    /// The produced value, or the fatal error
    pub fn into_result(self) -> crate::shared::Result<T> {
        match self {
            StageOutcome::Complete(value) | StageOutcome::Degraded { value, .. } => Ok(value),
            StageOutcome::Fatal(error) => Err(error),
        }
    }
}

impl<T> From<crate::shared::Result<T>> for StageOutcome<T> {
    fn from(result: crate::shared::Result<T>) -> Self {
        match result {
            Ok(value) => StageOutcome::Complete(value),
            Err(error) => StageOutcome::Fatal(error),
        }
    }
}
