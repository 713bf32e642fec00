/// Use cases module containing application business logic orchestration
mod enrich_findings;
mod materialize_repository;
mod process_commit;
mod resolve_manifest;

pub use enrich_findings::{EnrichmentBatch, FindingEnricher, DEFAULT_ENRICHMENT_CONCURRENCY};
pub use materialize_repository::{MaterializedCheckout, RepositoryMaterializer};
pub use process_commit::{PipelineAdapters, PipelineOptions, ProcessCommitUseCase};
pub use resolve_manifest::ManifestResolver;
