/// Process adapters wrapping external command-line tools
mod command_runner;
mod git_cloner;
mod grype;
mod pipreqs;
mod searchsploit;
mod syft;

pub use command_runner::{CommandOutput, CommandRunner, DEFAULT_TOOL_TIMEOUT};
pub use git_cloner::GitCloner;
pub use grype::GrypeScanner;
pub use pipreqs::PipreqsManifestRegenerator;
pub use searchsploit::SearchsploitLookup;
pub use syft::SyftSbomTool;
