/// Ports module defining interfaces for hexagonal architecture
///
/// The pipeline is driven from the CLI directly, so only outbound ports
/// (driven ports - infrastructure interfaces) are declared here.
pub mod outbound;
