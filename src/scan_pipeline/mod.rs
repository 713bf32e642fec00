/// Domain layer for the commit-to-report pipeline
///
/// Pure business logic: run identity, manifest states, findings, report rows,
/// the stage state machine, and the fan-out rules that turn findings into rows.
pub mod domain;
pub mod policies;
pub mod services;
