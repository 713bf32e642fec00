pub mod zero_advisory_policy;

pub use zero_advisory_policy::ZeroAdvisoryPolicy;
