pub mod finding_fan_out;

pub use finding_fan_out::FindingFanOut;
