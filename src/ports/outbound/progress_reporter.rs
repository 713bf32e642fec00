/// ProgressReporter port for reporting pipeline progress
///
/// This is the run's only logging sink: use cases report stage
/// transitions, absorbed failures and per-finding progress through it,
/// and adapters decide where the lines end up (stderr, a test buffer...).
pub trait ProgressReporter {
    /// Reports a progress message
    ///
    /// # Arguments
    /// * `message` - The progress message to report
    fn report(&self, message: &str);

    /// Reports progress with a percentage
    ///
    /// # Arguments
    /// * `current` - Current progress value
    /// * `total` - Total expected value
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a failure that was absorbed (the run continues)
    fn report_warning(&self, message: &str);

    /// Reports an error that ends the run
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
