/// ProgressReporter port for user-facing progress messages.
///
/// Reconciliation writes its report to stdout; everything about the
/// journey (loading lists, waiting for scans, archiving artifacts) goes
/// through this port so it can land on stderr without polluting the
/// report stream.
pub trait ProgressReporter {
    /// Reports a plain progress message.
    fn report(&self, message: &str);

    /// Reports that the application is waiting on an external scan,
    /// with the seconds waited so far and the last observed status.
    fn report_waiting(&self, waited_secs: u64, status: &str);

    /// Reports an error condition without aborting.
    fn report_error(&self, message: &str);

    /// Reports completion of a long-running step.
    fn report_completion(&self, message: &str);
}
