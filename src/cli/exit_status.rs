use std::process::ExitCode;

/// Exit status of a run.
///
/// - `Success` (0): every missing key was filled, or nothing was missing
/// - `Failure` (1): the run finished but some keys could not be translated
/// - `Error` (2): the run was aborted (unreadable baseline, bad config, write error, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    /// Some keys could not be translated and were left out.
    Failure,
    /// The run could not complete.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
