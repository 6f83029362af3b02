/// The endpoints the client talks to, with their per-endpoint error policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    AnalyzeStore,
    AnalyzeCompetitors,
    ExportData,
    DownloadFile,
    Health,
    ServiceInfo,
}

impl Operation {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Operation::AnalyzeStore => "analyze-store",
            Operation::AnalyzeCompetitors => "analyze-competitors",
            Operation::ExportData => "export-data",
            Operation::DownloadFile => "download-file",
            Operation::Health => "health",
            Operation::ServiceInfo => "service-info",
        }
    }

    /// Message used when a non-2xx response carries no usable `detail`.
    pub(crate) fn fallback_message(self) -> &'static str {
        match self {
            Operation::AnalyzeStore => "Failed to analyze store",
            Operation::AnalyzeCompetitors => "Failed to analyze competitors",
            Operation::ExportData => "Failed to export data",
            Operation::DownloadFile => "Failed to download file",
            Operation::Health => "Health check failed",
            Operation::ServiceInfo => "Failed to fetch service info",
        }
    }

    /// Binary downloads never carry a structured error body.
    pub(crate) fn reads_error_detail(self) -> bool {
        !matches!(self, Operation::DownloadFile)
    }
}
