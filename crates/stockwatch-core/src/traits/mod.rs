pub mod report_log;

pub use report_log::IReportLog;
