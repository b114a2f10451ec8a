pub mod report_processor;

pub use report_processor::ReportProcessor;
