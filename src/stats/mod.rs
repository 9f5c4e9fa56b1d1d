pub mod friendly;
pub mod number_format;
pub mod statistical_summary;

pub use friendly::StatisticalSummaryFriendly;
pub use statistical_summary::StatisticalSummary;
