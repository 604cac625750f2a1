pub mod fetcher;
pub mod http;
pub mod mailer;
pub mod openai;
pub mod pipeline;

pub use fetcher::PageFetcher;
pub use mailer::Mailer;
pub use openai::ReportGenerator;
pub use pipeline::{CreatedReport, ReportPipeline};
