//! Users service outbound adapters.
//!
//! Both adapters talk to the same users service and can share one
//! long-lived `reqwest::Client`.

mod dto;
mod http_directory;
mod http_reporter;

pub use http_directory::HttpUserDirectory;
pub use http_reporter::HttpReceiptReporter;
