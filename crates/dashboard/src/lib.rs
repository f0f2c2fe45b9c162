//! Dashboard data orchestration: campaign loading with a demo-data safety
//! net, chart time-range refetching, clip eligibility filtering, and
//! time-series projection.

pub mod demo;
pub mod filter;
pub mod loader;
pub mod projector;
pub mod time_range;
pub mod viewmodel;

pub use demo::DemoDataGenerator;
pub use filter::{clip_is_displayable, displayable_clips};
pub use loader::CampaignDataLoader;
pub use projector::project;
pub use time_range::TimeRangeController;
pub use viewmodel::{DataSource, ViewModel};
