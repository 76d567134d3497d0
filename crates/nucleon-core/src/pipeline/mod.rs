pub mod config;
mod layout;
mod orchestrator;
mod types;

pub use layout::OutputLayout;
pub use orchestrator::{
    analyze_image, discover_images, image_id_for, process_image, run_batch, run_batch_reported,
};
pub use types::{
    BatchReport, ImageAnalysis, ImageFailure, ImageRecord, PipelineStage, ProgressReporter,
};
