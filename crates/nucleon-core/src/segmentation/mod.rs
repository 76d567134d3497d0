pub mod background;
pub mod components;
pub mod config;
pub mod foreground;
pub mod morphology;
pub mod threshold;

pub use background::{correct_background, BackgroundCorrection};
pub use components::{label_components, LabelImage};
pub use config::{Connectivity, SegmentationConfig, ThresholdReference};
pub use foreground::segment_foreground;
