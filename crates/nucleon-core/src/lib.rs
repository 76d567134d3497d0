pub mod consts;
pub mod error;
pub mod io;
pub mod measure;
pub mod pipeline;
pub mod raw_image;
pub mod segmentation;
pub mod visualize;
