pub mod csv_io;
pub mod image_io;
pub mod tiff_io;

pub use csv_io::{read_measurements, write_measurements};
pub use image_io::save_rgb_png;
pub use tiff_io::{load_label_tiff, load_raw_image, save_label_tiff};
