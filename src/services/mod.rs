pub mod image_io;
pub mod mean_pipeline;
pub mod picker;
pub mod recolor_pipeline;

pub use mean_pipeline::{generate_mean_image, MeanReport};
pub use picker::{DirectoryPicker, FixedDirectory, PromptPicker};
pub use recolor_pipeline::{generate_images, generate_images_with_cancel, GenerationReport};
