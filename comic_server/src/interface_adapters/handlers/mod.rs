pub mod dialogue;
pub mod generate;
pub mod upload;

pub use dialogue::generate_dialogue;
pub use generate::{generate_cover, generate_multi};
pub use upload::upload_asset;
