pub mod error;
pub mod game_object;
pub mod hook;
pub mod scene;
pub mod scene_path;

pub use error::*;
pub use game_object::*;
pub use hook::*;
pub use scene::*;
pub use scene_path::*;
