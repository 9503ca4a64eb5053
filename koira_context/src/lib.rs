pub mod headless;
pub mod host;
pub mod ids;
pub mod mode;

pub use headless::*;
pub use host::*;
pub use ids::*;
pub use mode::*;
