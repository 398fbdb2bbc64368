pub mod auto;
pub mod draw;
pub mod render;
pub mod setup;

pub use auto::run_auto;
pub use draw::{run_draw, DrawExit};
pub use setup::{run_setup, SetupExit};
