pub mod factor;
pub mod fft;
pub mod fftn;

mod utils;

mod kernel;
mod permute;

pub use factor::*;
pub use fft::*;
pub use fftn::*;

pub const SHOW_DEBUG: bool = false;
pub const PANIC_ON_ERROR: bool = false;
