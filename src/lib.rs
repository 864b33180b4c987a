extern crate byteorder;
extern crate framebuffer;
extern crate glob;
extern crate libc;
#[macro_use]
extern crate log;

pub mod canvas;
pub mod color;
pub mod display;
pub mod session;
pub mod settings;
pub mod stick;

pub use canvas::*;
pub use color::*;
pub use display::*;
pub use session::*;
pub use settings::*;
pub use stick::*;
