// Canvas adapter: draws the map surface and the current graphics scopes.

pub mod renderer;
pub mod shapes;

pub use renderer::refresh;
