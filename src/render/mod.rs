// Declarative render layer: turns service outcomes into graphics, popup and
// panel descriptions. The DOM/canvas adapters interpret these; nothing here
// touches the document.

pub mod renderer;

pub use renderer::*;
