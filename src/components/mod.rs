// DOM components interpreting the declarative render descriptions.

pub mod place_panel;
pub mod popup;
pub mod results_panel;
