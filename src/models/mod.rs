mod indicator;
mod state;

pub use indicator::{IndicatorRequest, IndicatorUpdate, MessageResponse};
pub use state::AppState;
