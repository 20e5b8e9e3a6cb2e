// HTTP surface

mod light_state;

pub use light_state::{create_router, AppState};
