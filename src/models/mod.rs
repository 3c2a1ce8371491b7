mod pagination;
mod state;
mod status_check;

pub use pagination::{ListQuery, Page};
pub use state::AppState;
pub use status_check::{CreateStatusCheckRequest, StatusCheck};
