pub mod errors;
pub mod metrics;
pub mod routes;
pub mod startup;

pub use routes::{build_router, ServerState};
pub use startup::run;
