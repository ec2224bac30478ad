pub mod handlers;
pub mod router;
pub mod server;

pub use router::create_router;
pub use server::run_server;
