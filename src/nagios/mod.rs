pub mod overall;
pub mod status;

pub use overall::Overall;
pub use status::Status;
