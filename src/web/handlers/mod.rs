pub mod linkedin_handlers;
pub mod session_handlers;
pub mod system_handlers;

pub use linkedin_handlers::*;
pub use session_handlers::*;
pub use system_handlers::*;
