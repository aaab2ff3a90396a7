//! Pages in the console

mod index;
mod not_found;
mod not_logged_in;
mod patches;
mod software;
mod threats;
mod vulnerabilities;

pub use index::*;
pub use not_found::*;
pub use not_logged_in::*;
pub use patches::*;
pub use software::*;
pub use threats::*;
pub use vulnerabilities::*;
