pub mod chat;
pub mod patch;
pub mod software;
pub mod threat;
pub mod vendor;
pub mod vuln;

pub mod prelude {
    pub use crate::chat::*;
    pub use crate::patch::*;
    pub use crate::software::*;
    pub use crate::threat::*;
    pub use crate::vendor::*;
    pub use crate::vuln::*;
}
