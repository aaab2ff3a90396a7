pub mod async_state_renderer;
pub mod backend;
pub mod chat;
pub mod common;
pub mod confirm;
pub mod cvss;
pub mod severity;
pub mod table_wrapper;
pub mod time;
pub mod toolbar;
