pub mod error;
pub mod handlers;
pub mod models;
pub mod store;

pub use error::DiaryError;
pub use models::DiaryEntry;
pub use store::DiaryStore;
