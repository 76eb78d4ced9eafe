pub mod backend;
pub mod store;
pub mod traits;

pub use backend::{BoardDocument, FileBoardBackend};
pub use store::*;
pub use traits::*;
