pub mod config;
pub mod error;
pub mod notice;
pub mod result;

pub use config::{AppConfig, PositionWrites};
pub use error::BoardError;
pub use notice::{Notice, NoticeLevel, NoticeSink};
pub use result::BoardResult;
