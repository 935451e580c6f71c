pub mod board;

pub use board::{BoardEvent, NoticeBoard, NOTICE_AUTO_CLOSE_MS};
