pub mod search;
pub mod storage;
