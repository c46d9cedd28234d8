pub mod matching;
pub mod procurement;
