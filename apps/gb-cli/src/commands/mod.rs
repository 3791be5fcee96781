pub mod board;
pub mod goal;
pub mod serve;
