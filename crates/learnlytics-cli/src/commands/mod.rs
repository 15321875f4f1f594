pub mod health;
pub mod init;
pub mod predict;
pub mod subjects;
