pub mod ids;
pub mod password;
