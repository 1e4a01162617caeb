pub mod email;
pub mod wire;
