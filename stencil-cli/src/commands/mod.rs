pub mod compile;
pub mod key;
pub mod render;
pub mod status;
pub mod warm;
