pub mod packer;
pub mod search;
pub mod waste;
