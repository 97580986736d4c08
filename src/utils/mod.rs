pub mod abi;
pub mod helper;
