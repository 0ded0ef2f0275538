pub mod descriptor;
pub mod literal;
pub mod runtime_abi;
pub mod signature;
