pub mod affine;
pub mod mapper;
pub mod pointer;

pub use affine::*;
pub use mapper::*;
pub use pointer::*;
