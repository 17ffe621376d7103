pub mod field;
pub mod identity;
pub mod node;
pub mod wire;

pub use field::*;
pub use identity::*;
pub use node::*;
pub use wire::*;
