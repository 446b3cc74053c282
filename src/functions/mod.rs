pub mod primitives;
pub mod registry;
pub mod traits;

pub use registry::FunctionTable;
pub use traits::{FnPrimitive, Primitive};
