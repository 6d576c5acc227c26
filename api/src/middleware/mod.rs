pub mod access_guard;
pub mod cors;
pub mod policy;

pub use access_guard::*;
pub use cors::*;
pub use policy::*;
