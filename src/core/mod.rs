pub mod error;
pub mod key;
pub mod value;

pub use error::{DynObjError, Result};
pub use key::KeyPolicy;
pub use value::{FromValue, Value};
