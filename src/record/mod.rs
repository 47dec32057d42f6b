pub mod any;
pub mod map;
pub mod object;
pub mod traits;

pub use any::AnyRecord;
pub use map::DynamicMap;
pub use object::ImmutableDynamicObj;
pub use traits::DynamicRecord;
