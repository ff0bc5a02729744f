mod result_ext;
pub use result_ext::*;

mod latest;
pub use latest::*;

mod throttle;
pub use throttle::*;

mod observers;
pub use observers::*;
