//! The stroke model: lifecycle, erasing and the scene that holds the results.

mod stroke;
pub use stroke::*;

mod scene;
pub use scene::*;

mod erase;
pub use erase::*;

mod machine;
pub use machine::*;

mod pipeline;
pub use pipeline::*;
