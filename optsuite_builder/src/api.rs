mod descriptor;
mod extract;

pub use descriptor::*;
pub use extract::*;
