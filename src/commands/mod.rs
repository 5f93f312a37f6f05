pub mod images;
pub mod list;
pub mod ps;
pub mod upgrade;

pub use images::*;
pub use list::*;
pub use ps::*;
pub use upgrade::*;
