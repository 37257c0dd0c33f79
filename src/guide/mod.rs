//! Printable guest guides: the property record, the sections printed from it,
//! the paginated layout and the name the result is saved under.

mod filename;
pub use filename::*;

mod record;
pub use record::*;

mod render;
pub use render::*;

mod sections;
pub use sections::*;
