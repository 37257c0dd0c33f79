//! Paper formats. Sizes are portrait (width, height) in millimetres.

use crate::units::*;

/// Page dimensions as (width, height) in millimetres.
pub type PageSize = (Mm, Mm);

/// ISO 216 A4, the format of every guest-guide artefact
pub const A4: PageSize = (Mm(210.0), Mm(297.0));
