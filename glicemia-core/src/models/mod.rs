mod record;

pub use record::{parse_level, sort_descending, GlicemiaRecord};
