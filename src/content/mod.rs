//! Content module - reads template documents

mod frontmatter;

pub use frontmatter::{FieldValue, FrontMatter, LAST_COMMIT_DATE_KEY};
