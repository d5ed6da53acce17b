pub mod classifier;
pub mod scheme;

pub use classifier::{classify, matching_rule, Matcher, Rule, RULES};
pub use scheme::{generate_name, novel_id_of, sanitize, FileName, NamingError, TIMESTAMP_FORMAT};
