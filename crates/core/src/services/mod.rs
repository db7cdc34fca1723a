mod listing;
mod submission;

pub use listing::*;
pub use submission::*;
