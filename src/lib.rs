pub mod boilerplate;
pub mod environment;
pub mod lexicon;
pub mod logging;
pub mod nlp;
pub mod orientation;
pub mod pipeline;
pub mod table;
pub mod tokens;
pub mod tone;

pub const TARGET_LOADER: &str = "loader";
pub const TARGET_BOILERPLATE: &str = "boilerplate";
pub const TARGET_ORIENTATION: &str = "orientation";
pub const TARGET_TONE: &str = "tone";
pub const TARGET_TOKENS: &str = "tokens";
pub const TARGET_WRITER: &str = "writer";
pub const TARGET_PIPELINE: &str = "pipeline";

/// Column appended by the orientation stage.
pub const ORIENTATION_COLUMN: &str = "Political_Orientation";

/// Columns that only exist as bookkeeping from earlier exports and are never written.
pub const BOOKKEEPING_COLUMNS: &[&str] = &["index", "Unnamed: 0", "merge_index", "X", "length"];

/// The control exports carry a meaningful `index` column, so it is kept there.
pub const CONTROL_BOOKKEEPING_COLUMNS: &[&str] = &["Unnamed: 0", "merge_index", "X", "length"];
