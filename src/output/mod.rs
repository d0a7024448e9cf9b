pub mod formatter;

pub use formatter::{
    format_json, format_quals_curve, format_table, format_tsv, should_use_colors, team_number,
};
