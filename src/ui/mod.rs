pub mod icons;
pub mod output;
pub mod progress;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{category_icon, dim, header, section, status, success, summary_row, term_list, warn};
pub use progress::Spinner;
pub use table::{component_table, ranked_table, stats_table, TableBuilder};
pub use theme::{theme, Theme};
