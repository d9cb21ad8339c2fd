pub mod icons;
pub mod output;
pub mod progress;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{config_written, history, review, serving, suggestions};
pub use progress::Spinner;
pub use table::history_table;
pub use theme::{theme, Theme};
