pub mod bar;
pub mod loader;

pub use bar::{Bar, BarError, Series, SeriesError};
pub use loader::{load_csv, select_series};
