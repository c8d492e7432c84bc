pub mod anonymize;
pub mod clean;
pub mod io;
pub mod map_fxn;
pub mod table;
pub mod utils;
pub mod wordlists;

pub use map_fxn::DataProcessor;
pub use table::Table;
