pub mod human;
pub mod units;

pub use human::{humanize, Humanized};
pub use units::{convert, Unit, UnitSystem};
