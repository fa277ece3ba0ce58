#[macro_use]
mod util;

mod missing;
mod dates;
mod errors;
