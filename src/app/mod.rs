mod navigation;
mod root;

pub use navigation::{Navigator, Page};
pub use root::App;
