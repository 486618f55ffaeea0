mod companion;

pub use companion::Runtime;
