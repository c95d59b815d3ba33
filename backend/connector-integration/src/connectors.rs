pub mod globalcollect;
pub use self::globalcollect::GlobalCollect;

pub mod moka;
pub use self::moka::Moka;
