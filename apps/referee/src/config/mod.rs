pub mod referee;

pub use referee::RefereeConfig;
