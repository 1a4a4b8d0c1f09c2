mod customer;

pub use self::customer::*;
