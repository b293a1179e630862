pub mod scan;
pub mod zfs;
