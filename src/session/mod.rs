pub mod timer;
pub mod view;
