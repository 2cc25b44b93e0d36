pub mod audio;
pub mod controller;
pub mod timeline;
pub mod view;
