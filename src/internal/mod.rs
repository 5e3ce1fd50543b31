pub mod data;
pub mod marquee;
pub mod models;
pub mod notification;
pub mod spotlight;
pub mod ui;
