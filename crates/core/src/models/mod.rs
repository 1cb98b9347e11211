pub mod chart;
pub mod coin;
pub mod favorites;
pub mod price;
pub mod request;
pub mod route;
pub mod settings;
pub mod sort;
pub mod view;
