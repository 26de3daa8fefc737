pub mod fetch_render;
pub mod loading;
