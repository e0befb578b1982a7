pub mod default_skins;
pub mod skin_loader;
