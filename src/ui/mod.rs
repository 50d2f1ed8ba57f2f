//! User interface: level select, HUD buttons, session menus, inventory bar.

mod buttons;
mod hud;
mod inventory;
mod level_select;
mod menus;
mod plugin;
mod title;

pub use buttons::CommandButton;
pub use inventory::InventoryCache;
pub use level_select::LevelButton;
pub use menus::{MenuPart, MenuSlot, MenuWidget};
pub use plugin::UiPlugin;
pub use title::title_alpha;
