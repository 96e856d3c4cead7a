use console::Style;
use once_cell::sync::Lazy;

pub static INDEX: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static CURRENT: Lazy<Style> = Lazy::new(|| Style::new().green().bold());
pub static TITLE: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static TIME: Lazy<Style> = Lazy::new(|| Style::new().color256(247).italic());
pub static NODE_ID: Lazy<Style> = Lazy::new(|| Style::new().color256(242));
pub static CONTAINER: Lazy<Style> = Lazy::new(|| Style::new().cyan());
pub static DROP_ZONE: Lazy<Style> = Lazy::new(|| Style::new().magenta().dim());
pub static PLACEHOLDER: Lazy<Style> = Lazy::new(|| Style::new().dim().italic());
pub static EMPTY: Lazy<Style> = Lazy::new(|| Style::new().red().dim());
