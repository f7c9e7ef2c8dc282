use crate::component::Category;
use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

pub fn header(text: &str) {
    println!("{} {}", Icons::ROCKET, text.style(theme().header.clone()));
}

pub fn status(icon: &str, label: &str, value: &str) {
    println!("{} {}: {}", icon, label.style(theme().dim.clone()), value);
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn section(title: &str) {
    println!();
    println!("━{}━", title.style(theme().header.clone()));
}

pub fn dim(text: &str) -> String {
    text.style(theme().dim.clone()).to_string()
}

pub fn summary_row(label: &str, value: &str) {
    println!("  {} {}", label.style(theme().dim.clone()), value);
}

/// Icon shown next to a component of the given tier
pub fn category_icon(category: Category) -> &'static str {
    match category {
        Category::Atom => Icons::ATOM,
        Category::Molecule => Icons::PUZZLE,
        Category::Organism => Icons::LAYOUT,
    }
}

/// Comma-separated term list, or a dimmed dash when empty
pub fn term_list(terms: &[String]) -> String {
    if terms.is_empty() {
        dim("-")
    } else {
        terms.join(", ")
    }
}
