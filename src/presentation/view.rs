use crate::application::App;
use crate::domain::{Item, format_price};
use crate::infrastructure::SnapshotStore;

/// One line per item, numbered from 1, purchased items ticked.
pub fn render_item(position: usize, item: &Item) -> String {
    let tick = if item.selected { "x" } else { " " };
    format!(
        "{:>3}. [{}] {} {}",
        position + 1,
        tick,
        item.name,
        format_price(item.price)
    )
}

pub fn render_list<S: SnapshotStore>(app: &App<S>) -> Vec<String> {
    let mut lines: Vec<String> = if app.list().is_empty() {
        vec!["Your shopping list is empty".to_string()]
    } else {
        app.list()
            .iter()
            .enumerate()
            .map(|(position, item)| render_item(position, item))
            .collect()
    };
    lines.extend(render_total(app));
    lines
}

pub fn render_total<S: SnapshotStore>(app: &App<S>) -> Vec<String> {
    let mut lines = vec![
        format!("Total: {}", format_price(app.total())),
        format!("Your spending limit is {}", app.spending_limit),
    ];
    if app.is_over_limit() {
        lines.push("Over limit".to_string());
    }
    lines
}

pub fn help_lines() -> Vec<String> {
    [
        "name <text>         set the item name",
        "price <amount>      set the item price",
        "add                 add the item entered with name/price",
        "add <name> <price>  add an item directly",
        "remove <n>          remove item n",
        "up <n> / down <n>   move item n up or down",
        "tick <n>            mark item n purchased (or unmark it)",
        "list                show the list",
        "total               show the total and spending limit",
        "email               print a mailto link for the list",
        "quit                save and exit",
    ]
    .iter()
    .map(|line| line.to_string())
    .collect()
}
