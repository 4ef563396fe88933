use comfy_table::{modifiers, presets, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};
use yansi::Paint;

use crate::provision::UserRegistry;

/// 80-column banner around a cyan message.
pub fn print_header(message: &str) {
    println!("{}", "-".repeat(80));
    println!("{}", Paint::new(message).cyan());
    println!("{}", "-".repeat(80));
}

/// One labeled block per surviving record, every field on its own line.
pub fn render_users(registry: &UserRegistry) -> String {
    let mut out = String::new();
    for user in registry.iter() {
        out.push_str("----- USER\n");
        out.push_str(&format!("username: {}\n", user.username));
        out.push_str(&format!("password: {}\n", user.password));
        out.push_str(&format!("email: {}\n", user.email));
        out.push_str(&format!("id: {}\n", user.id));
        out.push_str(&format!("token: {}\n", user.token));
    }
    out
}

pub fn print_users(registry: &UserRegistry) {
    print!("{}", render_users(registry));
}

/// Compact summary table after the field blocks.
pub fn print_summary(registry: &UserRegistry) {
    if registry.is_empty() {
        println!("{}", Paint::new("No users were provisioned.").yellow());
        return;
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }

    table.set_header(vec!["Username", "Email", "ID", "Token"]);
    for user in registry.iter() {
        let token_state = if user.token.is_empty() { "missing" } else { "issued" };
        table.add_row(vec![&user.username, &user.email, &user.id, token_state]);
    }
    println!("\n{table}\n");
}
