//! Plain-text views shared by the terminal front-ends.

use crate::types::cart::{CartItem, cart_quantity, cart_total};
use crate::types::menu::{MenuItem, group_by_category};
use crate::types::order::Order;
use crate::types::order_status::{OrderTimeline, StepState};
use crate::types::restaurant_info::Restaurant;
use crate::types::review::{Review, average_rating};
use crate::utils::{format_cents, format_currency, format_timestamp};
use crate::constants::DEFAULT_CURRENCY;
use colored::*;

pub fn welcome(role: &str) -> String {
    format!(
        "{}\n{}",
        "BYTEats".bold().bright_red(),
        format!("{role} terminal, type 'help' for commands").dimmed()
    )
}

fn step_marker(state: StepState) -> ColoredString {
    match state {
        StepState::Completed => "[x]".green(),
        StepState::Current => "[>]".yellow().bold(),
        StepState::Pending => "[ ]".dimmed(),
        StepState::Cancelled => "[-]".red(),
    }
}

/// One line per order: short id, status badge, total and date.
pub fn order_line(order: &Order) -> String {
    format!(
        "#{}  {:<12} {:>10}  {}",
        order.short_id(),
        order.status.label().color(order.status.badge_color()).bold(),
        format_cents(order.total_price),
        format_timestamp(order.created_at).dimmed()
    )
}

pub fn order_list(title: &str, orders: &[Order]) -> String {
    if orders.is_empty() {
        return format!("{title}: none");
    }
    let mut out = format!("{}", title.bold());
    for order in orders {
        out.push_str("\n  ");
        out.push_str(&order_line(order));
    }
    out
}

/// Detail view: items plus the milestone timeline.
pub fn order_detail(order: &Order, timeline: &OrderTimeline) -> String {
    let mut out = format!("{}\n", order_line(order));
    for item in &order.items {
        out.push_str(&format!(
            "  {} x{}  {}\n",
            item.name,
            item.quantity,
            format_cents(item.price * f64::from(item.quantity))
        ));
    }
    if timeline.is_cancelled() {
        out.push_str(&format!("  {}\n", "This order was cancelled".red()));
    }
    for (milestone, state) in timeline.steps() {
        out.push_str(&format!(
            "  {} {:<10} {}\n",
            step_marker(state),
            milestone.title(),
            milestone.caption(&order.status, order.updated_at).dimmed()
        ));
    }
    out.trim_end().to_string()
}

pub fn cart(items: &[CartItem]) -> String {
    if items.is_empty() {
        return "Your cart is empty".to_string();
    }
    let mut out = String::new();
    for line in items {
        out.push_str(&format!(
            "  {:<24} x{:<3} {:>10}   ({})\n",
            line.item.name,
            line.quantity,
            format_currency(line.line_total(), DEFAULT_CURRENCY),
            line.item.id.dimmed()
        ));
    }
    out.push_str(&format!(
        "  {} items, total {}",
        cart_quantity(items),
        format_currency(cart_total(items), DEFAULT_CURRENCY).bold()
    ));
    out
}

pub fn menu(items: &[MenuItem]) -> String {
    if items.is_empty() {
        return "No menu items yet".to_string();
    }
    let mut out = String::new();
    for (category, dishes) in group_by_category(items) {
        out.push_str(&format!("{}\n", category.bold().underline()));
        for dish in dishes {
            out.push_str(&format!(
                "  {:<24} {:>10}  {}\n    {}\n",
                dish.name,
                format_currency(dish.price, DEFAULT_CURRENCY),
                dish.id.dimmed(),
                dish.description.dimmed()
            ));
        }
    }
    out.trim_end().to_string()
}

pub fn restaurants(list: &[Restaurant]) -> String {
    if list.is_empty() {
        return "No restaurants found".to_string();
    }
    list.iter()
        .map(|r| format!("  {:<28} {:<16} {}", r.name.bold(), r.location, r.id.dimmed()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn reviews(list: &[Review]) -> String {
    let Some(average) = average_rating(list) else {
        return "No reviews yet".to_string();
    };
    let mut out = format!("Average rating {average:.1}/5 ({} reviews)", list.len());
    for review in list {
        out.push_str(&format!(
            "\n  {} {}  {}",
            "*".repeat(usize::from(review.rating)).yellow(),
            review.customer_name.bold(),
            review.review_text
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::order::fixtures::order;
    use crate::types::order_status::OrderStatus;

    #[test]
    fn test_order_detail_lists_every_milestone() {
        colored::control::set_override(false);
        let order = order("665f1c2e9b1d4a0012ab34cd", OrderStatus::Delivering);
        let text = order_detail(&order, &order.timeline());
        assert!(text.contains("#ab34cd"));
        assert!(text.contains("[x] Processing"));
        assert!(text.contains("[>] Shipped"));
        assert!(text.contains("[ ] Delivered"));
        assert!(text.contains("Pending delivery"));
    }

    #[test]
    fn test_empty_views() {
        assert_eq!(cart(&[]), "Your cart is empty");
        assert_eq!(reviews(&[]), "No reviews yet");
        assert_eq!(order_list("My orders", &[]), "My orders: none");
    }
}
