//! Reply texts.

use crate::domain::ExportLine;

pub const DONE_CALLBACK: &str = "done";
pub const DONE_BUTTON: &str = "✅ Picked up";

pub const ONLY_A_NUMBER: &str = "Please send me just a number (for example: 2)";
pub const THANKS_FOR_COLLECTING: &str = "✅ Thanks for picking up, enjoy every bite!";
pub const ADMIN_ONLY: &str = "⛔ This command is only available to the bot operator.";
pub const NEW_BATCH_USAGE: &str = "Send the command as: /newbatch 60";
pub const NO_ORDERS: &str = "No orders yet.";
pub const SOLD_OUT: &str = "❌ The cookies are sold out!\nHopefully there will be a fresh batch soon 🍪";
pub const STORAGE_FAILURE: &str = "Something went wrong while saving your order, please try again later.";

pub fn welcome(remaining: i64, pickup_address: &str) -> String {
    format!(
        "🍪 There are {} cookies available to order.\n\
         Send me a number (for example 2) and I'll put you down.\n\
         Pickup is at {}, please bring a box.",
        remaining, pickup_address
    )
}

pub fn only_available(remaining: i64) -> String {
    format!("Only {} cookies are available right now.", remaining)
}

pub fn order_recorded(pickup_address: &str) -> String {
    format!(
        "🎉 You're in! Your cookies will be ready for pickup at {}.\n\
         You can change the amount by sending a new number.\n\
         Once you've collected them, press the button below:",
        pickup_address
    )
}

pub fn new_batch_announcement(total: i64, pickup_address: &str, order_link: Option<&str>) -> String {
    let mut msg = format!(
        "🍪 *Fresh cookies!*\n\
         {} cookies are now available to order.\n\n\
         Pickup is at {}, please bring a box.\n\n",
        total, pickup_address
    );
    if let Some(link) = order_link {
        msg.push_str(&format!("📲 Order through the bot:\n{}\n\n", link));
    }
    msg.push_str("🙏 Please order what your family needs, so there is enough for everyone.");
    msg
}

pub fn report(lines: &[ExportLine]) -> String {
    if lines.is_empty() {
        return NO_ORDERS.to_string();
    }
    lines
        .iter()
        .map(|line| format!("{} – {} cookies", line.display, line.quantity))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_joins_lines() {
        let lines = vec![
            ExportLine { display: "[@dana](https://t.me/dana)".into(), quantity: 4 },
            ExportLine { display: "[Noa](tg://user?id=2)".into(), quantity: 1 },
        ];
        assert_eq!(
            report(&lines),
            "[@dana](https://t.me/dana) – 4 cookies\n[Noa](tg://user?id=2) – 1 cookies"
        );
        assert_eq!(report(&[]), NO_ORDERS);
    }

    #[test]
    fn test_announcement_link_is_optional() {
        let with_link = new_batch_announcement(30, "Main St 3", Some("https://t.me/CookieBot?start=start"));
        assert!(with_link.contains("30 cookies"));
        assert!(with_link.contains("https://t.me/CookieBot?start=start"));

        let without = new_batch_announcement(30, "Main St 3", None);
        assert!(!without.contains("Order through the bot"));
    }
}
