use webhook::WebhookPayload;

use super::NewsItem;

const HEADLINE: &str = "New news items detected!";
const BANNER_WIDTH: usize = 62;

/// Summary of a detected batch of new items
#[derive(Debug, Clone)]
pub struct Alert {
    pub new_items: Vec<NewsItem>,
    pub previous_count: usize,
    pub current_count: usize,
    pub previous_id: Option<String>,
    pub current_id: Option<String>,
}

impl Alert {
    pub fn new(
        new_items: Vec<NewsItem>,
        previous_count: usize,
        current_count: usize,
        previous_id: Option<String>,
        current_id: Option<String>,
    ) -> Self {
        Self {
            new_items,
            previous_count,
            current_count,
            previous_id,
            current_id,
        }
    }

    /// Format: "Count: {previous} → {current} (+{delta})"
    pub fn count_line(&self) -> String {
        format!(
            "Count: {} → {} (+{})",
            self.previous_count,
            self.current_count,
            self.current_count.saturating_sub(self.previous_count)
        )
    }

    /// Format: "Latest ID: {previous} → {current}"
    pub fn id_line(&self) -> String {
        format!(
            "Latest ID: {} → {}",
            display_id(self.previous_id.as_deref()),
            display_id(self.current_id.as_deref())
        )
    }

    /// One line per new item, numbered from 1
    pub fn item_lines(&self, id_field: &str) -> Vec<String> {
        self.new_items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                format!(
                    "New item {}: {} (ID: {}, Date: {})",
                    i + 1,
                    item.title().unwrap_or("(untitled)"),
                    display_id(item.id(id_field).as_deref()),
                    item.date().unwrap_or("-")
                )
            })
            .collect()
    }

    pub fn to_payload(&self) -> WebhookPayload {
        WebhookPayload::new(HEADLINE, self.count_line(), self.id_line())
    }

    /// Boxed multi-line banner for the console
    pub fn banner(message: &str) -> String {
        let rule = "═".repeat(BANNER_WIDTH);
        let title = "ALERT!";
        format!(
            "\n╔{rule}╗\n║{title:^width$}║\n╠{rule}╣\n║ {message:<inner$} ║\n╚{rule}╝",
            width = BANNER_WIDTH,
            inner = BANNER_WIDTH - 2,
        )
    }
}

fn display_id(id: Option<&str>) -> &str {
    id.unwrap_or("none")
}
