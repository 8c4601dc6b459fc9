//! Modal notification presenter

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    Info,
    Error,
    Success,
}

impl Category {
    /// Header class applied to the modal
    pub fn class(self) -> &'static str {
        match self {
            Category::Info => "info",
            Category::Error => "error",
            Category::Success => "success",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Category::Info => "fa-info-circle",
            Category::Error => "fa-exclamation-circle",
            Category::Success => "fa-check-circle",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub category: Category,
    pub visible: bool,
}

/// Single modal slot. A new `show` overwrites whatever is displayed.
#[derive(Debug, Default)]
pub struct NotificationPresenter {
    current: Notification,
}

impl NotificationPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, title: &str, message: &str, category: Category) {
        self.current = Notification {
            title: title.to_string(),
            message: message.to_string(),
            category,
            visible: true,
        };
    }

    pub fn dismiss(&mut self) {
        self.current.visible = false;
    }

    pub fn current(&self) -> &Notification {
        &self.current
    }

    /// While visible the modal blocks the rest of the page
    pub fn is_blocking(&self) -> bool {
        self.current.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_and_dismiss() {
        let mut presenter = NotificationPresenter::new();
        assert!(!presenter.is_blocking());

        presenter.show("Calculation Error", "no route found", Category::Error);
        let n = presenter.current();
        assert_eq!(n.message, "no route found");
        assert_eq!(n.category.icon(), "fa-exclamation-circle");
        assert!(presenter.is_blocking());

        presenter.dismiss();
        assert!(!presenter.is_blocking());
    }

    #[test]
    fn test_second_show_overwrites() {
        let mut presenter = NotificationPresenter::new();
        presenter.show("First", "one", Category::Info);
        presenter.show("Second", "two", Category::Success);

        let n = presenter.current();
        assert_eq!(n.title, "Second");
        assert_eq!(n.category, Category::Success);
        assert_eq!(n.category.class(), "success");
        presenter.dismiss();
        assert!(!presenter.current().visible);
    }
}
