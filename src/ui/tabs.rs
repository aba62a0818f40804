use iced::Element;
use iced_aw::{TabBar, TabLabel};

use crate::Message;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MainTab {
    #[default]
    Welcome,
    Settings,
    NewCollection,
    AddOne,
    AddBulk,
    Download,
    Search,
    Delete,
}

pub const ALL_TABS: &[MainTab] = &[
    MainTab::Welcome,
    MainTab::Settings,
    MainTab::NewCollection,
    MainTab::AddOne,
    MainTab::AddBulk,
    MainTab::Download,
    MainTab::Search,
    MainTab::Delete,
];

impl MainTab {
    pub const fn label(self) -> &'static str {
        match self {
            MainTab::Welcome => "Welcome",
            MainTab::Settings => "Settings",
            MainTab::NewCollection => "New Collection",
            MainTab::AddOne => "Add One",
            MainTab::AddBulk => "Add Bulk",
            MainTab::Download => "Download",
            MainTab::Search => "Search",
            MainTab::Delete => "Delete",
        }
    }

    /// One-line description shown on the Welcome tab.
    pub const fn summary(self) -> &'static str {
        match self {
            MainTab::Welcome => "This tab",
            MainTab::Settings => "Application settings (not persistent)",
            MainTab::NewCollection => "Create a new collection",
            MainTab::AddOne => "Add one item to the collection",
            MainTab::AddBulk => "Add multiple items to the collection",
            MainTab::Download => "Download a collection as an Excel file",
            MainTab::Search => "Search for items in the collection",
            MainTab::Delete => "Delete items from the collection",
        }
    }

    pub const fn is_implemented(self) -> bool {
        matches!(
            self,
            MainTab::Welcome | MainTab::Settings | MainTab::NewCollection | MainTab::AddOne
        )
    }
}

pub fn tab_bar(active: MainTab) -> Element<'static, Message> {
    let mut bar: TabBar<'static, Message, MainTab> = TabBar::new(Message::TabSelected);
    for tab in ALL_TABS {
        bar = bar.push(*tab, TabLabel::Text(tab.label().to_string()));
    }
    bar.set_active_tab(&active).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_are_declared_in_window_order() {
        let labels: Vec<_> = ALL_TABS.iter().map(|tab| tab.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Welcome",
                "Settings",
                "New Collection",
                "Add One",
                "Add Bulk",
                "Download",
                "Search",
                "Delete"
            ]
        );
    }

    #[test]
    fn download_summary_names_excel_export() {
        assert_eq!(MainTab::Download.summary(), "Download a collection as an Excel file");
        assert_eq!(MainTab::Settings.summary(), "Application settings (not persistent)");
    }

    #[test]
    fn only_first_four_tabs_have_content() {
        let implemented: Vec<_> =
            ALL_TABS.iter().copied().filter(|tab| tab.is_implemented()).collect();
        assert_eq!(&implemented[..], &ALL_TABS[..4]);
    }
}
