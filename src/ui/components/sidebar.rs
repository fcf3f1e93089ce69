use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{List, ListItem, Widget},
};

use crate::{ui::state::ViewState, util::colors};

pub struct Sidebar {
    current: ViewState,
}

impl Sidebar {
    pub fn new(current: ViewState) -> Self {
        Self { current }
    }
}

impl Widget for Sidebar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = ViewState::ALL
            .iter()
            .enumerate()
            .map(|(i, view)| {
                let style = if *view == self.current {
                    Style::default()
                        .fg(colors::PRIMARY)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors::NEUTRAL)
                };
                ListItem::new(format!(" {} {}  {}", i + 1, view.icon(), view.title())).style(style)
            })
            .collect();

        List::new(items).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlights_current_view() {
        let area = Rect::new(0, 0, 24, 4);
        let mut buf = Buffer::empty(area);
        Sidebar::new(ViewState::Library).render(area, &mut buf);

        let row = |y: u16| -> String {
            (0..area.width)
                .map(|x| buf[(x, y)].symbol().to_string())
                .collect()
        };
        assert!(row(2).contains("Your Library"));
        assert_eq!(buf[(1, 2)].fg, colors::PRIMARY);
        assert_eq!(buf[(1, 0)].fg, colors::NEUTRAL);
    }
}
