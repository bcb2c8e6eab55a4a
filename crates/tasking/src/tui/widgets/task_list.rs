use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

use tasking_app::TaskStore;

use super::super::constants::{TASK_LIST_HIGHLIGHT_SYMBOL, TASK_TEXT_MAX_GRAPHEMES};
use super::super::view::Ui;
use super::util::truncate_with_ellipsis;

impl<S: TaskStore> Ui<S> {
    pub(in crate::tui) fn draw_task_list(&self, f: &mut Frame<'_>, area: Rect) {
        let items: Vec<ListItem<'_>> = if self.app.has_tasks() {
            self.app
                .rows()
                .map(|row| {
                    let glyph = Span::raw(row.glyph);
                    let text = Span::styled(
                        truncate_with_ellipsis(row.text, TASK_TEXT_MAX_GRAPHEMES).into_owned(),
                        Style::default().add_modifier(Modifier::BOLD),
                    );
                    let id = Span::styled(
                        format!("({})", row.id),
                        Style::default().fg(Color::DarkGray),
                    );
                    ListItem::new(Line::from(vec![
                        glyph,
                        Span::raw(" "),
                        text,
                        Span::raw(" "),
                        id,
                    ]))
                })
                .collect()
        } else {
            vec![ListItem::new(Line::from("No tasks. Press n to add one"))]
        };

        let list = List::new(items)
            .block(Block::default().title("Tasks").borders(Borders::ALL))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol(TASK_LIST_HIGHLIGHT_SYMBOL);
        let mut state = ListState::default();
        if self.app.has_tasks() {
            state.select(Some(self.app.selected));
        }
        f.render_stateful_widget(list, area, &mut state);
    }
}
