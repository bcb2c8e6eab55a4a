use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use tasking_app::TaskStore;

use super::super::view::Ui;

const INSTRUCTIONS: &str =
    "j/k: move  Space: cycle  n: new  d: delete  y: copy  i: import  x: export  r: reload  q: quit";

impl<S: TaskStore> Ui<S> {
    pub(in crate::tui) fn draw_status(&self, f: &mut Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(Self::INSTRUCTIONS_HEIGHT),
                Constraint::Length(Self::STATUS_MESSAGE_HEIGHT),
            ])
            .split(area);

        let instructions = Paragraph::new(Line::from(INSTRUCTIONS))
            .block(Block::default().title("Keys").borders(Borders::ALL));
        f.render_widget(instructions, chunks[0]);

        let message = self.message.as_ref().map_or_else(
            || Paragraph::new(""),
            |msg| Paragraph::new(Line::from(msg.text.as_str())).style(msg.style()),
        );
        let message = message.block(Block::default().title("Status").borders(Borders::ALL));
        f.render_widget(message, chunks[1]);
    }
}
