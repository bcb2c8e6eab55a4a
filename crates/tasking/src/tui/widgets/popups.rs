use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

use tasking_app::TaskStore;

use super::super::constants::{DIALOG_HEIGHT, DIALOG_MIN_WIDTH, DIALOG_WIDTH_PERCENT};
use super::super::view::{DialogKind, Ui};

impl<S: TaskStore> Ui<S> {
    pub(in crate::tui) fn draw_dialog_popup(&self, f: &mut Frame<'_>) {
        let Some(dialog) = &self.dialog else {
            return;
        };
        let area = f.area();

        let mut popup_width = (area.width * DIALOG_WIDTH_PERCENT) / 100;
        popup_width = popup_width.max(DIALOG_MIN_WIDTH).min(area.width);
        let popup_height = DIALOG_HEIGHT.min(area.height);
        let popup_x = area.width.saturating_sub(popup_width) / 2;
        let popup_y = area.height.saturating_sub(popup_height) / 2;
        let popup_area = Rect {
            x: popup_x,
            y: popup_y,
            width: popup_width,
            height: popup_height,
        };

        let title = match dialog.kind {
            DialogKind::AddTask => "New task (Enter: confirm, Esc: cancel)",
            DialogKind::ImportPath => "Import file path (Enter: confirm, Esc: cancel)",
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        f.render_widget(Clear, popup_area);
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        let input = Paragraph::new(Line::from(format!("{}█", dialog.input)));
        f.render_widget(input, inner);
    }
}
