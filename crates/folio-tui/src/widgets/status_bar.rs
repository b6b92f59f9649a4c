use folio_core::layout::ColumnMode;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::theme::to_color;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let colors = app.colors();
        // Inverted page colours
        let style = Style::default()
            .fg(to_color(colors.background))
            .bg(to_color(colors.text));

        let status_text = match (&app.status_message, &app.layout_error) {
            (Some(msg), _) => format!(" {}", msg),
            (None, Some(err)) => format!(" {}", err),
            (None, None) => Self::position_text(app),
        };

        let help_hint = " q:quit h/l:page [/]:chapter c:columns t:theme ";
        let used = status_text.chars().count() + help_hint.len();
        let padding_len = (area.width as usize).saturating_sub(used);

        let line = Line::from(vec![
            Span::styled(status_text, style),
            Span::styled(" ".repeat(padding_len), style),
            Span::styled(help_hint, style),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }

    fn position_text(app: &App) -> String {
        let state = &app.state;
        let Some(chapter) = state.current_chapter() else {
            return " No book".to_string();
        };
        let mode = match state.column_mode {
            ColumnMode::Single => "SINGLE",
            ColumnMode::Double => "DOUBLE",
        };
        format!(
            " {} | {}/{} | {} | {}",
            chapter.title,
            state.position.page_index + 1,
            state.max_page_index() + 1,
            mode,
            state.settings.theme
        )
    }
}
