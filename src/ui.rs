use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Cell, Clear, Paragraph, Row, Table},
};
use tracing::trace;

use crate::domain::TVConfig;
use crate::model::{HeaderView, Model, NoticeLevel, UIData};

pub const TITLE_HEIGHT: usize = 1;
pub const TABLE_HEADER_HEIGHT: usize = 1;
pub const CONTROL_BAR_HEIGHT: usize = 1;
pub const STATUSLINE_HEIGHT: usize = 1;
pub const COLUMN_WIDTH_MARGIN: usize = 1;
const COLUMN_SPACING: u16 = 1;

#[derive(Debug)]
struct Theme {
    header: Style,
    selected_header: Style,
    dragged_header: Style,
    selected_row: Style,
    selected_cell: Style,
    control_bar: Style,
    warning: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header: Style::new().add_modifier(Modifier::BOLD),
            selected_header: Style::new()
                .add_modifier(Modifier::BOLD)
                .add_modifier(Modifier::REVERSED),
            dragged_header: Style::new().fg(Color::Black).bg(Color::Yellow),
            selected_row: Style::new().bg(Color::DarkGray),
            selected_cell: Style::new().add_modifier(Modifier::REVERSED),
            control_bar: Style::new().fg(Color::Gray),
            warning: Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
        }
    }
}

#[derive(Debug)]
pub struct TableUI {
    theme: Theme,
    max_column_width: usize,
}

impl TableUI {
    pub fn new(config: &TVConfig) -> Self {
        Self {
            theme: Theme::default(),
            max_column_width: config.max_column_width,
        }
    }

    pub fn draw(&mut self, model: &Model, frame: &mut Frame) {
        let data = model.ui_data();
        let [title, table, control, status] = Layout::vertical([
            Constraint::Length(TITLE_HEIGHT as u16),
            Constraint::Min((TABLE_HEADER_HEIGHT + 1) as u16),
            Constraint::Length(CONTROL_BAR_HEIGHT as u16),
            Constraint::Length(STATUSLINE_HEIGHT as u16),
        ])
        .areas(frame.area());

        self.draw_title(&data, frame, title);
        self.draw_table(&data, frame, table);
        self.draw_control_bar(&data, frame, control);
        self.draw_statusline(&data, frame, status);

        if data.show_popup {
            self.draw_popup(data.popup_message, frame);
        }
    }

    fn draw_title(&self, data: &UIData, frame: &mut Frame, area: Rect) {
        let name = Line::from(vec![" tvgrid ".bold(), format!("│ {} ", data.name).into()]);
        frame.render_widget(Paragraph::new(name), area);

        let session = if data.privileged {
            Line::from(vec![
                data.identifier.clone().unwrap_or_default().yellow(),
                "  Logout ".into(),
                "<i> ".blue().bold(),
            ])
        } else {
            Line::from(vec![" Login ".into(), "<i> ".blue().bold()])
        };
        frame.render_widget(Paragraph::new(session.right_aligned()), area);
    }

    fn header_cell(&self, column: &HeaderView, selected: bool) -> Cell<'static> {
        let mut text = String::from(if column.padded { " " } else { "" });
        if column.draggable {
            text.push_str("≡ ");
        }
        text.push_str(&column.label);
        if let Some(direction) = column.sort {
            text.push(' ');
            text.push_str(direction.symbol());
        }
        let style = if column.dragged {
            self.theme.dragged_header
        } else if selected {
            self.theme.selected_header
        } else {
            self.theme.header
        };
        Cell::from(text).style(style)
    }

    fn draw_table(&self, data: &UIData, frame: &mut Frame, area: Rect) {
        let widths: Vec<Constraint> = data
            .header
            .iter()
            .map(|h| {
                // The drag marker needs two extra columns
                let extra = if h.draggable { 2 } else { 0 } + usize::from(h.padded);
                Constraint::Length((h.width + extra).min(self.max_column_width + extra) as u16)
            })
            .collect();

        let header = Row::new(
            data.header
                .iter()
                .enumerate()
                .map(|(cidx, column)| self.header_cell(column, cidx == data.selected_column)),
        );

        let rows = data.rows.iter().enumerate().map(|(ridx, cells)| {
            let selected_row = ridx == data.selected_row;
            let cells = cells.iter().enumerate().map(|(cidx, value)| {
                let padded = data.header.get(cidx).is_some_and(|h| h.padded);
                let cell = Cell::from(if padded {
                    format!(" {value}")
                } else {
                    value.clone()
                });
                if selected_row && cidx == data.selected_column && !data.dragging {
                    cell.style(self.theme.selected_cell)
                } else {
                    cell
                }
            });
            let row = Row::new(cells);
            if selected_row {
                row.style(self.theme.selected_row)
            } else {
                row
            }
        });

        trace!(
            "Drawing {} rows, {} columns into {:?}",
            data.rows.len(),
            data.header.len(),
            area
        );
        let table = Table::new(rows, widths)
            .header(header)
            .column_spacing(COLUMN_SPACING);
        frame.render_widget(table, area);
    }

    fn draw_control_bar(&self, data: &UIData, frame: &mut Frame, area: Rect) {
        let mut spans: Vec<Span> = if data.dragging {
            vec![
                " Moving column ".bold(),
                "<←/→>".blue().bold(),
                " move ".into(),
                "<Enter>".blue().bold(),
                " drop ".into(),
                "<Esc>".blue().bold(),
                " cancel ".into(),
            ]
        } else {
            vec![
                " Save ".into(),
                "<s>".blue().bold(),
                " Reset ".into(),
                "<r>".blue().bold(),
                " Sort ".into(),
                "<Enter>".blue().bold(),
            ]
        };
        if data.privileged && !data.dragging {
            spans.push(" Move column ".into());
            spans.push("<m>".blue().bold());
        }
        spans.push(" Help ".into());
        spans.push("<?>".blue().bold());
        frame.render_widget(
            Paragraph::new(Line::from(spans)).style(self.theme.control_bar),
            area,
        );

        let mut position = format!(
            "{}/{} of {} ",
            data.abs_selected_row + usize::from(data.nrows > 0),
            data.nrows,
            data.total_rows
        );
        if data.has_more && data.at_end {
            position.insert_str(0, "Loading... ");
        }
        frame.render_widget(
            Paragraph::new(Line::from(position).right_aligned()).style(self.theme.control_bar),
            area,
        );
    }

    fn draw_statusline(&self, data: &UIData, frame: &mut Frame, area: Rect) {
        if let Some(input) = &data.login_input {
            let prompt = " Login as: ";
            let line = Line::from(vec![prompt.bold(), input.input.clone().into()]);
            frame.render_widget(Paragraph::new(line), area);
            let x = area.x + (prompt.chars().count() + input.cursor_pos) as u16;
            frame.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y));
        } else if let Some(notice) = &data.notice {
            let style = match notice.level {
                NoticeLevel::Info => Style::new(),
                NoticeLevel::Warning => self.theme.warning,
            };
            frame.render_widget(
                Paragraph::new(format!(" {}", notice.message)).style(style),
                area,
            );
        }
    }

    fn draw_popup(&self, message: &str, frame: &mut Frame) {
        let area = popup_area(frame.area(), 60, 80);
        let block = Block::bordered().title(Line::from(" Help ".bold()).centered());
        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(message).block(block), area);
    }
}

fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
