use std::time::Instant;

use ratatui::crossterm::event::KeyEvent;
use tracing::{debug, info, instrument, trace, warn};
use tracing_error::SpanTrace;

use crate::columns::{ColumnId, ColumnLayoutStore, ColumnSpec};
use crate::dataset::{Dataset, Row};
use crate::domain::{HELP_TEXT, Message, TVConfig, TVError};
use crate::drag::{DragGesture, ReorderEvent};
use crate::inputter::{InputResult, Inputter};
use crate::loader::{IncrementalLoader, RowWindow};
use crate::session::Session;
use crate::sorting::{SortDirection, SortState, sorted_positions};
use crate::storage::KeyValueStore;
use crate::ui::{
    COLUMN_WIDTH_MARGIN, CONTROL_BAR_HEIGHT, STATUSLINE_HEIGHT, TABLE_HEADER_HEIGHT, TITLE_HEIGHT,
};

#[derive(Debug, PartialEq)]
pub enum Status {
    Ready,
    Quitting,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Modus {
    Table,
    Drag,
    Popup,
    Login,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// Transient message in the status line.
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
    pub since: Instant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderView {
    pub label: String,
    pub padded: bool,
    pub width: usize,
    pub sort: Option<SortDirection>,
    pub draggable: bool,
    pub dragged: bool,
}

/// Everything the ui needs to draw one frame.
pub struct UIData {
    pub name: String,
    pub header: Vec<HeaderView>,
    pub rows: Vec<Vec<String>>,
    /// Rows in the window
    pub nrows: usize,
    pub total_rows: usize,
    pub has_more: bool,
    /// Last window row is on screen
    pub at_end: bool,
    pub selected_row: usize,
    pub selected_column: usize,
    pub abs_selected_row: usize,
    pub privileged: bool,
    pub identifier: Option<String>,
    pub dragging: bool,
    pub show_popup: bool,
    pub popup_message: &'static str,
    pub login_input: Option<InputResult>,
    pub notice: Option<Notice>,
}

/// Cell texts of `row` in column order.
pub fn project_row(row: &Row, columns: &[ColumnSpec]) -> Vec<String> {
    columns
        .iter()
        .map(|column| row.value(column.id).to_string())
        .collect()
}

pub struct Model {
    config: TVConfig,
    pub status: Status,
    modus: Modus,
    previous_modus: Modus,
    session: Session,
    layout: ColumnLayoutStore,
    sort: SortState,
    loader: IncrementalLoader,
    window: RowWindow,
    view: Vec<usize>, // Window positions in sorted order
    drag: DragGesture,
    cursor_row: usize,
    cursor_column: usize,
    offset_row: usize,
    table_height: usize,
    input: Inputter,
    last_input: InputResult,
    notice: Option<Notice>,
}

impl Model {
    pub fn init(
        config: &TVConfig,
        dataset: Dataset,
        store: Box<dyn KeyValueStore>,
        session: Session,
        ui_height: usize,
    ) -> Self {
        let layout = ColumnLayoutStore::initialize(store, config.layout_key.clone());
        let loader = IncrementalLoader::new(dataset, config.initial_rows, config.page_size);
        let window = loader.initial();
        let mut model = Self {
            config: config.clone(),
            status: Status::Ready,
            modus: Modus::Table,
            previous_modus: Modus::Table,
            session,
            layout,
            sort: SortState::default(),
            loader,
            window,
            view: Vec::new(),
            drag: DragGesture::default(),
            cursor_row: 0,
            cursor_column: 0,
            offset_row: 0,
            table_height: Self::table_height_for(ui_height),
            input: Inputter::default(),
            last_input: InputResult::default(),
            notice: None,
        };
        model.refresh_view();
        // An empty first window still pulls a page
        model.maybe_load_more();
        model
    }

    fn table_height_for(ui_height: usize) -> usize {
        ui_height
            .saturating_sub(
                TITLE_HEIGHT + TABLE_HEADER_HEIGHT + CONTROL_BAR_HEIGHT + STATUSLINE_HEIGHT,
            )
            .max(1)
    }

    pub fn raw_keyevents(&self) -> bool {
        self.modus == Modus::Login
    }

    pub fn quit(&mut self) {
        self.status = Status::Quitting;
    }

    pub fn update(&mut self, message: Option<Message>) -> Result<(), TVError> {
        let Some(msg) = message else {
            return Ok(());
        };
        trace!("Update: Modus {:?}, Message {:?}", self.modus, msg);
        match self.modus {
            Modus::Table => match msg {
                Message::Quit => self.quit(),
                Message::MoveDown => self.move_down(1),
                Message::MoveUp => self.move_up(1),
                Message::MoveLeft => self.move_left(),
                Message::MoveRight => self.move_right(),
                Message::MovePageDown => self.move_down(self.table_height),
                Message::MovePageUp => self.move_up(self.table_height),
                Message::MoveBeginning => self.select_row(0),
                Message::MoveEnd => self.move_end(),
                Message::Sort | Message::Enter => self.sort_current_column(),
                Message::MoveColumn => self.start_drag(),
                Message::Save => self.save_layout(),
                Message::Reset => self.reset_layout(),
                Message::ToggleLogin => self.toggle_login(),
                Message::Help => self.show_help(),
                Message::Resize(_, height) => self.ui_resize(height),
                _ => (),
            },
            Modus::Drag => match msg {
                Message::Quit => self.quit(),
                Message::MoveLeft => self.drag.move_left(),
                Message::MoveRight => self.drag.move_right(),
                Message::MoveColumn | Message::Enter => {
                    if let Some(event) = self.drag.drop() {
                        self.handle_reorder(event);
                    }
                    self.modus = Modus::Table;
                }
                Message::Exit => {
                    if let Some(event) = self.drag.cancel() {
                        self.handle_reorder(event);
                    }
                    self.modus = Modus::Table;
                }
                Message::Resize(_, height) => self.ui_resize(height),
                _ => (),
            },
            Modus::Popup => match msg {
                Message::Quit => self.quit(),
                Message::Exit | Message::Enter | Message::Help => self.close_popup(),
                Message::Resize(_, height) => self.ui_resize(height),
                _ => (),
            },
            Modus::Login => match msg {
                Message::RawKey(key) => self.raw_input(key),
                Message::Resize(_, height) => self.ui_resize(height),
                _ => (),
            },
        }
        Ok(())
    }

    // -------------------- Sorting ---------------------- //

    /// Sorts by `column`, ignoring columns that are not part of the layout.
    pub fn request_sort(&mut self, column: ColumnId) {
        if !self.layout.contains(column) {
            debug!("Ignoring sort request for {column}, not in layout");
            return;
        }
        self.sort.request_sort(column);
        self.refresh_view();
    }

    pub fn sort_by_name(&mut self, name: &str) {
        match name.parse::<ColumnId>() {
            Ok(column) => self.request_sort(column),
            Err(e) => warn!("{e}, sort request ignored"),
        }
    }

    fn sort_current_column(&mut self) {
        if let Some(column) = self.layout.columns().get(self.cursor_column) {
            let id = column.id;
            self.request_sort(id);
        }
    }

    // Only the loaded window is sorted. Rows loaded later join the order on the next refresh.
    fn refresh_view(&mut self) {
        let start_time = Instant::now();
        self.view = sorted_positions(self.loader.rows(&self.window), &self.sort);
        trace!(
            "Sorted {} rows in {}us",
            self.view.len(),
            start_time.elapsed().as_micros()
        );
    }

    // -------------------- Loading ---------------------- //

    fn maybe_load_more(&mut self) {
        let abs = self.offset_row + self.cursor_row;
        if self.window.has_more && abs + self.config.load_threshold + 1 >= self.window.len {
            self.window = self.loader.load_more(&self.window);
            self.refresh_view();
        }
    }

    // -------------------- Columns ---------------------- //

    fn start_drag(&mut self) {
        if !self.session.privileged() {
            self.set_notice("Log in to move columns", NoticeLevel::Warning);
            return;
        }
        if self.drag.pick(self.cursor_column, self.layout.len()) {
            self.modus = Modus::Drag;
        }
    }

    pub fn handle_reorder(&mut self, event: ReorderEvent) {
        if !self.session.privileged() {
            debug!("Ignoring reorder {event:?}, not logged in");
            return;
        }
        if self.layout.reorder(event.source, event.destination)
            && let Some(destination) = event.destination
        {
            self.cursor_column = destination.min(self.layout.len() - 1);
        }
    }

    #[instrument(skip_all)]
    pub fn save_layout(&mut self) {
        match self.layout.save() {
            Ok(()) => self.set_notice("Column layout saved", NoticeLevel::Info),
            Err(e) => {
                warn!("Saving column layout failed: {e}\n{}", SpanTrace::capture());
                self.set_notice(
                    format!("Could not save column layout: {e}"),
                    NoticeLevel::Warning,
                );
            }
        }
    }

    #[instrument(skip_all)]
    pub fn reset_layout(&mut self) {
        let result = self.layout.reset();
        self.cursor_column = self.cursor_column.min(self.layout.len().saturating_sub(1));
        match result {
            Ok(()) => self.set_notice("Column layout reset", NoticeLevel::Info),
            Err(e) => {
                warn!("Removing saved column layout failed: {e}");
                self.set_notice(
                    format!("Layout reset, but the saved copy could not be removed: {e}"),
                    NoticeLevel::Warning,
                );
            }
        }
    }

    // -------------------- Session ---------------------- //

    fn toggle_login(&mut self) {
        if self.session.privileged() {
            self.session.logout();
            self.set_notice("Logged out", NoticeLevel::Info);
        } else {
            self.previous_modus = self.modus;
            self.modus = Modus::Login;
            self.input.clear();
            self.last_input = self.input.get();
        }
    }

    fn raw_input(&mut self, key: KeyEvent) {
        self.last_input = self.input.read(key);
        if !self.last_input.finished {
            return;
        }
        self.modus = self.previous_modus;
        self.previous_modus = Modus::Login;
        if self.last_input.canceled {
            trace!("Login canceled");
            return;
        }
        let identifier = self.last_input.input.clone();
        self.session.login(identifier);
        let message = match self.session.identifier() {
            Some(id) => format!("Logged in as {id}"),
            None => "Logged in".to_string(),
        };
        self.set_notice(message, NoticeLevel::Info);
    }

    // -------------------- Popup & status ---------------------- //

    fn show_help(&mut self) {
        self.previous_modus = self.modus;
        self.modus = Modus::Popup;
    }

    fn close_popup(&mut self) {
        trace!("Close popup ...");
        self.modus = self.previous_modus;
        self.previous_modus = Modus::Popup;
    }

    fn set_notice(&mut self, message: impl Into<String>, level: NoticeLevel) {
        let message = message.into();
        info!("Notice: {message}");
        self.notice = Some(Notice {
            message,
            level,
            since: Instant::now(),
        });
    }

    fn ui_resize(&mut self, height: usize) {
        trace!("UI was resized! h:{height}");
        self.table_height = Self::table_height_for(height);
        self.select_row(self.offset_row + self.cursor_row);
    }

    // -------------------- Cursor ---------------------- //

    fn select_row(&mut self, abs: usize) {
        let abs = abs.min(self.view.len().saturating_sub(1));
        if abs < self.offset_row {
            self.offset_row = abs;
        } else if abs >= self.offset_row + self.table_height {
            self.offset_row = abs + 1 - self.table_height;
        }
        self.cursor_row = abs - self.offset_row;
    }

    fn move_down(&mut self, size: usize) {
        if self.view.is_empty() {
            return;
        }
        self.select_row(self.offset_row + self.cursor_row + size);
        self.maybe_load_more();
    }

    fn move_up(&mut self, size: usize) {
        self.select_row((self.offset_row + self.cursor_row).saturating_sub(size));
    }

    fn move_end(&mut self) {
        if self.view.is_empty() {
            return;
        }
        self.select_row(self.view.len() - 1);
        self.maybe_load_more();
    }

    fn move_left(&mut self) {
        self.cursor_column = self.cursor_column.saturating_sub(1);
    }

    fn move_right(&mut self) {
        if self.cursor_column + 1 < self.layout.len() {
            self.cursor_column += 1;
        }
    }

    // -------------------- Rendering ---------------------- //

    /// Column order as displayed, with a dragged column previewed at its hovered slot.
    fn display_columns(&self) -> Vec<(ColumnSpec, bool)> {
        let mut columns: Vec<(ColumnSpec, bool)> = self
            .layout
            .columns()
            .iter()
            .map(|c| (c.clone(), false))
            .collect();
        if let (Some(source), Some(hover)) = (self.drag.source(), self.drag.hover())
            && source < columns.len()
        {
            let (column, _) = columns.remove(source);
            columns.insert(hover.min(columns.len()), (column, true));
        }
        columns
    }

    pub fn ui_data(&self) -> UIData {
        let display = self.display_columns();
        let specs: Vec<ColumnSpec> = display.iter().map(|(c, _)| c.clone()).collect();
        let window_rows = self.loader.rows(&self.window);

        let mut widths: Vec<usize> = specs
            .iter()
            .map(|c| c.label.chars().count() + 2) // Room for the sort marker
            .collect();
        for row in window_rows {
            for (width, cell) in widths.iter_mut().zip(project_row(row, &specs)) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header = display
            .iter()
            .zip(widths.iter())
            .map(|((column, dragged), width)| HeaderView {
                label: column.label.clone(),
                padded: !column.disable_padding,
                width: (width + COLUMN_WIDTH_MARGIN).min(self.config.max_column_width),
                sort: self.sort.direction_of(column.id),
                draggable: self.session.privileged(),
                dragged: *dragged,
            })
            .collect();

        let rbegin = self.offset_row.min(self.view.len());
        let rend = std::cmp::min(rbegin + self.table_height, self.view.len());
        let rows = self.view[rbegin..rend]
            .iter()
            .map(|&pos| project_row(&window_rows[pos], &specs))
            .collect();

        let notice = self
            .notice
            .as_ref()
            .filter(|n| n.since.elapsed() < self.config.status_timeout)
            .cloned();

        UIData {
            name: self.loader.dataset().name().to_string(),
            header,
            rows,
            nrows: self.view.len(),
            total_rows: self.loader.dataset().len(),
            has_more: self.window.has_more,
            at_end: rend == self.view.len(),
            selected_row: self.cursor_row,
            selected_column: self.drag.hover().unwrap_or(self.cursor_column),
            abs_selected_row: self.offset_row + self.cursor_row,
            privileged: self.session.privileged(),
            identifier: self.session.identifier().map(str::to_string),
            dragging: self.drag.is_active(),
            show_popup: self.modus == Modus::Popup,
            popup_message: HELP_TEXT,
            login_input: (self.modus == Modus::Login).then(|| self.last_input.clone()),
            notice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::default_columns;
    use crate::storage::MemoryStore;
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};

    impl Model {
        fn layout(&self) -> &ColumnLayoutStore {
            &self.layout
        }

        fn sort_state(&self) -> SortState {
            self.sort
        }

        fn window(&self) -> RowWindow {
            self.window
        }

        fn session(&self) -> &Session {
            &self.session
        }

        fn notice(&self) -> Option<&Notice> {
            self.notice.as_ref()
        }
    }

    // 24 lines leave 20 table rows
    const UI_HEIGHT: usize = 24;

    fn model_with(nrows: usize, session: Session, store: MemoryStore) -> Model {
        Model::init(
            &TVConfig::default(),
            Dataset::generate(nrows, 11),
            Box::new(store),
            session,
            UI_HEIGHT,
        )
    }

    fn model(nrows: usize) -> Model {
        model_with(nrows, Session::default(), MemoryStore::new())
    }

    fn privileged_model(nrows: usize) -> Model {
        model_with(nrows, Session::logged_in("ada@example.com"), MemoryStore::new())
    }

    fn send(model: &mut Model, messages: &[Message]) {
        for m in messages {
            model.update(Some(m.clone())).unwrap();
        }
    }

    fn first_ids(model: &Model, n: usize) -> Vec<String> {
        let data = model.ui_data();
        let id_col = data.header.iter().position(|h| h.label == "ID").unwrap();
        data.rows.iter().take(n).map(|r| r[id_col].clone()).collect()
    }

    fn row(is_private: bool) -> Row {
        Row {
            id: 7,
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@example.com".to_string(),
            city: "Arlington".to_string(),
            registered_date: "2020-01-01".to_string(),
            is_private,
        }
    }

    #[test]
    fn projection_follows_the_layout() {
        let mut columns = default_columns();
        columns.swap(0, 7);
        let cells = project_row(&row(true), &columns);
        assert_eq!(cells[0], "True");
        assert_eq!(cells[3], "Grace Hopper");
        assert_eq!(cells[7], "7");
        assert_eq!(project_row(&row(false), &columns)[0], "False");
    }

    #[test]
    fn scrolling_near_the_end_loads_more_rows() {
        let mut model = model(32);
        assert_eq!(model.window(), RowWindow { len: 15, has_more: true });

        send(&mut model, &vec![Message::MoveDown; 10]);
        assert_eq!(model.window().len, 15);

        send(&mut model, &[Message::MoveDown]);
        assert_eq!(model.window(), RowWindow { len: 25, has_more: true });

        send(&mut model, &[Message::MoveEnd]);
        assert_eq!(model.window(), RowWindow { len: 32, has_more: false });

        send(&mut model, &[Message::MoveEnd, Message::MovePageDown]);
        assert_eq!(model.window(), RowWindow { len: 32, has_more: false });
        assert_eq!(model.ui_data().abs_selected_row, 31);
    }

    #[test]
    fn enter_sorts_the_selected_column_and_toggles() {
        let mut model = model(20);
        send(&mut model, &[Message::Enter]);
        assert_eq!(
            model.sort_state(),
            SortState {
                order_by: ColumnId::Id,
                direction: SortDirection::Descending
            }
        );
        send(&mut model, &[Message::MoveRight, Message::Sort]);
        assert_eq!(
            model.sort_state(),
            SortState {
                order_by: ColumnId::FirstName,
                direction: SortDirection::Ascending
            }
        );
    }

    #[test]
    fn only_the_loaded_window_is_sorted() {
        let mut model = model(32);
        model.request_sort(ColumnId::Id);
        assert_eq!(model.sort_state().direction, SortDirection::Descending);
        assert_eq!(first_ids(&model, 2), vec!["15", "14"]);

        send(&mut model, &[Message::MoveEnd]);
        assert_eq!(first_ids(&model, 2), vec!["25", "24"]);
    }

    #[test]
    fn unknown_sort_column_is_ignored() {
        let mut model = model(20);
        model.sort_by_name("salary");
        assert_eq!(model.sort_state(), SortState::default());
        model.sort_by_name("city");
        assert_eq!(model.sort_state().order_by, ColumnId::City);
    }

    #[test]
    fn moving_columns_requires_login() {
        let mut model = model(20);
        send(&mut model, &[Message::MoveColumn, Message::MoveRight, Message::Enter]);
        // Enter fell through to sorting, the order is unchanged
        assert_eq!(model.layout().columns(), default_columns().as_slice());
        assert_eq!(model.notice().map(|n| n.level), Some(NoticeLevel::Warning));

        model.handle_reorder(ReorderEvent {
            source: 0,
            destination: Some(2),
        });
        assert_eq!(model.layout().columns(), default_columns().as_slice());
    }

    #[test]
    fn drag_and_drop_reorders_columns() {
        let mut model = privileged_model(20);
        send(
            &mut model,
            &[
                Message::MoveColumn,
                Message::MoveRight,
                Message::MoveRight,
            ],
        );
        let preview = model.ui_data();
        assert!(preview.dragging);
        assert_eq!(preview.header[2].label, "ID");
        assert!(preview.header[2].dragged);
        assert_eq!(model.layout().ids()[0], ColumnId::Id);

        send(&mut model, &[Message::Enter]);
        assert_eq!(
            &model.layout().ids()[..3],
            &[ColumnId::FirstName, ColumnId::LastName, ColumnId::Id]
        );
        assert_eq!(model.ui_data().selected_column, 2);
        assert!(!model.ui_data().dragging);
    }

    #[test]
    fn cancelled_drag_keeps_the_order() {
        let mut model = privileged_model(20);
        send(
            &mut model,
            &[Message::MoveColumn, Message::MoveRight, Message::Exit],
        );
        assert_eq!(model.layout().columns(), default_columns().as_slice());
    }

    #[test]
    fn failed_save_warns_and_keeps_the_layout() {
        let mut model = model_with(20, Session::logged_in("x"), MemoryStore::with_quota(10));
        send(
            &mut model,
            &[Message::MoveColumn, Message::MoveRight, Message::Enter],
        );
        let ids = model.layout().ids();

        send(&mut model, &[Message::Save]);
        let notice = model.notice().unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert!(notice.message.contains("quota"));
        assert_eq!(model.layout().ids(), ids);
        assert_eq!(model.layout().store().get("columnLayout").unwrap(), None);

        // Still usable
        send(&mut model, &[Message::MoveDown, Message::Sort]);
        assert_eq!(model.status, Status::Ready);
    }

    #[test]
    fn save_and_reset() {
        let mut model = privileged_model(20);
        send(
            &mut model,
            &[
                Message::MoveColumn,
                Message::MoveRight,
                Message::Enter,
                Message::Save,
            ],
        );
        assert_eq!(model.notice().unwrap().level, NoticeLevel::Info);
        assert!(model.layout().store().get("columnLayout").unwrap().is_some());

        send(&mut model, &[Message::Reset]);
        assert_eq!(model.layout().columns(), default_columns().as_slice());
        assert_eq!(model.layout().store().get("columnLayout").unwrap(), None);
    }

    #[test]
    fn login_prompt_unlocks_dragging() {
        let mut model = model(20);
        send(&mut model, &[Message::ToggleLogin]);
        assert!(model.raw_keyevents());
        for c in "bob".chars() {
            send(
                &mut model,
                &[Message::RawKey(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))],
            );
        }
        assert_eq!(model.ui_data().login_input.unwrap().input, "bob");
        send(
            &mut model,
            &[Message::RawKey(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))],
        );
        assert!(!model.raw_keyevents());
        assert!(model.session().privileged());
        assert_eq!(model.session().identifier(), Some("bob"));
        assert!(model.ui_data().header.iter().all(|h| h.draggable));

        send(&mut model, &[Message::ToggleLogin]);
        assert!(!model.session().privileged());
    }

    #[test]
    fn cancelled_login_stays_logged_out() {
        let mut model = model(20);
        send(
            &mut model,
            &[
                Message::ToggleLogin,
                Message::RawKey(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)),
                Message::RawKey(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            ],
        );
        assert!(!model.raw_keyevents());
        assert!(!model.session().privileged());
    }

    #[test]
    fn help_popup_opens_and_closes() {
        let mut model = model(5);
        send(&mut model, &[Message::Help]);
        assert!(model.ui_data().show_popup);
        // Table keys are ignored while the popup is open
        send(&mut model, &[Message::MoveDown]);
        assert_eq!(model.ui_data().abs_selected_row, 0);
        send(&mut model, &[Message::Exit]);
        assert!(!model.ui_data().show_popup);
        send(&mut model, &[Message::Quit]);
        assert_eq!(model.status, Status::Quitting);
    }

    #[test]
    fn resize_keeps_the_cursor_visible() {
        let mut model = model(15);
        send(&mut model, &[Message::MoveEnd]);
        send(&mut model, &[Message::Resize(80, 9)]);
        let data = model.ui_data();
        assert_eq!(data.rows.len(), 5);
        assert_eq!(data.abs_selected_row, 14);
        assert_eq!(data.selected_row, 4);
        assert!(data.at_end);
    }

    #[test]
    fn empty_dataset_renders_nothing() {
        let mut model = model(0);
        send(&mut model, &[Message::MoveDown, Message::MoveEnd, Message::Sort]);
        let data = model.ui_data();
        assert!(data.rows.is_empty());
        assert!(!data.has_more);
    }

    #[test]
    fn zero_initial_rows_still_fill_the_table() {
        let mut model = Model::init(
            &TVConfig::default().with_initial_rows(0usize),
            Dataset::generate(100, 11),
            Box::new(MemoryStore::new()),
            Session::default(),
            UI_HEIGHT,
        );
        let data = model.ui_data();
        assert_eq!(data.nrows, 10);
        assert!(data.has_more);

        send(&mut model, &[Message::MoveEnd]);
        let data = model.ui_data();
        assert_eq!(data.nrows, 20);
        assert!(!data.rows.is_empty());
    }
}
