use crate::error::Result;
use crate::fields::ViewMode;
use crate::loader;
use crate::pager::{Pager, Transition};
use crate::table::Table;
use crate::view::{self, Screen};
use log::{debug, warn};

/// State of one view mode within a session: the loaded table and where the
/// user is in it.
#[derive(Debug, Clone, Default)]
pub struct ViewSession {
    table: Option<Table>,
    pager: Pager,
    file_name: Option<String>,
    error: Option<String>,
}

impl ViewSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and install a newly uploaded file.
    ///
    /// See [`ViewSession::finish_upload`]; on success the row count is returned.
    pub fn upload(&mut self, file_name: Option<&str>, bytes: &[u8]) -> Result<usize> {
        self.finish_upload(file_name, loader::load_upload(file_name, bytes))
    }

    /// Install the outcome of parsing an upload.
    ///
    /// The previous table and position are discarded whether or not the new
    /// file loaded. On success the pager points at the first row; on failure
    /// the error is kept for the page and handed back.
    pub fn finish_upload(&mut self, file_name: Option<&str>, loaded: Result<Table>) -> Result<usize> {
        self.file_name = file_name.map(str::to_string);

        match loaded {
            Ok(table) => {
                let rows = table.len();
                self.load_table(table);
                Ok(rows)
            }
            Err(err) => {
                warn!("Rejected upload {:?}: {}", file_name, err);
                self.table = None;
                self.pager.load(0);
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Install an already loaded table, resetting the position.
    pub fn load_table(&mut self, table: Table) {
        self.pager.load(table.len());
        self.table = Some(table);
        self.error = None;
    }

    /// Move the pager; returns whether the position changed.
    pub fn navigate(&mut self, transition: Transition) -> bool {
        let moved = self.pager.apply(transition);
        debug!("{:?} -> {:?} (moved: {})", transition, self.pager, moved);
        moved
    }

    pub fn previous(&mut self) -> bool {
        self.navigate(Transition::Previous)
    }

    pub fn next(&mut self) -> bool {
        self.navigate(Transition::Next)
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Current screen for `mode`; re-rendered on every request.
    pub fn screen(&self, mode: ViewMode) -> Screen {
        view::screen(mode, self.table.as_ref(), &self.pager, self.error.as_deref())
    }
}

/// Everything one browser session holds: an independent viewer per mode.
#[derive(Debug, Clone, Default)]
pub struct Session {
    standup: ViewSession,
    retrospective: ViewSession,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self, mode: ViewMode) -> &ViewSession {
        match mode {
            ViewMode::Standup => &self.standup,
            ViewMode::Retrospective => &self.retrospective,
        }
    }

    pub fn view_mut(&mut self, mode: ViewMode) -> &mut ViewSession {
        match mode {
            ViewMode::Standup => &mut self.standup,
            ViewMode::Retrospective => &mut self.retrospective,
        }
    }

    pub fn screen(&self, mode: ViewMode) -> Screen {
        self.view(mode).screen(mode)
    }
}
