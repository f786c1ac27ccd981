/*!
# Fellowship Notes Viewer

A browser-based viewer for team check-in spreadsheets, built in Rust.

## Overview

Fellows fill in a form after every standup and every weekly retrospective; the
form tool exports the answers as a CSV file. This application lets a reader
upload such an export and page through it one fellow at a time, with every
answer placed in a labelled section. Column headers drift between export
versions, so each section accepts a list of synonymous column names.

## Architecture

### Core (no web dependencies)
- **loader**: Parses uploaded CSV bytes into a typed [`Table`], trims column
  names, coerces the `Date` column and sorts rows by it
- **resolver**: Looks a field up through its ordered synonym list
- **fields**: Static section layouts for the Standup and Retrospective modes
- **pager**: Clamped previous/next state machine over the loaded rows
- **view**: Pure view model for the selected record
- **session**: Per-browser state, one independent viewer per mode
- **config**: Server settings from the command line and environment

### Web layer (`web` feature)
- **app**: Routing, upload handling and navigation endpoints
- **store**: Cookie-keyed in-memory session store
- **page**: Handlebars page rendering
- **markdown**: Markdown rendering of free-text answers

## Usage

The server listens on `127.0.0.1:3000` by default:

- `/standup` and `/retrospectives` show the two viewers
- `POST /{mode}/upload` loads a CSV (multipart field `file`)
- `POST /{mode}/previous`, `POST /{mode}/next` move through records
- `/api/{mode}` returns the current screen as JSON
*/

pub mod config;
pub mod dates;
pub mod error;
pub mod fields;
pub mod loader;
pub mod pager;
pub mod resolver;
pub mod session;
pub mod table;
pub mod view;

#[cfg(feature = "web")]
pub mod app;
#[cfg(feature = "web")]
pub mod markdown;
#[cfg(feature = "web")]
pub mod page;
#[cfg(feature = "web")]
pub mod store;

pub use error::{Result, ViewerError};
pub use fields::{FieldSpec, ViewMode, ViewSpec};
pub use pager::{Pager, Transition};
pub use resolver::{FieldValue, resolve};
pub use session::{Session, ViewSession};
pub use table::{CellValue, Row, Table};
pub use view::{RecordView, Screen};
