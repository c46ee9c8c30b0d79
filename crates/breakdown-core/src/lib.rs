//! breakdown-core: Backend-independent data types and algorithms.
//!
//! This crate turns positioned text tokens of a shooting schedule into scene
//! records (token → line → header → scene block → cast) and merges those
//! records into a previously annotated breakdown table. It knows nothing
//! about PDF or DOCX; backends plug in through [`TokenSource`] and
//! [`TableDocument`].

pub mod cast;
pub mod cleanup;
pub mod document;
pub mod error;
pub mod headers;
pub mod lines;
pub mod merge;
pub mod options;
mod patterns;
pub mod roles;
pub mod scene;
pub mod table;
pub mod token;

pub use cast::{cast_column_text, combine_cast, resolve_cast, resolve_cast_names, split_extras};
pub use cleanup::{ARTIFACT_PHRASES, clean_commas, clean_summary, collapse_commas, scrub_text};
pub use document::{
    DIAGNOSTIC_LINES, PageDiagnostics, PageScenes, ScheduleParse, build_role_map,
    extract_page_scenes, parse_schedule,
};
pub use error::{OptionsError, ParseWarning, SourceError, WarningCode};
pub use headers::{Header, detect_headers, has_timing_marker, parse_header_line};
pub use lines::{Line, group_tokens_into_lines};
pub use merge::{
    Annotation, BREAKDOWN_COLUMNS, BreakdownRow, ChangeLogEntry, ExistingAnnotations,
    MergeResult, SceneKey, merge_records,
};
pub use options::{DEFAULT_CAST_SPLIT, MAX_CAST_SPLIT, MIN_CAST_SPLIT, ParseOptions};
pub use roles::{RoleMap, RoleResolver};
pub use scene::{SceneRecord, canonical_timing, parse_scene_block};
pub use table::{TableDocument, apply_breakdown};
pub use token::{PageTokens, Token, TokenSource};
