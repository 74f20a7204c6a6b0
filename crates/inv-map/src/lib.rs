//! Map files for the invasion simulator.
//!
//! A map file has one city per line: the city name followed by its roads as
//! `direction=city` pairs.
//!
//! ```text
//! Foo north=Bar west=Baz south=Qu-ux
//! Bar south=Foo west=Bee
//! ```
//!
//! Loading lexes the text, parses each line, and feeds the definitions into a
//! [`inv_core::WorldMap`]. Problems come back as [`Diagnostic`]s with spans
//! rather than as a bare error, so callers can point at the offending text.

/// Parsed map lines.
pub mod ast;
/// Diagnostics and their terminal rendering.
pub mod diagnostics;
/// Tokenizer for map files.
pub mod lexer;
/// Applying parsed lines to a world map.
pub mod loader;
/// Line parser producing [`ast::CityDef`]s.
pub mod parser;

use std::path::Path;

use inv_core::World;

/// Re-export of [`diagnostics::Diagnostic`].
pub use diagnostics::Diagnostic;
/// Re-exports of [`loader::LoadResult`] and [`loader::load_into`].
pub use loader::{LoadResult, load_into};

/// Parse map text into city definitions, or every diagnostic found.
pub fn parse_source(source: &str) -> Result<Vec<ast::CityDef>, Vec<Diagnostic>> {
    let (tokens, lex_errors) = lexer::lex(source);

    let mut diagnostics: Vec<Diagnostic> = lex_errors
        .into_iter()
        .map(|e| Diagnostic::error(e.span, e.message))
        .collect();

    match parser::parse(&tokens) {
        Ok(defs) if diagnostics.is_empty() => Ok(defs),
        Ok(_) => Err(diagnostics),
        Err(parse_errors) => {
            diagnostics.extend(parse_errors.into_iter().map(|e| {
                let diag = Diagnostic::error(e.span, e.message);
                match e.label {
                    Some(label) => diag.with_label(label),
                    None => diag,
                }
            }));
            Err(diagnostics)
        }
    }
}

/// Load map text into a fresh [`World`].
pub fn load_source(source: &str) -> LoadResult {
    match parse_source(source) {
        Ok(defs) => {
            let mut world = World::new();
            let mut diagnostics = load_into(&defs, &mut world);
            if defs.is_empty() {
                diagnostics.push(Diagnostic::warning(0..0, "map defines no cities"));
            }
            LoadResult {
                world,
                diagnostics,
                source: source.to_string(),
            }
        }
        Err(diagnostics) => LoadResult {
            world: World::new(),
            diagnostics,
            source: source.to_string(),
        },
    }
}

/// Read and load a map file.
pub fn load_file(path: &Path) -> LoadResult {
    match std::fs::read_to_string(path) {
        Ok(source) => load_source(&source),
        Err(e) => LoadResult {
            world: World::new(),
            diagnostics: vec![Diagnostic::error(
                0..0,
                format!("cannot read {}: {e}", path.display()),
            )],
            source: String::new(),
        },
    }
}
