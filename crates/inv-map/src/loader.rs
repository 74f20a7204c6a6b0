use inv_core::{World, WorldMap};

use crate::ast::{CityDef, Span};
use crate::diagnostics::Diagnostic;

/// Result of loading a map: the world plus any diagnostics.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded world. Empty when the source had errors.
    pub world: World,
    /// Errors and warnings found while loading.
    pub diagnostics: Vec<Diagnostic>,
    /// The text the diagnostics point into; empty if it could not be read.
    pub source: String,
}

impl LoadResult {
    /// Returns `true` if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Warnings only.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_error())
    }
}

/// Apply parsed definitions to `map` in file order.
///
/// Later roads win, including later roads on the same line. A road that
/// replaces one already in the map is applied anyway and reported as a
/// warning, since the older road is cut on both ends.
pub fn load_into<M: WorldMap>(defs: &[CityDef], map: &mut M) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for def in defs {
        map.add_city(&def.name, &[]);

        for link in &def.links {
            let current = map
                .cities()
                .get(&def.name)
                .and_then(|c| c.neighbor(link.direction));
            if let Some(old) = current.filter(|old| *old != link.target) {
                let message = format!(
                    "`{}` {} was `{old}`, now `{}`",
                    def.name, link.direction, link.target
                );
                diagnostics.push(redirect_warning(link.span.clone(), message, old));
            }

            let back = link.direction.opposite();
            let claimed = map
                .cities()
                .get(&link.target)
                .and_then(|c| c.neighbor(back));
            if let Some(old) = claimed.filter(|old| *old != def.name) {
                let message = format!(
                    "`{}` {back} was `{old}`, now `{}`",
                    link.target, def.name
                );
                diagnostics.push(redirect_warning(link.span.clone(), message, old));
            }

            map.add_city(&def.name, &[(link.direction, link.target.as_str())]);
        }
    }

    tracing::debug!(
        cities = map.cities().len(),
        definitions = defs.len(),
        "map loaded"
    );
    diagnostics
}

fn redirect_warning(span: Span, message: String, old: &str) -> Diagnostic {
    tracing::warn!("{message}");
    Diagnostic::warning(span, message).with_label(format!("the road to `{old}` is cut"))
}
