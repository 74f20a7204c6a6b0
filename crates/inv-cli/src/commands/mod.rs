pub mod check;
pub mod show;
pub mod simulate;

use std::path::Path;

use inv_core::World;
use inv_map::LoadResult;
use inv_map::diagnostics::render_diagnostics;

/// Load a map file and print its diagnostics.
/// Returns the world if there are no errors.
fn load_map(path: &Path) -> Result<World, String> {
    let result = inv_map::load_file(path);
    print_diagnostics(&result, path);

    if result.has_errors() {
        Err(format!("{} is not a valid map", path.display()))
    } else {
        Ok(result.world)
    }
}

/// Print diagnostics to stderr, using ariadne when there is source to point into.
fn print_diagnostics(result: &LoadResult, path: &Path) {
    if result.diagnostics.is_empty() {
        return;
    }

    if result.source.is_empty() {
        for diag in &result.diagnostics {
            eprintln!("{diag}");
        }
    } else {
        let filename = path.display().to_string();
        let rendered = render_diagnostics(&result.source, &filename, &result.diagnostics);
        eprint!("{rendered}");
    }

    let errors = result.diagnostics.iter().filter(|d| d.is_error()).count();
    let warnings = result.warnings().count();

    if errors > 0 {
        eprintln!(
            "  {} error{}, {} warning{}",
            errors,
            plural(errors),
            warnings,
            plural(warnings),
        );
    } else {
        eprintln!("  {} warning{}", warnings, plural(warnings));
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
