use scraper::ElementRef;

use super::{class_string, self_and_ancestors};

/// Maximum number of parents walked from an anchor looking for its record
/// container. Deeper nesting is treated as pathological markup.
pub const CONTAINER_WALK_LIMIT: usize = 14;

/// Class substrings that mark a `div` as a recommendation record.
const CONTAINER_MARKERS: [&str; 2] = ["recommend", "curator"];

/// Finds the record container enclosing `anchor`.
///
/// Returns the nearest ancestor `div` whose classes mention a
/// [`CONTAINER_MARKERS`] substring. If none appears within
/// [`CONTAINER_WALK_LIMIT`] parents, returns the last element reached.
#[must_use]
pub fn locate_container(anchor: ElementRef<'_>) -> ElementRef<'_> {
    let mut container = anchor;
    for parent in self_and_ancestors(anchor).skip(1).take(CONTAINER_WALK_LIMIT) {
        if is_record_container(parent) {
            return parent;
        }
        container = parent;
    }
    container
}

fn is_record_container(element: ElementRef<'_>) -> bool {
    if element.value().name() != "div" {
        return false;
    }
    let classes = class_string(element);
    CONTAINER_MARKERS.iter().any(|&marker| classes.contains(marker))
}
