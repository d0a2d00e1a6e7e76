//! JSON route loader for offline runs.
//!
//! The file format is the route service's response body (see [`crate::data`]).

use std::io::Read;
use std::path::Path;

use crate::{Route, RouteData, RouteResult};

/// Load and validate a route from a JSON file.
pub fn load_route_json(path: &Path) -> RouteResult<Route> {
    let file = std::fs::File::open(path)?;
    load_route_reader(std::io::BufReader::new(file))
}

/// Like [`load_route_json`] but accepts any `Read` source.
pub fn load_route_reader<R: Read>(reader: R) -> RouteResult<Route> {
    let data: RouteData = serde_json::from_reader(reader)?;
    Route::new(data)
}
