//! Endpoint catalog advertised by the root route.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Path pattern → description, in display order.
pub const ENDPOINTS: &[(&str, &str)] = &[
    ("/anything/*", "Accepts any HTTP method and returns request details"),
    ("/get", "Returns GET request details"),
    ("/post", "Returns POST request details"),
    ("/put", "Returns PUT request details"),
    ("/delete", "Returns DELETE request details"),
    ("/patch", "Returns PATCH request details"),
    ("/status/:code", "Returns specified HTTP status code"),
    ("/delay/:seconds", "Delays response by specified seconds"),
    ("/headers", "Returns request headers only"),
    ("/ip", "Returns client IP address"),
    ("/user-agent", "Returns client User-Agent"),
    ("/json", "Returns JSON data from request body"),
];

/// Serializes a catalog as a JSON object, keeping declaration order.
#[derive(Debug, Clone, Copy)]
pub struct Catalog(pub &'static [(&'static str, &'static str)]);

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (path, description) in self.0 {
            map.serialize_entry(path, description)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_serializes_in_order() {
        let json = serde_json::to_string(&Catalog(&ENDPOINTS[..2])).unwrap();
        assert_eq!(
            json,
            r#"{"/anything/*":"Accepts any HTTP method and returns request details","/get":"Returns GET request details"}"#
        );
    }

    #[test]
    fn test_catalog_has_unique_paths() {
        let mut paths: Vec<_> = ENDPOINTS.iter().map(|(path, _)| *path).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), ENDPOINTS.len());
    }
}
