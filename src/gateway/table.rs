use crate::config::GatewayRoute;

/// Static prefix → upstream table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<GatewayRoute>,
}

impl RouteTable {
    pub fn new(routes: &[GatewayRoute]) -> Self {
        let mut routes: Vec<GatewayRoute> = routes
            .iter()
            .map(|r| GatewayRoute {
                prefix: normalize_prefix(&r.prefix),
                upstream: r.upstream.trim_end_matches('/').to_string(),
            })
            .collect();
        // longest first, so the first hit is the most specific one
        routes.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        Self { routes }
    }

    /// Longest prefix owning `path`; a prefix only matches whole segments.
    pub fn resolve(&self, path: &str) -> Option<&GatewayRoute> {
        self.routes
            .iter()
            .find(|route| prefix_matches(&route.prefix, path))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

fn prefix_matches(prefix: &str, path: &str) -> bool {
    if prefix == "/" {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        let route = |prefix: &str, upstream: &str| GatewayRoute {
            prefix: prefix.to_string(),
            upstream: upstream.to_string(),
        };
        RouteTable::new(&[
            route("/api/v1/users", "http://users:8081/"),
            route("/api/v1/grades", "http://grading:8083"),
            route("/api/v1/grades/report/", "http://reports:8090"),
            route("api/v1/files", "http://files:8089"),
        ])
    }

    #[test]
    fn test_longest_prefix_wins() {
        let table = table();
        let upstream = |path| table.resolve(path).map(|r| r.upstream.as_str());

        assert_eq!(upstream("/api/v1/grades/report"), Some("http://reports:8090"));
        assert_eq!(upstream("/api/v1/grades/report/7"), Some("http://reports:8090"));
        assert_eq!(upstream("/api/v1/grades/3"), Some("http://grading:8083"));
        assert_eq!(upstream("/api/v1/users"), Some("http://users:8081"));
    }

    #[test]
    fn test_no_partial_segment_match() {
        let table = table();
        assert!(table.resolve("/api/v1/usersx").is_none());
        assert!(table.resolve("/api/v1/grades-old/1").is_none());
        assert!(table.resolve("/api/v1").is_none());
        assert_eq!(
            table.resolve("/api/v1/files/upload").map(|r| r.prefix.as_str()),
            Some("/api/v1/files")
        );
    }

    #[test]
    fn test_root_prefix_catches_everything() {
        let table = RouteTable::new(&[GatewayRoute {
            prefix: "/".to_string(),
            upstream: "http://web:3000".to_string(),
        }]);
        assert_eq!(table.len(), 1);
        assert!(table.resolve("/anything/at/all").is_some());
    }
}
