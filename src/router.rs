//! Path based navigation between screens.

/// Outcome of parsing the `:id` segment of `/edit-client/:id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteParam {
    Id(i32),
    Malformed(String),
}

impl RouteParam {
    /// Client ids are positive integers written in canonical form: digits
    /// only, no sign and no leading zero. `0` is reserved for unsaved clients.
    pub fn parse(raw: &str) -> Self {
        let canonical = !raw.is_empty() && !raw.starts_with('0') && raw.bytes().all(|b| b.is_ascii_digit());
        match raw.parse::<i32>() {
            Ok(id) if canonical && id > 0 => RouteParam::Id(id),
            _ => RouteParam::Malformed(raw.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    ClientList,
    AddClient,
    EditClient(RouteParam),
    PhoneDemo,
    NotFound(String),
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let path = normalize(path);
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::ClientList,
            ["add-client"] => Route::AddClient,
            ["edit-client", id] => Route::EditClient(RouteParam::parse(id)),
            ["phone-demo"] => Route::PhoneDemo,
            _ => Route::NotFound(path),
        }
    }

    pub fn edit(id: i32) -> Self {
        Route::EditClient(RouteParam::Id(id))
    }

    /// Canonical path of this route.
    pub fn path(&self) -> String {
        match self {
            Route::ClientList => "/".to_string(),
            Route::AddClient => "/add-client".to_string(),
            Route::EditClient(RouteParam::Id(id)) => format!("/edit-client/{}", id),
            Route::EditClient(RouteParam::Malformed(raw)) => format!("/edit-client/{}", raw),
            Route::PhoneDemo => "/phone-demo".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }
}

// Drops query string, fragment and trailing slashes; always starts with '/'.
fn normalize(path: &str) -> String {
    let path = path.trim();
    let path = path.split(['?', '#']).next().unwrap_or("");
    let path = path.trim_end_matches('/');

    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Navigation history. The last entry is the active route.
pub struct Router {
    history: Vec<Route>,
}

impl Router {
    pub fn new(start: &str) -> Self {
        Self {
            history: vec![Route::parse(start)],
        }
    }

    pub fn current(&self) -> &Route {
        // history is never empty
        &self.history[self.history.len() - 1]
    }

    pub fn current_path(&self) -> String {
        self.current().path()
    }

    pub fn navigate(&mut self, path: &str) -> &Route {
        self.push(Route::parse(path))
    }

    pub fn push(&mut self, route: Route) -> &Route {
        self.history.push(route);
        self.current()
    }

    /// Swap the active route without growing the history.
    pub fn replace(&mut self, route: Route) -> &Route {
        let last = self.history.len() - 1;
        self.history[last] = route;
        self.current()
    }

    /// Go back one entry. Returns `None` when already at the first entry.
    pub fn back(&mut self) -> Option<&Route> {
        if self.history.len() <= 1 {
            return None;
        }
        self.history.pop();
        Some(self.current())
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_routes_match() {
        assert_eq!(Route::parse("/"), Route::ClientList);
        assert_eq!(Route::parse(""), Route::ClientList);
        assert_eq!(Route::parse("/add-client"), Route::AddClient);
        assert_eq!(Route::parse("/add-client/"), Route::AddClient);
        assert_eq!(Route::parse("/phone-demo"), Route::PhoneDemo);
        assert_eq!(Route::parse("/edit-client/42"), Route::edit(42));
    }

    #[test]
    fn query_and_fragment_are_ignored() {
        assert_eq!(Route::parse("/edit-client/42?tab=phones"), Route::edit(42));
        assert_eq!(Route::parse("/add-client#top"), Route::AddClient);
    }

    #[test]
    fn non_numeric_ids_are_malformed() {
        for raw in ["abc", "4x2", "-3", "0", "+42", "042", "99999999999"] {
            assert_eq!(
                Route::parse(&format!("/edit-client/{}", raw)),
                Route::EditClient(RouteParam::Malformed(raw.to_string())),
                "{raw}"
            );
        }
    }

    #[test]
    fn non_canonical_ids_keep_their_path() {
        for path in ["/edit-client/+42", "/edit-client/042"] {
            assert_eq!(Router::new(path).current_path(), path);
        }
    }

    #[test]
    fn unknown_paths_fall_through_to_not_found() {
        assert_eq!(
            Route::parse("/edit-client"),
            Route::NotFound("/edit-client".to_string())
        );
        assert_eq!(
            Route::parse("/clients/7/phones/"),
            Route::NotFound("/clients/7/phones".to_string())
        );
        assert_eq!(Route::parse("nowhere"), Route::NotFound("/nowhere".to_string()));
    }

    #[test]
    fn canonical_paths_round_trip() {
        for path in ["/", "/add-client", "/edit-client/7", "/phone-demo", "/missing"] {
            assert_eq!(Route::parse(path).path(), path);
        }
    }

    #[test]
    fn history_never_pops_the_first_entry() {
        let mut router = Router::new("/");
        router.navigate("/edit-client/3");
        assert_eq!(router.current_path(), "/edit-client/3");
        assert_eq!(router.depth(), 2);

        assert_eq!(router.back(), Some(&Route::ClientList));
        assert_eq!(router.back(), None);
        assert_eq!(router.current(), &Route::ClientList);
    }

    #[test]
    fn replace_keeps_depth() {
        let mut router = Router::new("/edit-client/nope");
        router.replace(Route::NotFound("/edit-client/nope".to_string()));
        assert_eq!(router.depth(), 1);
    }
}
