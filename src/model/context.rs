//! Page context resolved once at start-up
//!
//! Everything the server tells us about the viewer and the current location
//! lives here and is handed to the controllers by reference. Nothing in it
//! changes for the lifetime of the page.

/// Viewer classification supplied by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewerPrivilege {
    /// Staff users may navigate straight to the edit resource
    Elevated,
    #[default]
    Standard,
}

impl ViewerPrivilege {
    pub fn from_staff_flag(is_staff: bool) -> Self {
        if is_staff {
            ViewerPrivilege::Elevated
        } else {
            ViewerPrivilege::Standard
        }
    }

    pub fn is_elevated(&self) -> bool {
        matches!(self, ViewerPrivilege::Elevated)
    }
}

/// Immutable per-page context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    privilege: ViewerPrivilege,
    location: String,
    return_path: String,
}

impl PageContext {
    pub fn new(privilege: ViewerPrivilege, path: &str, query: &str) -> Self {
        let path = if path.is_empty() { "/" } else { path };
        let query = query.trim_start_matches('?');
        let location = if query.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, query)
        };

        Self {
            privilege,
            return_path: urlencoding::encode(&location).into_owned(),
            location,
        }
    }

    pub fn privilege(&self) -> ViewerPrivilege {
        self.privilege
    }

    /// Current path plus query string, as the browser would report it
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Percent-encoded location used as the `next` parameter
    pub fn return_path(&self) -> &str {
        &self.return_path
    }
}

impl Default for PageContext {
    fn default() -> Self {
        Self::new(ViewerPrivilege::Standard, "/", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_path_is_percent_encoded() {
        let ctx = PageContext::new(ViewerPrivilege::Elevated, "/list", "page=2");
        assert_eq!(ctx.location(), "/list?page=2");
        assert_eq!(ctx.return_path(), "%2Flist%3Fpage%3D2");
    }

    #[test]
    fn test_leading_question_mark_is_ignored() {
        let ctx = PageContext::new(ViewerPrivilege::Standard, "/list", "?page=3");
        assert_eq!(ctx.location(), "/list?page=3");
    }

    #[test]
    fn test_empty_path_defaults_to_root() {
        let ctx = PageContext::new(ViewerPrivilege::Standard, "", "");
        assert_eq!(ctx.location(), "/");
        assert_eq!(ctx.return_path(), "%2F");
    }

    #[test]
    fn test_staff_flag_maps_to_privilege() {
        assert!(ViewerPrivilege::from_staff_flag(true).is_elevated());
        assert!(!ViewerPrivilege::from_staff_flag(false).is_elevated());
    }
}
